//! Random number source for the simulation
//!
//! All gameplay randomness (enemy firing gate, particle parameters, backdrop
//! layout) goes through `RandomSource` so tests can script the draws.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub trait RandomSource {
    /// Uniform float in [0, 1)
    fn unit(&mut self) -> f32;

    /// Uniform float in [lo, hi]; returns `lo` for an empty or inverted range
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.unit()
    }

    /// Uniform integer in [lo, hi); returns `lo` for an empty range
    fn range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo) as f32;
        lo + ((self.unit() * span) as u32).min(hi - lo - 1)
    }
}

/// Seeded PCG stream used by the running game
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    fn range_u32(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..hi)
    }
}

/// Replays a fixed list of unit draws, then repeats the fallback value
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    draws: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = f32>, fallback: f32) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback,
        }
    }

    /// Every draw returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(std::iter::empty(), value)
    }
}

impl RandomSource for ScriptedRng {
    fn unit(&mut self) -> f32 {
        self.draws.pop_front().unwrap_or(self.fallback).clamp(0.0, 0.999_999)
    }
}

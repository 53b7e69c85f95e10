//! Particle bursts and particle fade
//!
//! Particles are ordinary timed entities tagged `Particle`. A burst queues
//! them on the world; they join the live set at the end of the tick.

use std::f32::consts::TAU;

use glam::Vec2;

use super::entity::{Behavior, Entity, Lifetime, Rgb, Tag};
use super::rng::RandomSource;
use super::state::World;
use super::vector::from_angle_len;

/// Particle speed range in pixels/s (integer draws, upper bound exclusive)
pub const PARTICLE_SPEED_MIN: u32 = 50;
pub const PARTICLE_SPEED_MAX: u32 = 200;
/// Particle square size range in pixels (upper bound exclusive)
pub const PARTICLE_SIZE_MIN: u32 = 2;
pub const PARTICLE_SIZE_MAX: u32 = 5;
/// Default life range for bursts, in seconds
pub const DEFAULT_LIFE_RANGE: (f32, f32) = (1.0, 5.0);

/// Parameters of one burst
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstSpec {
    pub at: Vec2,
    pub count: u32,
    pub color: Rgb,
    /// Direction range in radians
    pub angle_range: (f32, f32),
    /// Life range in seconds
    pub life_range: (f32, f32),
}

impl BurstSpec {
    /// Omnidirectional burst with the default life range
    pub fn new(at: Vec2, count: u32, color: Rgb) -> Self {
        Self {
            at,
            count,
            color,
            angle_range: (0.0, TAU),
            life_range: DEFAULT_LIFE_RANGE,
        }
    }

    /// Cone of half-width `spread` around `direction`
    pub fn cone(mut self, direction: f32, spread: f32) -> Self {
        self.angle_range = (direction - spread, direction + spread);
        self
    }

    pub fn lives(mut self, lo: f32, hi: f32) -> Self {
        self.life_range = (lo, hi);
        self
    }
}

/// Queue `burst.count` particles on the world
pub fn spawn_burst<R: RandomSource + ?Sized>(world: &mut World, rng: &mut R, burst: &BurstSpec) {
    for _ in 0..burst.count {
        let size = rng.range_u32(PARTICLE_SIZE_MIN, PARTICLE_SIZE_MAX) as f32;
        let angle = rng.range_f32(burst.angle_range.0, burst.angle_range.1);
        let speed = rng.range_u32(PARTICLE_SPEED_MIN, PARTICLE_SPEED_MAX) as f32;
        let life = rng.range_f32(burst.life_range.0, burst.life_range.1);

        world.spawn(|id| {
            Entity::new(id, Tag::Particle, burst.at, size, burst.color)
                .with_velocity(from_angle_len(angle, speed))
                .with_behavior(Behavior::Timed(Lifetime::new(life)))
        });
    }
    world.stats.particles_spawned += burst.count as u64;
    log::trace!("Burst of {} particles at {:?}", burst.count, burst.at);
}

/// Brightness for a given life, as a fraction of full value
pub fn brightness(life: &Lifetime, floor: f32) -> f32 {
    life.ratio().clamp(floor, 1.0)
}

/// Recompute a particle's drawn color from its remaining life
pub fn fade(entity: &mut Entity, floor: f32) {
    if let Some(life) = entity.lifetime() {
        let value = brightness(life, floor);
        entity.color = entity.base_color.with_value(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::entity::EntityId;
    use crate::sim::rng::{ScriptedRng, SimRng};
    use proptest::prelude::*;

    #[test]
    fn test_burst_is_queued_not_live() {
        let mut world = World::new(&Settings::default());
        let live = world.entities.len();
        let mut rng = SimRng::new(1);
        spawn_burst(&mut world, &mut rng, &BurstSpec::new(Vec2::ZERO, 30, Rgb::WHITE));
        assert_eq!(world.entities.len(), live);
        assert_eq!(world.pending_len(), 30);
        assert_eq!(world.flush_spawns(), 30);
        assert_eq!(world.count(Tag::Particle), 30);
    }

    #[test]
    fn test_burst_parameters_within_ranges() {
        let mut world = World::new(&Settings::default());
        let mut rng = SimRng::new(99);
        let burst = BurstSpec::new(Vec2::new(10.0, 20.0), 200, Rgb::new(0, 255, 255))
            .cone(1.0, 0.25)
            .lives(0.2, 1.0);
        spawn_burst(&mut world, &mut rng, &burst);
        world.flush_spawns();

        for p in world.entities.iter().filter(|e| e.tag == Tag::Particle) {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            let speed = p.vel.length();
            assert!((49.9..200.0).contains(&speed), "speed {speed}");
            let angle = p.vel.y.atan2(p.vel.x);
            assert!((0.749..=1.251).contains(&angle), "angle {angle}");
            let life = p.lifetime().expect("particles are timed");
            assert!((0.2..=1.0).contains(&life.initial));
            let size = p.bbox.size().x;
            assert!((2.0..=4.0).contains(&size));
        }
    }

    #[test]
    fn test_scripted_burst_is_exact() {
        let mut world = World::new(&Settings::default());
        // size, angle, speed, life
        let mut rng = ScriptedRng::new([0.0, 0.0, 0.0, 0.5], 0.0);
        spawn_burst(&mut world, &mut rng, &BurstSpec::new(Vec2::ZERO, 1, Rgb::WHITE));
        world.flush_spawns();
        let p = world.entities.last().expect("particle");
        assert_eq!(p.bbox.size(), Vec2::splat(2.0));
        assert!((p.vel - Vec2::new(50.0, 0.0)).length() < 1e-3);
        assert!((p.lifetime().map(|l| l.initial).unwrap_or_default() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_half_life_is_half_brightness() {
        let mut e = Entity::new(EntityId(1), Tag::Particle, Vec2::ZERO, 3.0, Rgb::new(0, 255, 150))
            .with_behavior(Behavior::Timed(Lifetime::new(2.0)));
        e.age(1.0);
        fade(&mut e, 0.05);
        assert_eq!(e.color, Rgb::new(0, 128, 75));
    }

    #[test]
    fn test_brightness_floor() {
        let mut life = Lifetime::new(1.0);
        life.age(0.99);
        assert_eq!(brightness(&life, 0.05), 0.05);
        life.age(1.0);
        assert_eq!(brightness(&life, 0.05), 0.05);
    }

    proptest! {
        #[test]
        fn prop_brightness_non_increasing(
            initial in 0.1f32..5.0,
            steps in proptest::collection::vec(0.0f32..0.2, 1..60),
        ) {
            let mut life = Lifetime::new(initial);
            let mut last = brightness(&life, 0.05);
            for dt in steps {
                life.age(dt);
                let now = brightness(&life, 0.05);
                prop_assert!(now <= last);
                prop_assert!(now >= 0.05);
                last = now;
            }
        }
    }
}

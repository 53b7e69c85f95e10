//! Sound effects
//!
//! The simulation raises `GameEvent`s; `AudioManager` maps them to sound
//! effects, applies the volume settings and hands them to an `AudioSink`.
//! In the browser the sink synthesizes each effect with Web Audio
//! oscillators, so no asset files are needed.

use crate::settings::AudioSettings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fires
    LaserShot,
    /// Enemy fires
    EnemyLaser,
    /// Any bullet hit
    Hit,
}

impl SoundEffect {
    /// Per-effect mix level
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::LaserShot => 0.1,
            SoundEffect::EnemyLaser => 0.5,
            SoundEffect::Hit => 0.4,
        }
    }

    pub fn for_event(event: &GameEvent) -> SoundEffect {
        match event {
            GameEvent::PlayerFired => SoundEffect::LaserShot,
            GameEvent::EnemyFired { .. } => SoundEffect::EnemyLaser,
            GameEvent::PlayerHit { .. } | GameEvent::EnemyHit { .. } => SoundEffect::Hit,
        }
    }
}

/// Fire-and-forget playback target
pub trait AudioSink {
    /// Start `effect` at `volume` (0-1) without waiting for it
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("sfx {:?} at {:.2}", effect, volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, settings: &AudioSettings) -> Self {
        Self {
            sink,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the sound for each event of a tick, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioSink;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};

    /// Oscillator-synthesized effects through a Web Audio context
    pub struct WebAudioSink {
        ctx: Option<AudioContext>,
    }

    impl Default for WebAudioSink {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudioSink {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Player laser - quick falling zap
        fn play_laser(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 1800.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.08)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(300.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Enemy laser - lower, longer sweep
        fn play_enemy_laser(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, 900.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.15)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(150.0, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }

        /// Hit - noisy crunch over a bass thump
        fn play_hit(ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = Self::create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.6, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.001, t + 0.2)
                    .ok();
                osc.frequency().set_value_at_time(120.0, t).ok();
                osc.frequency().set_value_at_time(2400.0, t + 0.01).ok();
                osc.frequency().set_value_at_time(90.0, t + 0.03).ok();
                osc.frequency().set_value_at_time(1800.0, t + 0.05).ok();
                osc.frequency().set_value_at_time(60.0, t + 0.08).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.22).ok();
            }

            if let Some((osc, gain)) = Self::create_osc(ctx, 70.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.001, t + 0.15)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.18).ok();
            }
        }
    }

    impl AudioSink for WebAudioSink {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            let Some(ctx) = &self.ctx else { return };

            // Browsers start the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::LaserShot => Self::play_laser(ctx, volume),
                SoundEffect::EnemyLaser => Self::play_enemy_laser(ctx, volume),
                SoundEffect::Hit => Self::play_hit(ctx, volume),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        played: Vec<(SoundEffect, f32)>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.played.push((effect, volume));
        }
    }

    fn manager_with(master_volume: f32, sfx_volume: f32, muted: bool) -> AudioManager<Recorder> {
        let settings = AudioSettings {
            master_volume,
            sfx_volume,
            muted,
        };
        AudioManager::new(Recorder::default(), &settings)
    }

    fn manager() -> AudioManager<Recorder> {
        manager_with(1.0, 1.0, false)
    }

    #[test]
    fn test_events_map_to_effects() {
        let mut audio = manager();
        audio.handle_events(&[
            GameEvent::PlayerFired,
            GameEvent::EnemyFired {
                enemy: crate::sim::EntityId(2),
            },
            GameEvent::PlayerHit { at: Vec2::ZERO },
        ]);
        let effects: Vec<_> = audio.sink().played.iter().map(|(e, _)| *e).collect();
        assert_eq!(
            effects,
            vec![SoundEffect::LaserShot, SoundEffect::EnemyLaser, SoundEffect::Hit]
        );
        assert!((audio.sink().played[0].1 - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_volume_scaling_and_mute() {
        // sfx volume above 1 is clamped
        let mut audio = manager_with(0.5, 2.0, false);
        audio.play(SoundEffect::Hit);
        assert!((audio.sink().played[0].1 - 0.2).abs() < 1e-6);

        let mut muted = manager_with(0.5, 1.0, true);
        muted.handle_events(&[GameEvent::PlayerFired, GameEvent::PlayerHit { at: Vec2::ZERO }]);
        assert!(muted.sink().played.is_empty());
    }
}

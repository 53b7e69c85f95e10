//! Game settings and tuning
//!
//! Every gameplay number lives here so a JSON file can rebalance the game
//! without a rebuild. Missing fields fall back to the defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::entity::Rgb;

/// Errors raised while loading settings
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Window and frame loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub width: f32,
    pub height: f32,
    /// Frame rate cap
    pub tick_rate: u32,
    /// Largest delta time one frame may advance
    pub max_frame_dt: f32,
    /// Number of starfield panels laid side by side
    pub backdrop_panels: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,
            max_frame_dt: MAX_FRAME_DT,
            backdrop_panels: BACKDROP_PANELS,
        }
    }
}

/// Player ship handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: f32,
    pub color: Rgb,
    /// Acceleration per active axis (pixels/s²)
    pub accel: f32,
    /// Velocity damping coefficient per second
    pub friction: f32,
    /// Squared speed below which the ship stops dead
    pub stop_threshold_sq: f32,
    pub fire_interval: f32,
    pub thrust_interval: f32,
    pub bullet_speed: f32,
    pub bullet_life: f32,
    pub bullet_color: Rgb,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: PLAYER_SIZE,
            color: Rgb::new(255, 0, 0),
            accel: PLAYER_ACCEL,
            friction: PLAYER_FRICTION,
            stop_threshold_sq: PLAYER_STOP_THRESHOLD_SQ,
            fire_interval: PLAYER_FIRE_INTERVAL,
            thrust_interval: PLAYER_THRUST_INTERVAL,
            bullet_speed: PLAYER_BULLET_SPEED,
            bullet_life: PLAYER_BULLET_LIFE,
            bullet_color: Rgb::new(255, 150, 255),
        }
    }
}

/// Enemy behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub size: f32,
    pub color: Rgb,
    pub start: [f32; 2],
    pub speed: f32,
    pub turn_rate: f32,
    pub fire_interval: f32,
    pub fire_chance: f32,
    /// Engagement range; `null` fires at any distance
    pub range: Option<f32>,
    pub bullet_speed: f32,
    pub bullet_life: f32,
    pub bullet_color: Rgb,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            size: ENEMY_SIZE,
            color: Rgb::new(255, 100, 0),
            start: [ENEMY_START_X, ENEMY_START_Y],
            speed: ENEMY_SPEED,
            turn_rate: ENEMY_TURN_RATE,
            fire_interval: ENEMY_FIRE_INTERVAL,
            fire_chance: ENEMY_FIRE_CHANCE,
            range: Some(ENEMY_RANGE),
            bullet_speed: ENEMY_BULLET_SPEED,
            bullet_life: ENEMY_BULLET_LIFE,
            bullet_color: Rgb::new(0, 255, 0),
        }
    }
}

/// Particles and screen effects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsTuning {
    pub player_hit_particles: u32,
    pub player_hit_color: Rgb,
    pub enemy_hit_particles: u32,
    pub enemy_hit_color: Rgb,
    pub thrust_particles: u32,
    pub thrust_color: Rgb,
    pub min_brightness: f32,
    pub flash_duration: f32,
    /// Reduced motion: no full-screen flash
    pub reduced_motion: bool,
}

impl Default for EffectsTuning {
    fn default() -> Self {
        Self {
            player_hit_particles: PLAYER_HIT_PARTICLES,
            player_hit_color: Rgb::new(0, 255, 150),
            enemy_hit_particles: ENEMY_HIT_PARTICLES,
            enemy_hit_color: Rgb::new(255, 255, 0),
            thrust_particles: THRUST_PARTICLES,
            thrust_color: Rgb::new(0, 255, 255),
            min_brightness: PARTICLE_MIN_BRIGHTNESS,
            flash_duration: FLASH_DURATION,
            reduced_motion: false,
        }
    }
}

/// Sound volumes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; `None` picks one from the clock
    pub seed: Option<u64>,
    pub display: DisplaySettings,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub effects: EffectsTuning,
    pub audio: AudioSettings,
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }
        fn non_negative(field: &'static str, value: f32) -> Result<(), SettingsError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be finite and non-negative, got {value}"),
                })
            }
        }
        fn unit(field: &'static str, value: f32) -> Result<(), SettingsError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be within 0..=1, got {value}"),
                })
            }
        }

        positive("display.width", self.display.width)?;
        positive("display.height", self.display.height)?;
        positive("display.max_frame_dt", self.display.max_frame_dt)?;
        if self.display.tick_rate == 0 {
            return Err(SettingsError::Invalid {
                field: "display.tick_rate",
                reason: "must be at least 1".into(),
            });
        }
        positive("player.size", self.player.size)?;
        positive("player.fire_interval", self.player.fire_interval)?;
        positive("player.thrust_interval", self.player.thrust_interval)?;
        positive("player.bullet_life", self.player.bullet_life)?;
        non_negative("player.accel", self.player.accel)?;
        non_negative("player.friction", self.player.friction)?;
        non_negative("player.stop_threshold_sq", self.player.stop_threshold_sq)?;
        non_negative("player.bullet_speed", self.player.bullet_speed)?;
        // Damping past a full stop in one frame would reverse the ship
        if self.player.friction * self.display.max_frame_dt > 1.0 {
            return Err(SettingsError::Invalid {
                field: "player.friction",
                reason: format!(
                    "friction {} times max_frame_dt {} exceeds 1",
                    self.player.friction, self.display.max_frame_dt
                ),
            });
        }
        positive("enemy.size", self.enemy.size)?;
        positive("enemy.fire_interval", self.enemy.fire_interval)?;
        positive("enemy.bullet_life", self.enemy.bullet_life)?;
        non_negative("enemy.speed", self.enemy.speed)?;
        non_negative("enemy.turn_rate", self.enemy.turn_rate)?;
        non_negative("enemy.bullet_speed", self.enemy.bullet_speed)?;
        if let Some(range) = self.enemy.range {
            positive("enemy.range", range)?;
        }
        unit("enemy.fire_chance", self.enemy.fire_chance)?;
        unit("effects.min_brightness", self.effects.min_brightness)?;
        non_negative("effects.flash_duration", self.effects.flash_duration)?;
        unit("audio.master_volume", self.audio.master_volume)?;
        unit("audio.sfx_volume", self.audio.sfx_volume)?;
        Ok(())
    }

    /// Flash effect enabled (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        !self.effects.reduced_motion
    }
}

//! Star Skirmish - A scrolling starfield arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, lifecycle, camera)
//! - `renderer`: Rectangle batching and the WebGPU pipeline
//! - `platform`: Clock and input collaborators
//! - `audio`: Sound effect sinks
//! - `settings`: Data-driven game tuning
//! - `session`: The per-frame loop shared by the native and web front ends

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{FrameOutcome, Session};
pub use settings::{Settings, SettingsError};

/// Game configuration constants (defaults for `Settings`)
pub mod consts {
    /// Screen size in pixels
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;
    /// Frame rate cap
    pub const TICK_RATE: u32 = 120;
    /// Largest delta time a single frame may advance (stall guard)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player ship
    pub const PLAYER_SIZE: f32 = 12.0;
    pub const PLAYER_ACCEL: f32 = 500.0;
    pub const PLAYER_FRICTION: f32 = 0.95;
    /// Below this squared speed the ship snaps to rest
    pub const PLAYER_STOP_THRESHOLD_SQ: f32 = 1.0;
    pub const PLAYER_FIRE_INTERVAL: f32 = 0.1;
    pub const PLAYER_THRUST_INTERVAL: f32 = 0.05;

    /// Player bullets
    pub const PLAYER_BULLET_SPEED: f32 = 800.0;
    pub const PLAYER_BULLET_LIFE: f32 = 1.3;

    /// Enemy
    pub const ENEMY_SIZE: f32 = 10.0;
    pub const ENEMY_START_X: f32 = 500.0;
    pub const ENEMY_START_Y: f32 = 50.0;
    pub const ENEMY_SPEED: f32 = 200.0;
    /// Heading change in radians per second (circular path)
    pub const ENEMY_TURN_RATE: f32 = 0.7;
    pub const ENEMY_FIRE_INTERVAL: f32 = 0.1;
    pub const ENEMY_BULLET_SPEED: f32 = 900.0;
    pub const ENEMY_BULLET_LIFE: f32 = 1.0;
    pub const ENEMY_FIRE_CHANCE: f32 = 0.5;
    pub const ENEMY_RANGE: f32 = 1000.0;

    /// Bullets of both sides
    pub const BULLET_SIZE: f32 = 5.0;

    /// Particle bursts
    pub const PLAYER_HIT_PARTICLES: u32 = 30;
    pub const ENEMY_HIT_PARTICLES: u32 = 15;
    pub const THRUST_PARTICLES: u32 = 5;
    /// Faded particles never drop below this fraction of full brightness
    pub const PARTICLE_MIN_BRIGHTNESS: f32 = 0.05;
    pub const FLASH_DURATION: f32 = 0.01;

    /// Backdrop
    pub const BACKDROP_PANELS: u32 = 5;
    pub const BACKDROP_STARS: u32 = 500;
    pub const BACKDROP_BUILDINGS: u32 = 10;
    /// Distance of the horizon line from the bottom of a panel
    pub const HORIZON_OFFSET: f32 = 100.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

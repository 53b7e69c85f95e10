//! Entity record and behavior payloads
//!
//! Every simulated object is one `Entity`. The `Tag` selects the collision
//! and lifecycle rules; the `Behavior` carries the extra state some tags need
//! (fire control for enemies, a life timer for bullets and particles).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Stable entity identifier, never reused within a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Classification used to pick collision/lifecycle rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    Player,
    Enemy,
    PlayerBullet,
    EnemyBullet,
    Particle,
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same hue and saturation, HSV value set to `value` (0-1)
    pub fn with_value(self, value: f32) -> Rgb {
        let max = self.r.max(self.g).max(self.b);
        if max == 0 {
            return self;
        }
        let scale = value.clamp(0.0, 1.0) * 255.0 / max as f32;
        let channel = |c: u8| (c as f32 * scale).round().clamp(0.0, 255.0) as u8;
        Rgb::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Linear 0-1 RGBA for vertex colors
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

/// Remaining/initial life of a bullet or particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining: f32,
    pub initial: f32,
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds,
            initial: seconds,
        }
    }

    pub fn age(&mut self, dt: f32) {
        self.remaining -= dt;
    }

    /// Eligible for removal once life drops below zero
    pub fn expired(&self) -> bool {
        self.remaining < 0.0
    }

    /// Fraction of life left (may go negative after expiry)
    pub fn ratio(&self) -> f32 {
        if self.initial > 0.0 {
            self.remaining / self.initial
        } else {
            0.0
        }
    }
}

/// Timed firing at a target entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireControl {
    pub target: Option<EntityId>,
    /// Seconds between shot opportunities
    pub interval: f32,
    /// Accumulated time since the last opportunity
    pub timer: f32,
    /// Bullet speed in pixels/s
    pub speed: f32,
    /// Target must be within this distance; `None` means unlimited
    pub range: Option<f32>,
    /// Probability that an opportunity actually fires
    pub chance: f32,
    /// Bullet life in seconds
    pub bullet_life: f32,
    pub bullet_color: Rgb,
}

/// Enemy state: fire control plus scripted circular motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub fire: FireControl,
    /// Heading angle in [0, 2π)
    pub heading: f32,
    /// Heading change in radians per second
    pub turn_rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Inert,
    Enemy(EnemyBrain),
    Timed(Lifetime),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub tag: Tag,
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Color as drawn this frame
    pub color: Rgb,
    /// Color at spawn (particles fade from this)
    pub base_color: Rgb,
    pub bbox: Aabb,
    pub behavior: Behavior,
}

impl Entity {
    pub fn new(id: EntityId, tag: Tag, pos: Vec2, size: f32, color: Rgb) -> Self {
        Self {
            id,
            tag,
            pos,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            color,
            base_color: color,
            bbox: Aabb::square(pos, size),
            behavior: Behavior::Inert,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Semi-implicit Euler step: velocity first, then position
    pub fn integrate(&mut self, dt: f32) {
        self.vel += self.accel * dt;
        self.pos += self.vel * dt;
        self.bbox.recenter(self.pos);
    }

    /// Count down the life timer, if this entity has one
    pub fn age(&mut self, dt: f32) {
        if let Behavior::Timed(life) = &mut self.behavior {
            life.age(dt);
        }
    }

    pub fn lifetime(&self) -> Option<&Lifetime> {
        match &self.behavior {
            Behavior::Timed(life) => Some(life),
            _ => None,
        }
    }

    pub fn brain(&self) -> Option<&EnemyBrain> {
        match &self.behavior {
            Behavior::Enemy(brain) => Some(brain),
            _ => None,
        }
    }

    pub fn brain_mut(&mut self) -> Option<&mut EnemyBrain> {
        match &mut self.behavior {
            Behavior::Enemy(brain) => Some(brain),
            _ => None,
        }
    }

    /// Timed entity whose life has run out
    pub fn expired(&self) -> bool {
        self.lifetime().is_some_and(Lifetime::expired)
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Time only enters through the `dt` passed to `tick`
//! - Randomness only through a `RandomSource`
//! - Stable iteration order (insertion order of the entity list)
//! - No rendering or platform dependencies

pub mod background;
pub mod camera;
pub mod collision;
pub mod entity;
pub mod particles;
pub mod rng;
pub mod state;
pub mod tick;
pub mod vector;

pub use background::Backdrop;
pub use camera::Camera;
pub use collision::Aabb;
pub use entity::{Behavior, EnemyBrain, Entity, EntityId, FireControl, Lifetime, Rgb, Tag};
pub use particles::{BurstSpec, spawn_burst};
pub use rng::{RandomSource, ScriptedRng, SimRng};
pub use state::{Flash, GameEvent, Stats, World};
pub use tick::{TickInput, TickReport, tick};
pub use vector::Vec2Ext;

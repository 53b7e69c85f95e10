//! Snap-follow camera
//!
//! The viewport is a screen-sized rectangle in world space. Each tick it is
//! recentered on its target with no smoothing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::EntityId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// World position of the viewport's top-left corner
    pub offset: Vec2,
    /// Entity to follow (non-owning)
    pub target: Option<EntityId>,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            offset: Vec2::ZERO,
            target: None,
        }
    }

    /// World position of the viewport center
    pub fn center(&self) -> Vec2 {
        self.offset + self.viewport * 0.5
    }

    pub fn center_on(&mut self, pos: Vec2) {
        self.offset = pos - self.viewport * 0.5;
    }

    /// Recenter on the target's position; `locate` resolves the target id.
    /// A missing target leaves the viewport where it is.
    pub fn update(&mut self, locate: impl Fn(EntityId) -> Option<Vec2>) {
        if let Some(pos) = self.target.and_then(locate) {
            self.center_on(pos);
        }
    }

    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    #[inline]
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.offset
    }
}

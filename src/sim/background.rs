//! Procedural starfield backdrop
//!
//! A row of screen-sized panels, each with scattered stars above a horizon
//! line and a skyline of gray buildings standing on it. Generated once per
//! run from the run RNG; purely decorative.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::entity::Rgb;
use super::rng::RandomSource;
use crate::consts::{BACKDROP_BUILDINGS, BACKDROP_STARS, HORIZON_OFFSET};

pub const GROUND_COLOR: Rgb = Rgb::new(210, 180, 140);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Position within the panel
    pub pos: Vec2,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Rectangle within the panel
    pub rect: Aabb,
    pub color: Rgb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panel {
    pub stars: Vec<Star>,
    pub buildings: Vec<Building>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backdrop {
    /// Panel size (one screen)
    pub panel_size: Vec2,
    /// Y coordinate of the horizon line within a panel
    pub horizon: f32,
    pub panels: Vec<Panel>,
}

impl Backdrop {
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R, panel_size: Vec2, panels: u32) -> Self {
        let horizon = (panel_size.y - HORIZON_OFFSET).max(0.0);
        let width = panel_size.x.max(1.0) as u32;

        let panels: Vec<Panel> = (0..panels)
            .map(|_| {
                let stars = (0..BACKDROP_STARS)
                    .map(|_| {
                        let color = Rgb::new(
                            rng.range_u32(50, 255) as u8,
                            rng.range_u32(50, 255) as u8,
                            rng.range_u32(50, 255) as u8,
                        );
                        let x = rng.range_u32(0, width) as f32;
                        let y = rng.range_u32(0, horizon as u32) as f32;
                        Star { pos: Vec2::new(x, y), color }
                    })
                    .collect();

                let buildings = (0..BACKDROP_BUILDINGS)
                    .map(|_| {
                        let shade = rng.range_u32(40, 200) as u8;
                        let size = Vec2::new(
                            rng.range_u32(20, 50) as f32,
                            rng.range_u32(10, 150) as f32,
                        );
                        let left = rng.range_u32(0, width) as f32;
                        // Sits on the horizon
                        let center = Vec2::new(left + size.x * 0.5, horizon - size.y * 0.5);
                        Building {
                            rect: Aabb::new(center, size),
                            color: Rgb::new(shade, shade, shade),
                        }
                    })
                    .collect();

                Panel { stars, buildings }
            })
            .collect();

        log::debug!("Generated {} backdrop panels", panels.len());
        Self {
            panel_size,
            horizon,
            panels,
        }
    }

    /// Screen-space origin of panel `index` for a camera offset
    pub fn panel_origin(&self, index: usize, camera_offset: Vec2) -> Vec2 {
        Vec2::new(index as f32 * self.panel_size.x, 0.0) - camera_offset
    }
}

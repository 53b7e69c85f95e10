//! Frame composition
//!
//! Draw order: backdrop panels, then the hit flash, then entities in list
//! order, so ships stay visible through the flash. World positions become screen positions by
//! subtracting the camera offset; rectangles fully outside the viewport are
//! skipped.

use glam::Vec2;

use super::Renderer;
use crate::sim::background::GROUND_COLOR;
use crate::sim::{Aabb, Backdrop, Rgb, World};

/// Clear color behind everything
pub const BACKGROUND: Rgb = Rgb::BLACK;
/// Size of a drawn star
const STAR_SIZE: f32 = 1.0;
/// Thickness of the horizon line
const HORIZON_THICKNESS: f32 = 1.0;

/// Issue every rectangle for the current frame. Does not present.
pub fn draw_frame(renderer: &mut dyn Renderer, world: &World, backdrop: &Backdrop) {
    let screen = Aabb::from_top_left(Vec2::ZERO, world.camera.viewport);
    let mut draw = |rect: Aabb, color: Rgb| {
        if rect.overlaps(&screen) {
            renderer.draw_rect(rect, color);
        }
    };

    draw_backdrop(&mut draw, &screen, world, backdrop);

    if world.flash.visible {
        draw(screen, Rgb::WHITE);
    }

    for entity in &world.entities {
        let rect = Aabb {
            center: world.camera.to_screen(entity.bbox.center),
            ..entity.bbox
        };
        draw(rect, entity.color);
    }
}

fn draw_backdrop(
    draw: &mut impl FnMut(Aabb, Rgb),
    screen: &Aabb,
    world: &World,
    backdrop: &Backdrop,
) {
    for (index, panel) in backdrop.panels.iter().enumerate() {
        let origin = backdrop.panel_origin(index, world.camera.offset);
        let panel_rect = Aabb::from_top_left(origin, backdrop.panel_size);
        if !panel_rect.overlaps(screen) {
            continue;
        }

        for star in &panel.stars {
            draw(
                Aabb::from_top_left(origin + star.pos, Vec2::splat(STAR_SIZE)),
                star.color,
            );
        }
        draw(
            Aabb::from_top_left(
                origin + Vec2::new(0.0, backdrop.horizon),
                Vec2::new(backdrop.panel_size.x, HORIZON_THICKNESS),
            ),
            GROUND_COLOR,
        );
        for building in &panel.buildings {
            draw(building.rect.translated(origin), building.color);
        }
    }
}

/// Clear, draw and present one frame
pub fn render_frame(
    renderer: &mut dyn Renderer,
    world: &World,
    backdrop: &Backdrop,
) -> Result<(), super::RenderError> {
    renderer.clear(BACKGROUND);
    draw_frame(renderer, world, backdrop);
    renderer.present()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RectBatch;
    use crate::settings::Settings;
    use crate::sim::SimRng;

    fn empty_backdrop(size: Vec2) -> Backdrop {
        Backdrop {
            panel_size: size,
            horizon: size.y - 100.0,
            panels: Vec::new(),
        }
    }

    #[test]
    fn test_entities_drawn_camera_relative() {
        let settings = Settings::default();
        let mut world = World::new(&settings);
        world.camera.offset = Vec2::new(100.0, 50.0);
        let backdrop = empty_backdrop(world.camera.viewport);

        let mut batch = RectBatch::new();
        render_frame(&mut batch, &world, &backdrop).expect("present");

        // Player at (600, 350), 12px: top-left (594, 344) minus the offset
        let player_verts = &batch.vertices()[0..6];
        assert_eq!(player_verts[0].position, [494.0, 294.0]);
        assert_eq!(batch.clear_color(), Some(BACKGROUND));
        assert_eq!(batch.last_frame_rects(), 2);
    }

    #[test]
    fn test_offscreen_entities_are_culled() {
        let settings = Settings::default();
        let mut world = World::new(&settings);
        world.camera.offset = Vec2::new(10_000.0, 0.0);
        let backdrop = empty_backdrop(world.camera.viewport);

        let mut batch = RectBatch::new();
        render_frame(&mut batch, &world, &backdrop).expect("present");
        assert_eq!(batch.last_frame_rects(), 0);
    }

    #[test]
    fn test_flash_drawn_under_entities() {
        let settings = Settings::default();
        let mut world = World::new(&settings);
        world.flash.visible = true;
        let backdrop = empty_backdrop(world.camera.viewport);

        let mut batch = RectBatch::new();
        render_frame(&mut batch, &world, &backdrop).expect("present");
        assert_eq!(batch.last_frame_rects(), 3);

        let verts = batch.vertices();
        let flash = &verts[0..6];
        assert!(flash.iter().all(|v| v.color == [1.0; 4]));
        assert_eq!(flash[0].position, [0.0, 0.0]);

        // Player then enemy, both on top of the flash
        let player = &verts[6..12];
        assert_eq!(player[0].position, [594.0, 344.0]);
        let enemy = &verts[verts.len() - 6..];
        assert!(enemy.iter().all(|v| v.color != [1.0; 4]));
    }

    #[test]
    fn test_only_visible_panels_are_drawn() {
        let settings = Settings::default();
        let world = World::new(&settings);
        let mut rng = SimRng::new(11);
        let backdrop = Backdrop::generate(&mut rng, world.camera.viewport, 5);

        let mut batch = RectBatch::new();
        render_frame(&mut batch, &world, &backdrop).expect("present");
        // Panel 0 fills the view; panel 1 only touches the right edge
        assert!(batch.last_frame_rects() >= 500 + 1 + 10 + 2);
        assert!(batch.last_frame_rects() < 2 * (500 + 1 + 10) + 2);
    }
}

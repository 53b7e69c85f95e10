//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Two counter-clockwise triangles covering an axis-aligned rectangle
pub fn rect(top_left: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (top_left.x, top_left.y);
    let (x1, y1) = (x0 + size.x, y0 + size.y);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y1, color),
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y1, color),
        Vertex::new(x1, y0, color),
    ]
}

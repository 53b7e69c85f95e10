//! CPU-side rectangle batch
//!
//! Collects a frame's rectangles as triangle vertices in pixel space. The
//! native runner presents into it headlessly; `GpuRenderer` hands the
//! vertices to wgpu.

use super::shapes;
use super::vertex::Vertex;
use super::{RenderError, Renderer};
use crate::sim::{Aabb, Rgb};

#[derive(Debug, Clone, Default)]
pub struct RectBatch {
    clear_color: Option<Rgb>,
    vertices: Vec<Vertex>,
    rects: usize,
    frames: u64,
    /// Rectangles in the most recently presented frame
    last_frame_rects: usize,
}

impl RectBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn clear_color(&self) -> Option<Rgb> {
        self.clear_color
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn last_frame_rects(&self) -> usize {
        self.last_frame_rects
    }
}

impl Renderer for RectBatch {
    fn clear(&mut self, color: Rgb) {
        self.clear_color = Some(color);
        self.vertices.clear();
        self.rects = 0;
    }

    fn draw_rect(&mut self, rect: Aabb, color: Rgb) {
        self.vertices
            .extend_from_slice(&shapes::rect(rect.min(), rect.size(), color.to_rgba()));
        self.rects += 1;
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.frames += 1;
        self.last_frame_rects = self.rects;
        Ok(())
    }
}

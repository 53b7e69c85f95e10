//! Rendering module
//!
//! The game draws nothing but filled rectangles. `scene::draw_frame` walks
//! the world and issues them through the `Renderer` trait; `RectBatch`
//! collects them as triangles and `GpuRenderer` uploads the batch to wgpu.

pub mod batch;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use batch::RectBatch;
pub use pipeline::{GpuRenderer, RenderState};
pub use scene::{draw_frame, render_frame};
pub use vertex::Vertex;

use crate::sim::{Aabb, Rgb};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Draw target for one frame
pub trait Renderer {
    /// Start a new frame filled with `color`
    fn clear(&mut self, color: Rgb);
    /// Filled rectangle in screen pixels (origin top-left, y down)
    fn draw_rect(&mut self, rect: Aabb, color: Rgb);
    /// Show the frame
    fn present(&mut self) -> Result<(), RenderError>;
}

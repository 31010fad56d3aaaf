//! The `Backend` trait implemented by GPU renderers.

use crate::buffer::{DrawBuffer, GradientDrawBuffer, TextDrawBuffer, TexturedDrawBuffer};
use crate::error::BackendError;
use glam::Vec2;

/// Per-frame information handed to [`Backend::start_frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub frame: u64,
    pub worker_count: usize,
    pub display_position: Vec2,
    pub display_size: Vec2,
    pub framebuffer_scale: f32,
}

/// Receiver of finalized draw buffers.
///
/// The lifecycle is `initialize`, then per frame `start_frame`, zero or more `draw_*` calls
/// in draw-order, and `end_frame`; finally `terminate`. Every `draw_*` call receives one
/// non-empty buffer and is expected to issue exactly one batched draw call. Buffers are only
/// borrowed for the duration of the call and are cleared when the frame ends.
pub trait Backend {
    /// Create GPU resources. Failure is fatal and is surfaced before any frame begins.
    fn initialize(&mut self) -> Result<(), BackendError>;

    fn terminate(&mut self);

    /// Reset per-frame GPU state (blend/cull/depth) and the viewport/projection.
    fn start_frame(&mut self, info: &FrameInfo);

    /// Vertex-colored geometry.
    fn draw_plain(&mut self, buffer: &DrawBuffer);

    /// Geometry shaded by the buffer's gradient key.
    fn draw_gradient(&mut self, buffer: &GradientDrawBuffer);

    /// Geometry sampling the buffer's texture.
    fn draw_textured(&mut self, buffer: &TexturedDrawBuffer);

    /// Glyph quads sampling the buffer's atlas.
    fn draw_text(&mut self, buffer: &TextDrawBuffer);

    /// Restore any GPU state saved in `start_frame`.
    fn end_frame(&mut self);
}

//! Mock implementation of `Backend` for testing.
//!
//! This module provides a backend that records lifecycle calls and copies of the submitted
//! buffers instead of issuing GPU draw calls.

use astrelis_vg::{
    Backend, BackendError, DrawBuffer, FrameInfo, GradientDrawBuffer, GradientKey, TextDrawBuffer,
    TextKey, TextureKey, TexturedDrawBuffer, Vertex,
};
use parking_lot::Mutex;

/// Kind of buffer a draw call was issued for, with its render-state key.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawKind {
    Plain,
    Gradient(GradientKey),
    Textured(TextureKey),
    Text(TextKey),
}

/// Copy of one submitted buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnBuffer {
    pub kind: DrawKind,
    pub draw_order: i32,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl DrawnBuffer {
    fn copy(kind: DrawKind, buffer: &DrawBuffer) -> Self {
        Self {
            kind,
            draw_order: buffer.draw_order(),
            vertices: buffer.vertices().to_vec(),
            indices: buffer.indices().to_vec(),
        }
    }
}

/// Records a backend call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Initialize,
    Terminate,
    StartFrame(FrameInfo),
    Draw(DrawnBuffer),
    EndFrame,
}

/// Mock implementation of [`Backend`] for testing.
///
/// # Example
///
/// ```rust
/// use astrelis_test_utils::{BackendCall, MockBackend};
/// use astrelis_vg::{Config, VectorRenderer};
///
/// let mut renderer = VectorRenderer::new(MockBackend::new(), Config::default());
/// renderer.initialize().unwrap();
///
/// assert_eq!(renderer.backend().calls(), vec![BackendCall::Initialize]);
/// ```
pub struct MockBackend {
    /// Recorded calls for verification
    calls: Mutex<Vec<BackendCall>>,

    /// Error returned by `initialize`, if any
    init_error: Option<BackendError>,
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            init_error: None,
        }
    }

    /// A backend whose `initialize` fails with `error`.
    pub fn failing(error: BackendError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            init_error: Some(error),
        }
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().clone()
    }

    /// Every submitted buffer, in submission order.
    pub fn draws(&self) -> Vec<DrawnBuffer> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                BackendCall::Draw(drawn) => Some(drawn.clone()),
                _ => None,
            })
            .collect()
    }

    /// Draw order of every submitted buffer, in submission order.
    pub fn draw_orders(&self) -> Vec<i32> {
        self.draws().iter().map(|drawn| drawn.draw_order).collect()
    }

    /// Count frame starts.
    pub fn count_frames(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, BackendCall::StartFrame(_)))
            .count()
    }

    /// Clear recorded calls (useful between frames).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().push(call);
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MockBackend {
    fn initialize(&mut self) -> Result<(), BackendError> {
        self.record(BackendCall::Initialize);
        match &self.init_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn terminate(&mut self) {
        self.record(BackendCall::Terminate);
    }

    fn start_frame(&mut self, info: &FrameInfo) {
        self.record(BackendCall::StartFrame(*info));
    }

    fn draw_plain(&mut self, buffer: &DrawBuffer) {
        self.record(BackendCall::Draw(DrawnBuffer::copy(DrawKind::Plain, buffer)));
    }

    fn draw_gradient(&mut self, buffer: &GradientDrawBuffer) {
        self.record(BackendCall::Draw(DrawnBuffer::copy(
            DrawKind::Gradient(buffer.key),
            &buffer.buffer,
        )));
    }

    fn draw_textured(&mut self, buffer: &TexturedDrawBuffer) {
        self.record(BackendCall::Draw(DrawnBuffer::copy(
            DrawKind::Textured(buffer.key),
            &buffer.buffer,
        )));
    }

    fn draw_text(&mut self, buffer: &TextDrawBuffer) {
        self.record(BackendCall::Draw(DrawnBuffer::copy(
            DrawKind::Text(buffer.key),
            &buffer.buffer,
        )));
    }

    fn end_frame(&mut self) {
        self.record(BackendCall::EndFrame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_records_lifecycle() {
        let mut mock = MockBackend::new();
        mock.initialize().unwrap();
        mock.start_frame(&FrameInfo {
            frame: 0,
            worker_count: 1,
            display_position: Vec2::ZERO,
            display_size: Vec2::new(800.0, 600.0),
            framebuffer_scale: 1.0,
        });
        mock.end_frame();
        mock.terminate();

        assert_eq!(mock.call_count(), 4);
        assert_eq!(mock.count_frames(), 1);
        assert_eq!(mock.calls().last(), Some(&BackendCall::Terminate));
    }

    #[test]
    fn test_failing_initialize() {
        let mut mock = MockBackend::failing(BackendError::InitializationFailed("lost".into()));

        assert_eq!(
            mock.initialize(),
            Err(BackendError::InitializationFailed("lost".into()))
        );
    }

    #[test]
    fn test_clear_calls() {
        let mut mock = MockBackend::new();
        mock.draw_plain(&DrawBuffer::new(3));

        assert_eq!(mock.draw_orders(), vec![3]);

        mock.clear_calls();
        assert_eq!(mock.call_count(), 0);
    }
}

//! Renderer configuration.

use crate::error::ConfigError;
use glam::Vec2;
use std::fmt;
use std::sync::Arc;

/// Callback receiving configuration diagnostics.
pub type DiagnosticCallback = Arc<dyn Fn(&ConfigError) + Send + Sync>;

/// How consecutive line segments are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JointMode {
    /// Segments are emitted independently.
    None,
    /// Shared boundary vertices are moved to their average.
    VertexAverage,
    /// The inner side is snapped and one triangle fills the outer wedge.
    #[default]
    Bevel,
    /// Both sides meet at the offset-edge intersection, bevelled past the miter limit.
    Miter,
}

/// Direction in which [`BatchStore::render`](crate::BatchStore::render) walks draw orders.
///
/// This is the contract with the backend: with `Ascending`, lower draw orders are submitted
/// first and end up underneath higher ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawOrderTraversal {
    #[default]
    Ascending,
    Descending,
}

/// Feathering (anti-aliasing) settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AaConfig {
    /// Global switch; styles must also request `aa`.
    pub enabled: bool,
    /// Width of the fading ring in logical pixels.
    pub distance: f32,
}

impl Default for AaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            distance: 1.0,
        }
    }
}

/// Configuration shared by the frame controller and every drawer.
#[derive(Clone)]
pub struct Config {
    pub display_position: Vec2,
    pub display_size: Vec2,
    /// Physical pixels per logical pixel.
    pub framebuffer_scale: f32,
    /// Frames between releases of pooled buffer capacity. `0` disables pooling.
    pub gc_interval: u32,
    /// Vertex capacity reserved for newly created buffers.
    pub buffer_reserve: usize,
    /// Angular step in degrees used when sampling arcs.
    pub arc_resolution: f32,
    /// Perimeter segments used by circles when the caller gives none.
    pub circle_segments: u32,
    /// Segments per rounded corner.
    pub rounding_segments: u32,
    pub joint_mode: JointMode,
    /// Miter length limit, in multiples of the half thickness.
    pub miter_limit: f32,
    pub aa: AaConfig,
    pub traversal: DrawOrderTraversal,
    pub diagnostics: Option<DiagnosticCallback>,
}

impl Config {
    /// Minimum segment count for Bézier curves.
    pub const MIN_BEZIER_SEGMENTS: u32 = 5;
    /// Finest arc step in degrees. A half arc never has more than 1800 pieces.
    pub const MIN_ARC_RESOLUTION: f32 = 0.1;

    pub fn with_display(mut self, position: Vec2, size: Vec2) -> Self {
        self.display_position = position;
        self.display_size = size;
        self
    }

    pub fn with_framebuffer_scale(mut self, scale: f32) -> Self {
        self.framebuffer_scale = scale;
        self
    }

    pub fn with_gc_interval(mut self, frames: u32) -> Self {
        self.gc_interval = frames;
        self
    }

    pub fn with_arc_resolution(mut self, degrees: f32) -> Self {
        self.arc_resolution = degrees.max(Self::MIN_ARC_RESOLUTION);
        self
    }

    pub fn with_joint_mode(mut self, mode: JointMode) -> Self {
        self.joint_mode = mode;
        self
    }

    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        self.miter_limit = limit.max(1.0);
        self
    }

    pub fn with_aa(mut self, distance: f32) -> Self {
        self.aa = AaConfig {
            enabled: true,
            distance,
        };
        self
    }

    pub fn with_traversal(mut self, traversal: DrawOrderTraversal) -> Self {
        self.traversal = traversal;
        self
    }

    pub fn with_rounding_segments(mut self, segments: u32) -> Self {
        self.rounding_segments = segments.max(1);
        self
    }

    pub fn with_diagnostics(mut self, callback: impl Fn(&ConfigError) + Send + Sync + 'static) -> Self {
        self.diagnostics = Some(Arc::new(callback));
        self
    }

    /// Feather ring width in physical pixels.
    pub fn feather_distance(&self) -> f32 {
        self.aa.distance * self.framebuffer_scale
    }

    /// Report a configuration problem to the log and the diagnostics callback.
    pub fn report(&self, error: ConfigError) {
        tracing::warn!("{}", error);
        if let Some(callback) = &self.diagnostics {
            callback(&error);
        }
    }

    /// Worker count that leaves one core for the submitting thread.
    pub fn default_worker_count() -> usize {
        num_cpus::get().saturating_sub(1).max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_position: Vec2::ZERO,
            display_size: Vec2::new(1920.0, 1080.0),
            framebuffer_scale: 1.0,
            gc_interval: 600,
            buffer_reserve: 64,
            arc_resolution: 1.0,
            circle_segments: 36,
            rounding_segments: 8,
            joint_mode: JointMode::default(),
            miter_limit: 4.0,
            aa: AaConfig::default(),
            traversal: DrawOrderTraversal::default(),
            diagnostics: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("display_position", &self.display_position)
            .field("display_size", &self.display_size)
            .field("framebuffer_scale", &self.framebuffer_scale)
            .field("gc_interval", &self.gc_interval)
            .field("buffer_reserve", &self.buffer_reserve)
            .field("arc_resolution", &self.arc_resolution)
            .field("circle_segments", &self.circle_segments)
            .field("rounding_segments", &self.rounding_segments)
            .field("joint_mode", &self.joint_mode)
            .field("miter_limit", &self.miter_limit)
            .field("aa", &self.aa)
            .field("traversal", &self.traversal)
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

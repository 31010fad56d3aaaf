//! Tessellation of draw requests into batched vertex/index geometry.
//!
//! A [`Drawer`] is the per-worker emitter. It owns a [`BatchStore`], picks the target buffer
//! for every request from its style, and tracks line-joint continuity between consecutive
//! segments. Nothing is validated geometrically: zero-length segments or degenerate polygons
//! produce NaN or collapsed triangles.

mod line;
mod shape;
mod text;

pub use line::{sample_arc, sample_bezier_points};

use crate::batch::BatchStore;
use crate::buffer::{BufferTarget, GradientKey, TextureKey};
use crate::config::{Config, JointMode};
use crate::style::{ColorGradient, StyleOptions, TextureBinding};
use glam::Vec2;
use std::sync::Arc;

/// Where the previous segment ended, for joining the next one onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct JointAnchor {
    pub draw_order: i32,
    pub target: BufferTarget,
    pub end_point: Vec2,
    pub direction: Vec2,
    /// Buffer index of the previous upper-end vertex.
    pub upper: u32,
    /// Buffer index of the previous lower-end vertex.
    pub lower: u32,
    /// Buffer indices of the previous upper and lower feather-end vertices.
    pub feather: Option<(u32, u32)>,
}

impl JointAnchor {
    /// Whether every vertex the anchor refers to still exists in a buffer of `len` vertices.
    pub fn fits(&self, len: u32) -> bool {
        let last = match self.feather {
            Some((upper, lower)) => upper.max(lower),
            None => self.upper.max(self.lower),
        };
        last < len
    }
}

/// Per-worker tessellator.
///
/// ```
/// use astrelis_vg::{Color, Config, Drawer, StyleOptions};
/// use glam::Vec2;
/// use std::sync::Arc;
///
/// let mut drawer = Drawer::new(Arc::new(Config::default()));
/// drawer.draw_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), &StyleOptions::fill(Color::RED), 0.0, 0);
/// assert_eq!(drawer.store().vertex_count(), 4);
/// ```
#[derive(Debug)]
pub struct Drawer {
    config: Arc<Config>,
    store: BatchStore,
    joint_mode: JointMode,
    joint: Option<JointAnchor>,
    worker: usize,
}

impl Drawer {
    pub fn new(config: Arc<Config>) -> Self {
        Self::for_worker(config, 0)
    }

    pub(crate) fn for_worker(config: Arc<Config>, worker: usize) -> Self {
        Self {
            store: BatchStore::new(&config),
            joint_mode: config.joint_mode,
            joint: None,
            worker,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Index of the worker this drawer belongs to.
    pub fn worker(&self) -> usize {
        self.worker
    }

    pub fn store(&self) -> &BatchStore {
        &self.store
    }

    pub fn joint_mode(&self) -> JointMode {
        self.joint_mode
    }

    /// Override the configured joint mode for subsequent lines. Resets joint continuity.
    pub fn set_joint_mode(&mut self, mode: JointMode) {
        self.joint_mode = mode;
        self.joint = None;
    }

    /// Forget the previous segment so the next line starts unjoined.
    pub fn reset_joints(&mut self) {
        self.joint = None;
    }

    /// Start a frame with no joint and no live buffers.
    pub(crate) fn begin_frame(&mut self) {
        self.joint = None;
        let leftover = self.store.buffer_count();
        if leftover > 0 {
            tracing::warn!(
                "Worker {} discarded {} buffers drawn outside a frame",
                self.worker,
                leftover
            );
            self.store.discard();
        }
    }

    /// Clear this worker's buffers at the end of a frame.
    pub fn end_frame(&mut self) {
        self.joint = None;
        self.store.end_frame();
    }

    /// Whether a style asks for feathering and the configuration allows it.
    fn feather(&self, aa: bool) -> Option<f32> {
        (aa && self.config.aa.enabled).then(|| self.config.feather_distance())
    }
}

/// Buffer for lines: vertex colors carry the gradient, so only a texture changes the target.
fn line_target(style: &StyleOptions) -> BufferTarget {
    match style.texture {
        Some(texture) => textured(texture, style.aa),
        None => BufferTarget::Plain,
    }
}

/// Buffer for fills: texture first, then non-uniform gradients, otherwise plain.
fn fill_target(color: &ColorGradient, texture: Option<TextureBinding>, aa: bool) -> BufferTarget {
    match texture {
        Some(texture) => textured(texture, aa),
        None if !color.is_uniform() => BufferTarget::Gradient(GradientKey {
            gradient: *color,
            aa,
        }),
        None => BufferTarget::Plain,
    }
}

fn textured(texture: TextureBinding, aa: bool) -> BufferTarget {
    BufferTarget::Textured(TextureKey {
        handle: texture.handle,
        uv_tiling: texture.uv_tiling,
        uv_offset: texture.uv_offset,
        aa,
    })
}

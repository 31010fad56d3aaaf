//! Astrelis VG - Immediate-mode 2D vector graphics
//!
//! This crate provides:
//! - Tessellation of lines, polylines, arcs, Bézier curves, convex shapes and text into
//!   colored vertex/index geometry
//! - Styling: color and thickness gradients, rounding, outlines, drop shadows, textures,
//!   feathered anti-aliasing
//! - Batching into per-draw-order buffers that a GPU backend submits with one call each
//! - A frame lifecycle with optional multi-threaded drawing (one drawer per worker)
//!
//! The GPU side lives behind the [`Backend`] trait; glyph metrics come from a
//! [`GlyphSource`].
//!
//! # Example
//!
//! ```ignore
//! use astrelis_vg::*;
//!
//! let mut renderer = VectorRenderer::new(backend, Config::default());
//! renderer.initialize()?;
//!
//! renderer.start_frame(1)?;
//! if let Some(drawer) = renderer.main_drawer() {
//!     drawer.draw_line(Vec2::ZERO, Vec2::new(100.0, 0.0), &StyleOptions::stroke(Color::RED, 2.0), 0);
//!     drawer.draw_rect(Vec2::ZERO, Vec2::splat(50.0), &StyleOptions::fill(Color::BLUE), 0.0, 1);
//! }
//! renderer.render()?;
//! renderer.end_frame()?;
//! ```

pub mod math;

// Primitives
mod color;
mod style;
mod vertex;

// Configuration and errors
mod config;
mod error;

// Batching
mod batch;
mod buffer;

// Tessellation
mod glyph;
mod tessellator;

// Frame lifecycle
mod backend;
mod frame;

pub use color::*;
pub use style::*;
pub use vertex::*;

pub use config::*;
pub use error::*;

pub use batch::*;
pub use buffer::*;

pub use glyph::*;
pub use tessellator::*;

pub use backend::*;
pub use frame::*;

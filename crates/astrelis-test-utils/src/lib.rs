//! Test utilities for Astrelis VG.
//!
//! This crate provides stand-ins for the two external collaborators of the vector renderer,
//! so tessellation and batching can be tested without a GPU or a font.
//!
//! # Overview
//!
//! - `MockBackend` - [`Backend`](astrelis_vg::Backend) that records every call and a copy
//!   of every submitted buffer (requires `mock` feature)
//! - [`MonospaceGlyphs`] - [`GlyphSource`](astrelis_vg::GlyphSource) with fixed metrics for
//!   printable ASCII
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use astrelis_test_utils::MockBackend;
//! use astrelis_vg::{Color, Config, StyleOptions, VectorRenderer};
//! use glam::Vec2;
//!
//! let mut renderer = VectorRenderer::new(MockBackend::new(), Config::default());
//! renderer.initialize().unwrap();
//! renderer.start_frame(1).unwrap();
//! renderer.main_drawer().unwrap().draw_line(
//!     Vec2::ZERO,
//!     Vec2::new(10.0, 0.0),
//!     &StyleOptions::stroke(Color::RED, 2.0),
//!     0,
//! );
//! renderer.render().unwrap();
//!
//! // Verify what reached the backend
//! assert_eq!(renderer.backend().draws().len(), 1);
//! # }
//! ```
//!
//! # Interior Mutability
//!
//! The mock records through `parking_lot::Mutex`, so its accessors take `&self` and the
//! recorded calls can be read while the renderer still owns the backend.

pub mod glyphs;
#[cfg(feature = "mock")]
pub mod mock_backend;

pub use glyphs::*;
#[cfg(feature = "mock")]
pub use mock_backend::*;

//! Error types.
//!
//! [`ConfigError`] describes a rejected style or configuration value. These are never
//! returned as control flow; the tessellator reports them through
//! [`Config::report`](crate::Config::report) and carries on with a corrected value.
//! [`VgError`] is returned by the frame lifecycle.

use std::fmt;

/// Invalid style or configuration input, reported through the diagnostics callback.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Rounding factor outside `0.0..=1.0`; the value is clamped.
    RoundingOutOfRange(f32),

    /// A corner index in `rounded_corners` does not exist on the shape.
    InvalidCorner { index: usize, corner_count: usize },

    /// Bézier segment count below the minimum; the minimum is used instead.
    TooFewSegments { requested: u32, minimum: u32 },

    /// Custom glyph range whose length is not a power of two.
    NonPowerOfTwoGlyphRange { start: u32, end: u32 },

    /// `start_frame` asked for zero workers; one worker is used.
    InvalidWorkerCount(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::RoundingOutOfRange(value) => {
                write!(f, "Rounding factor {} is outside 0.0..=1.0", value)
            }
            ConfigError::InvalidCorner {
                index,
                corner_count,
            } => write!(
                f,
                "Corner index {} is out of range for a shape with {} corners",
                index, corner_count
            ),
            ConfigError::TooFewSegments { requested, minimum } => write!(
                f,
                "Segment count {} is below the minimum of {}",
                requested, minimum
            ),
            ConfigError::NonPowerOfTwoGlyphRange { start, end } => write!(
                f,
                "Glyph range {:#x}..{:#x} does not span a power-of-two number of glyphs",
                start, end
            ),
            ConfigError::InvalidWorkerCount(count) => {
                write!(f, "Worker count {} is invalid; at least one is required", count)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure reported by a [`Backend`](crate::Backend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Backend could not create its GPU resources.
    InitializationFailed(String),
    /// Any other backend-specific failure.
    Other(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::InitializationFailed(msg) => {
                write!(f, "Backend initialization failed: {}", msg)
            }
            BackendError::Other(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

/// Errors returned by [`VectorRenderer`](crate::VectorRenderer).
#[derive(Debug)]
pub enum VgError {
    Backend(BackendError),

    /// A lifecycle call arrived in the wrong state.
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    /// A worker thread could not be spawned.
    WorkerSpawn(std::io::Error),

    /// A worker thread panicked while drawing.
    WorkerPanicked(usize),
}

impl fmt::Display for VgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VgError::Backend(err) => write!(f, "{}", err),
            VgError::InvalidState { expected, actual } => {
                write!(f, "Invalid renderer state: expected {}, was {}", expected, actual)
            }
            VgError::WorkerSpawn(err) => write!(f, "Failed to spawn draw worker: {}", err),
            VgError::WorkerPanicked(index) => write!(f, "Draw worker {} panicked", index),
        }
    }
}

impl std::error::Error for VgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VgError::Backend(err) => Some(err),
            VgError::WorkerSpawn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BackendError> for VgError {
    fn from(err: BackendError) -> Self {
        VgError::Backend(err)
    }
}

/// Result type for frame lifecycle operations.
pub type VgResult<T> = Result<T, VgError>;

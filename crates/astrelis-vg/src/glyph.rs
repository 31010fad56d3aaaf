//! Interface to the font/glyph subsystem.
//!
//! Font loading and atlas packing live outside this crate. The tessellator only needs
//! per-glyph metrics and the atlas texture the metrics refer to.

use crate::error::ConfigError;
use crate::{Config, TextureHandle};
use glam::Vec2;

/// Font handle issued by the glyph subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontHandle(pub u32);

/// Placement and atlas location of one glyph, in unscaled pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    pub uv_min: Vec2,
    pub uv_max: Vec2,
    pub size: Vec2,
    /// Offset from the pen position to the glyph's top-left corner, y measured upwards.
    pub bearing: Vec2,
    /// Horizontal pen advance.
    pub advance: f32,
}

/// Source of glyph metrics, typically backed by a font atlas.
pub trait GlyphSource {
    fn glyph(&self, font: FontHandle, code: char) -> Option<GlyphMetrics>;

    /// Atlas texture the glyph UVs refer to.
    fn atlas(&self, font: FontHandle) -> TextureHandle;

    fn line_height(&self, font: FontHandle) -> f32;
}

/// Custom code-point range to bake into an atlas, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRange {
    pub start: u32,
    pub end: u32,
}

impl GlyphRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keep the ranges whose length is a power of two; report the rest through `config`.
pub fn validate_glyph_ranges(config: &Config, ranges: &[GlyphRange]) -> Vec<GlyphRange> {
    ranges
        .iter()
        .copied()
        .filter(|range| {
            let ok = range.len().is_power_of_two();
            if !ok {
                config.report(ConfigError::NonPowerOfTwoGlyphRange {
                    start: range.start,
                    end: range.end,
                });
            }
            ok
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_non_power_of_two_ranges_reported() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let config = Config::default().with_diagnostics(move |err| {
            sink.lock().push(err.clone());
        });

        let valid = validate_glyph_ranges(
            &config,
            &[GlyphRange::new(0x20, 0xA0), GlyphRange::new(0x400, 0x4FF)],
        );

        assert_eq!(valid, vec![GlyphRange::new(0x20, 0xA0)]);
        assert_eq!(
            seen.lock().as_slice(),
            &[ConfigError::NonPowerOfTwoGlyphRange {
                start: 0x400,
                end: 0x4FF
            }]
        );
    }
}

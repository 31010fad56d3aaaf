//! Fixed-metric glyph source.

use astrelis_vg::{FontHandle, GlyphMetrics, GlyphSource, TextureHandle};
use glam::Vec2;

/// Glyph source where every printable ASCII character has the same box and advance.
///
/// Glyphs sit on a 16x6 grid in the atlas starting at `'!'`. Space advances without a
/// visible quad; anything outside printable ASCII is unknown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceGlyphs {
    pub atlas: TextureHandle,
    pub glyph_size: Vec2,
    pub advance: f32,
    pub line_height: f32,
}

impl MonospaceGlyphs {
    const COLUMNS: u32 = 16;
    const ROWS: u32 = 6;

    pub fn new() -> Self {
        Self {
            atlas: TextureHandle(0),
            glyph_size: Vec2::new(8.0, 12.0),
            advance: 10.0,
            line_height: 16.0,
        }
    }

    pub fn with_atlas(mut self, atlas: TextureHandle) -> Self {
        self.atlas = atlas;
        self
    }

    /// Atlas rectangle of a printable glyph.
    fn cell(code: char) -> (Vec2, Vec2) {
        let index = code as u32 - '!' as u32;
        let cell = Vec2::new(1.0 / Self::COLUMNS as f32, 1.0 / Self::ROWS as f32);
        let min = Vec2::new(
            (index % Self::COLUMNS) as f32,
            (index / Self::COLUMNS) as f32,
        ) * cell;
        (min, min + cell)
    }
}

impl Default for MonospaceGlyphs {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphSource for MonospaceGlyphs {
    fn glyph(&self, _font: FontHandle, code: char) -> Option<GlyphMetrics> {
        match code {
            ' ' => Some(GlyphMetrics {
                uv_min: Vec2::ZERO,
                uv_max: Vec2::ZERO,
                size: Vec2::ZERO,
                bearing: Vec2::ZERO,
                advance: self.advance,
            }),
            '!'..='~' => {
                let (uv_min, uv_max) = Self::cell(code);
                Some(GlyphMetrics {
                    uv_min,
                    uv_max,
                    size: self.glyph_size,
                    bearing: Vec2::new(0.0, self.glyph_size.y),
                    advance: self.advance,
                })
            }
            _ => None,
        }
    }

    fn atlas(&self, _font: FontHandle) -> TextureHandle {
        self.atlas
    }

    fn line_height(&self, _font: FontHandle) -> f32 {
        self.line_height
    }
}

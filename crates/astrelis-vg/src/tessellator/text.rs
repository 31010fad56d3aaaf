//! Text layout and glyph quad emission.

use super::Drawer;
use super::shape::{Paint, bounds};
use crate::Vertex;
use crate::buffer::TextKey;
use crate::glyph::{FontHandle, GlyphSource};
use crate::style::TextOptions;
use astrelis_core::profiling::profile_function;
use glam::Vec2;

/// Screen rectangle and atlas rectangle of one glyph.
#[derive(Debug, Clone, Copy)]
struct GlyphQuad {
    min: Vec2,
    max: Vec2,
    uv_min: Vec2,
    uv_max: Vec2,
}

#[derive(Debug, Default)]
struct TextLayout {
    quads: Vec<GlyphQuad>,
    size: Vec2,
}

/// Lay out `text` with its first baseline starting at `position`.
fn layout(
    glyphs: &dyn GlyphSource,
    font: FontHandle,
    text: &str,
    position: Vec2,
    options: &TextOptions,
) -> TextLayout {
    let line_advance = glyphs.line_height(font) * options.scale * options.line_spacing;
    let mut quads = Vec::with_capacity(text.len());
    let mut pen = position;
    let mut widest: f32 = 0.0;
    let mut lines = 0usize;

    for line in text.split('\n') {
        lines += 1;
        pen.x = position.x;

        for code in line.chars() {
            let Some(glyph) = glyphs.glyph(font, code) else {
                tracing::trace!("Skipping glyph {:?} missing from font {:?}", code, font);
                continue;
            };

            let size = glyph.size * options.scale;
            if size.x > 0.0 && size.y > 0.0 {
                let min = pen + Vec2::new(glyph.bearing.x, -glyph.bearing.y) * options.scale;
                quads.push(GlyphQuad {
                    min,
                    max: min + size,
                    uv_min: glyph.uv_min,
                    uv_max: glyph.uv_max,
                });
            }
            pen.x += glyph.advance * options.scale + options.letter_spacing;
        }

        widest = widest.max(pen.x - position.x);
        pen.y += line_advance;
    }

    TextLayout {
        quads,
        size: Vec2::new(widest, lines as f32 * line_advance),
    }
}

impl Drawer {
    /// Draw `text` with its first baseline starting at `position`. Returns the laid-out size:
    /// the widest line's advance by the number of lines times the line advance.
    ///
    /// `'\n'` starts a new line. Characters the glyph source does not know are skipped.
    pub fn draw_text(
        &mut self,
        glyphs: &dyn GlyphSource,
        font: FontHandle,
        text: &str,
        position: Vec2,
        options: &TextOptions,
        draw_order: i32,
    ) -> Vec2 {
        profile_function!();
        self.joint = None;

        let layout = layout(glyphs, font, text, position, options);
        if layout.quads.is_empty() {
            return layout.size;
        }

        let corners: Vec<Vec2> = layout
            .quads
            .iter()
            .flat_map(|quad| [quad.min, quad.max])
            .collect();
        let (min, max) = bounds(&corners);
        let paint = Paint::new(options.color, None, &corners, (min + max) * 0.5);

        let key = TextKey {
            atlas: glyphs.atlas(font),
            aa: options.aa,
        };
        let buffer = &mut self.store.text_buffer(draw_order, key).buffer;
        for quad in &layout.quads {
            let bottom_left = Vec2::new(quad.min.x, quad.max.y);
            let top_right = Vec2::new(quad.max.x, quad.min.y);
            buffer.push_quad([
                Vertex::new(
                    bottom_left,
                    Vec2::new(quad.uv_min.x, quad.uv_max.y),
                    paint.color_at(bottom_left),
                ),
                Vertex::new(quad.max, quad.uv_max, paint.color_at(quad.max)),
                Vertex::new(
                    top_right,
                    Vec2::new(quad.uv_max.x, quad.uv_min.y),
                    paint.color_at(top_right),
                ),
                Vertex::new(quad.min, quad.uv_min, paint.color_at(quad.min)),
            ]);
        }

        layout.size
    }

    /// Size [`draw_text`](Self::draw_text) would return, without emitting anything.
    pub fn measure_text(
        &self,
        glyphs: &dyn GlyphSource,
        font: FontHandle,
        text: &str,
        options: &TextOptions,
    ) -> Vec2 {
        layout(glyphs, font, text, Vec2::ZERO, options).size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphMetrics;
    use crate::style::{ColorGradient, GradientKind};
    use crate::{Color, Config, TextureHandle};
    use std::sync::Arc;

    /// Monospace font knowing only ASCII letters and space.
    struct Mono;

    impl GlyphSource for Mono {
        fn glyph(&self, _font: FontHandle, code: char) -> Option<GlyphMetrics> {
            let size = match code {
                ' ' => Vec2::ZERO,
                c if c.is_ascii_alphabetic() => Vec2::new(8.0, 12.0),
                _ => return None,
            };
            Some(GlyphMetrics {
                uv_min: Vec2::new(0.25, 0.5),
                uv_max: Vec2::new(0.5, 0.75),
                size,
                bearing: Vec2::new(1.0, 12.0),
                advance: 10.0,
            })
        }

        fn atlas(&self, _font: FontHandle) -> TextureHandle {
            TextureHandle(42)
        }

        fn line_height(&self, _font: FontHandle) -> f32 {
            16.0
        }
    }

    fn drawer() -> Drawer {
        Drawer::new(Arc::new(Config::default()))
    }

    #[test]
    fn test_glyph_quads() {
        let mut drawer = drawer();
        let size = drawer.draw_text(
            &Mono,
            FontHandle(0),
            "ab",
            Vec2::new(100.0, 50.0),
            &TextOptions::DEFAULT,
            2,
        );

        assert_eq!(size, Vec2::new(20.0, 16.0));

        let text = &drawer.store().text_buffers()[0];
        assert_eq!(text.key.atlas, TextureHandle(42));
        assert_eq!(text.draw_order(), 2);
        assert_eq!(text.buffer.vertex_count(), 8);
        assert_eq!(text.buffer.index_count(), 12);

        // Bottom-left, bottom-right, top-right, top-left of the first glyph.
        let v = text.buffer.vertices();
        assert_eq!(v[0].position, Vec2::new(101.0, 50.0));
        assert_eq!(v[1].position, Vec2::new(109.0, 50.0));
        assert_eq!(v[2].position, Vec2::new(109.0, 38.0));
        assert_eq!(v[3].position, Vec2::new(101.0, 38.0));
        assert_eq!(v[3].uv, Vec2::new(0.25, 0.5));
        assert_eq!(v[1].uv, Vec2::new(0.5, 0.75));
        assert_eq!(v[4].position.x, 111.0);
    }

    #[test]
    fn test_newlines_and_unknown_glyphs() {
        let mut drawer = drawer();
        let size = drawer.draw_text(
            &Mono,
            FontHandle(0),
            "a?b\nc d",
            Vec2::ZERO,
            &TextOptions::DEFAULT,
            0,
        );

        // '?' is skipped, the space advances without a quad.
        assert_eq!(size, Vec2::new(30.0, 32.0));
        let buffer = &drawer.store().text_buffers()[0].buffer;
        assert_eq!(buffer.vertex_count(), 4 * 4);
        assert_eq!(buffer.vertex(8).position, Vec2::new(1.0, 16.0));
    }

    #[test]
    fn test_measure_matches_draw() {
        let mut drawer = drawer();
        let options = TextOptions::DEFAULT.with_scale(2.0);
        let measured = drawer.measure_text(&Mono, FontHandle(1), "hello\nhi", &options);
        let drawn = drawer.draw_text(&Mono, FontHandle(1), "hello\nhi", Vec2::ZERO, &options, 0);

        assert_eq!(measured, drawn);
        assert_eq!(measured, Vec2::new(100.0, 64.0));
        assert_eq!(drawer.store().vertex_count(), 7 * 4);
    }

    #[test]
    fn test_empty_text_emits_nothing() {
        let mut drawer = drawer();
        let size = drawer.draw_text(&Mono, FontHandle(0), "", Vec2::ZERO, &TextOptions::DEFAULT, 0);

        assert_eq!(size, Vec2::new(0.0, 16.0));
        assert_eq!(drawer.store().buffer_count(), 0);
    }

    #[test]
    fn test_horizontal_gradient_spans_text() {
        let mut drawer = drawer();
        let options = TextOptions::DEFAULT.with_color(ColorGradient::new(
            Color::RED,
            Color::BLUE,
            GradientKind::Horizontal,
        ));
        drawer.draw_text(&Mono, FontHandle(0), "abc", Vec2::ZERO, &options, 0);

        let v = drawer.store().text_buffers()[0].buffer.vertices();
        assert_eq!(v[0].color, Color::RED);
        assert_eq!(v[9].color, Color::BLUE);
    }
}

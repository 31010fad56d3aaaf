//! Style options for draw calls.
//!
//! A [`StyleOptions`] value carries everything a shape or line request can vary: color ramp,
//! thickness ramp, corner rounding, outline, drop shadow, texture and anti-aliasing.
//! [`StyleOptions::DEFAULT`] is the single canonical default.

use crate::Color;
use glam::Vec2;

/// Opaque texture handle issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TextureHandle(pub u32);

/// How a two-stop color ramp is spread over a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GradientKind {
    /// Left to right across the bounding box.
    #[default]
    Horizontal,
    /// Top to bottom across the bounding box.
    Vertical,
    /// By distance from the shape center.
    Radial,
    /// By distance from the bounding box minimum corner.
    RadialCorner,
}

/// Two-stop color ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorGradient {
    pub start: Color,
    pub end: Color,
    pub kind: GradientKind,
    /// Scales the normalized distance for radial kinds.
    pub radial_size: f32,
}

impl ColorGradient {
    /// A single color.
    pub const fn solid(color: Color) -> Self {
        Self {
            start: color,
            end: color,
            kind: GradientKind::Horizontal,
            radial_size: 1.0,
        }
    }

    pub const fn new(start: Color, end: Color, kind: GradientKind) -> Self {
        Self {
            start,
            end,
            kind,
            radial_size: 1.0,
        }
    }

    pub const fn with_radial_size(mut self, radial_size: f32) -> Self {
        self.radial_size = radial_size;
        self
    }

    /// Whether both stops are the same color.
    pub fn is_uniform(&self) -> bool {
        self.start == self.end
    }

    /// Color at `t` in `[0, 1]`.
    pub fn sample(&self, t: f32) -> Color {
        self.start.lerp(self.end, t)
    }
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self::solid(Color::WHITE)
    }
}

impl From<Color> for ColorGradient {
    fn from(color: Color) -> Self {
        Self::solid(color)
    }
}

/// Start and end thickness of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThicknessGradient {
    pub start: f32,
    pub end: f32,
}

impl ThicknessGradient {
    pub const fn uniform(thickness: f32) -> Self {
        Self {
            start: thickness,
            end: thickness,
        }
    }

    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    pub fn sample(&self, t: f32) -> f32 {
        crate::math::lerp(self.start, self.end, t)
    }
}

impl Default for ThicknessGradient {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Texture sampling for a fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureBinding {
    pub handle: TextureHandle,
    pub uv_tiling: Vec2,
    pub uv_offset: Vec2,
}

impl TextureBinding {
    pub const fn new(handle: TextureHandle) -> Self {
        Self {
            handle,
            uv_tiling: Vec2::ONE,
            uv_offset: Vec2::ZERO,
        }
    }

    pub const fn with_tiling(mut self, tiling: Vec2) -> Self {
        self.uv_tiling = tiling;
        self
    }

    pub const fn with_offset(mut self, offset: Vec2) -> Self {
        self.uv_offset = offset;
        self
    }
}

/// Which side of the perimeter an outline grows towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutlineDirection {
    #[default]
    Outwards,
    Inwards,
    /// Centered on the perimeter.
    Both,
}

/// Outline drawn around a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineOptions {
    pub thickness: f32,
    pub color: ColorGradient,
    pub direction: OutlineDirection,
    pub texture: Option<TextureBinding>,
}

impl OutlineOptions {
    pub const fn new(thickness: f32, color: Color) -> Self {
        Self {
            thickness,
            color: ColorGradient::solid(color),
            direction: OutlineDirection::Outwards,
            texture: None,
        }
    }

    pub const fn with_direction(mut self, direction: OutlineDirection) -> Self {
        self.direction = direction;
        self
    }

    pub const fn with_gradient(mut self, color: ColorGradient) -> Self {
        self.color = color;
        self
    }

    pub const fn with_texture(mut self, texture: TextureBinding) -> Self {
        self.texture = Some(texture);
        self
    }
}

/// Drop shadow: a translated copy of the shape drawn beneath it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowOptions {
    pub offset: Vec2,
    pub color: Color,
}

impl ShadowOptions {
    pub const fn new(offset: Vec2, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Complete style for a draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOptions {
    pub color: ColorGradient,
    pub thickness: ThicknessGradient,
    /// Corner rounding factor, `0.0..=1.0`.
    pub rounding: f32,
    /// Corner indices to round. Empty rounds every corner.
    pub rounded_corners: Vec<usize>,
    pub outline: Option<OutlineOptions>,
    pub shadow: Option<ShadowOptions>,
    pub texture: Option<TextureBinding>,
    /// Filled interior; otherwise only the perimeter is stroked with `thickness.start`.
    pub filled: bool,
    /// Request feathered edges (also needs [`AaConfig::enabled`](crate::AaConfig)).
    pub aa: bool,
}

impl StyleOptions {
    pub const DEFAULT: StyleOptions = StyleOptions {
        color: ColorGradient::solid(Color::WHITE),
        thickness: ThicknessGradient::uniform(1.0),
        rounding: 0.0,
        rounded_corners: Vec::new(),
        outline: None,
        shadow: None,
        texture: None,
        filled: true,
        aa: false,
    };

    /// Filled style with a solid color.
    pub fn fill(color: Color) -> Self {
        Self::DEFAULT.with_color(color)
    }

    /// Filled style with a color ramp.
    pub fn gradient(gradient: ColorGradient) -> Self {
        Self {
            color: gradient,
            ..Self::DEFAULT
        }
    }

    /// Stroke-only style.
    pub fn stroke(color: Color, thickness: f32) -> Self {
        Self {
            color: ColorGradient::solid(color),
            thickness: ThicknessGradient::uniform(thickness),
            filled: false,
            ..Self::DEFAULT
        }
    }

    pub fn with_color(mut self, color: impl Into<ColorGradient>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_thickness(mut self, thickness: ThicknessGradient) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_rounding(mut self, rounding: f32) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_rounded_corners(mut self, corners: impl Into<Vec<usize>>) -> Self {
        self.rounded_corners = corners.into();
        self
    }

    pub fn with_outline(mut self, outline: OutlineOptions) -> Self {
        self.outline = Some(outline);
        self
    }

    pub fn with_shadow(mut self, shadow: ShadowOptions) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn with_texture(mut self, texture: TextureBinding) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    pub fn with_aa(mut self, aa: bool) -> Self {
        self.aa = aa;
        self
    }
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Style for [`Drawer::draw_text`](crate::Drawer::draw_text).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOptions {
    pub color: ColorGradient,
    pub scale: f32,
    /// Extra advance added after every glyph.
    pub letter_spacing: f32,
    /// Multiplier on the font line height.
    pub line_spacing: f32,
    pub aa: bool,
}

impl TextOptions {
    pub const DEFAULT: TextOptions = TextOptions {
        color: ColorGradient::solid(Color::WHITE),
        scale: 1.0,
        letter_spacing: 0.0,
        line_spacing: 1.0,
        aa: false,
    };

    pub fn with_color(mut self, color: impl Into<ColorGradient>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = StyleOptions::default();
        assert!(style.filled);
        assert!(style.color.is_uniform());
        assert_eq!(style.thickness, ThicknessGradient::uniform(1.0));
        assert!(style.rounded_corners.is_empty());
    }

    #[test]
    fn test_gradient_sample() {
        let gradient = ColorGradient::new(Color::RED, Color::BLUE, GradientKind::Vertical);
        assert!(!gradient.is_uniform());
        assert_eq!(gradient.sample(0.0), Color::RED);
        assert_eq!(gradient.sample(1.0), Color::BLUE);
    }

    #[test]
    fn test_stroke_style() {
        let style = StyleOptions::stroke(Color::BLACK, 3.0);
        assert!(!style.filled);
        assert_eq!(style.thickness.start, 3.0);
    }
}

//! Convex shapes: triangles, rectangles, n-gons, circles, arbitrary convex polygons, images.
//!
//! Every shape goes through the same pipeline: corner rounding on the caller's corner order,
//! orientation normalization, colors/UVs from the unrotated bounding box, then emission of the
//! shadow, the fill (or stroke ring), its feather ring and finally the outline ring. Rotation
//! is applied per vertex as it is emitted.

use super::{Drawer, fill_target};
use crate::buffer::DrawBuffer;
use crate::error::ConfigError;
use crate::math;
use crate::style::{
    ColorGradient, GradientKind, OutlineDirection, StyleOptions, TextureBinding,
};
use crate::{Color, Vertex};
use astrelis_core::profiling::{profile_function, profile_scope};
use glam::Vec2;

/// Consecutive perimeter points closer than this are merged.
const MERGE_EPSILON: f32 = 1e-3;

/// How a filled shape is triangulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fan {
    /// Triangles share the first perimeter vertex.
    Perimeter,
    /// Triangles share an extra vertex at the shape center.
    Center,
}

/// Maps local positions to screen positions.
#[derive(Debug, Clone, Copy)]
struct Placement {
    center: Vec2,
    rotation: f32,
    offset: Vec2,
}

impl Placement {
    fn place(&self, point: Vec2) -> Vec2 {
        let point = if self.rotation != 0.0 {
            math::rotate_around(point, self.center, self.rotation)
        } else {
            point
        };
        point + self.offset
    }
}

/// Colors and texture coordinates over a shape's bounding box.
#[derive(Debug, Clone, Copy)]
pub(super) struct Paint {
    gradient: ColorGradient,
    uv_tiling: Vec2,
    uv_offset: Vec2,
    min: Vec2,
    size: Vec2,
    center: Vec2,
    max_distance: f32,
}

impl Paint {
    pub(super) fn new(
        gradient: ColorGradient,
        texture: Option<TextureBinding>,
        points: &[Vec2],
        center: Vec2,
    ) -> Self {
        let (min, max) = bounds(points);
        let (uv_tiling, uv_offset) = texture
            .map(|t| (t.uv_tiling, t.uv_offset))
            .unwrap_or((Vec2::ONE, Vec2::ZERO));
        let max_distance = points
            .iter()
            .map(|p| p.distance(center))
            .fold(f32::EPSILON, f32::max);

        Self {
            gradient,
            uv_tiling,
            uv_offset,
            min,
            size: (max - min).max(Vec2::splat(f32::EPSILON)),
            center,
            max_distance,
        }
    }

    pub(super) fn color_at(&self, point: Vec2) -> Color {
        if self.gradient.is_uniform() {
            return self.gradient.start;
        }

        let t = match self.gradient.kind {
            GradientKind::Horizontal => (point.x - self.min.x) / self.size.x,
            GradientKind::Vertical => (point.y - self.min.y) / self.size.y,
            GradientKind::Radial => {
                point.distance(self.center) / self.max_distance * self.gradient.radial_size
            }
            GradientKind::RadialCorner => {
                point.distance(self.min) / self.size.length() * self.gradient.radial_size
            }
        };
        self.gradient.sample(t.clamp(0.0, 1.0))
    }

    fn uv_at(&self, point: Vec2) -> Vec2 {
        (point - self.min) / self.size * self.uv_tiling + self.uv_offset
    }

    fn vertex(&self, local: Vec2, placement: &Placement) -> Vertex {
        Vertex::new(placement.place(local), self.uv_at(local), self.color_at(local))
    }
}

impl Drawer {
    /// Draw a triangle through three points.
    pub fn draw_triangle(
        &mut self,
        p1: Vec2,
        p2: Vec2,
        p3: Vec2,
        style: &StyleOptions,
        rotation: f32,
        draw_order: i32,
    ) {
        profile_function!();
        let points = vec![p1, p2, p3];
        let center = math::polygon_centroid_fast(&points);
        self.draw_shape(points, center, Fan::Perimeter, rotation, style, draw_order);
    }

    /// Draw an axis-aligned rectangle, rotated by `rotation` degrees about its center.
    ///
    /// Corner indices for rounding are top-left, top-right, bottom-right, bottom-left.
    pub fn draw_rect(
        &mut self,
        min: Vec2,
        max: Vec2,
        style: &StyleOptions,
        rotation: f32,
        draw_order: i32,
    ) {
        profile_function!();
        let points = vec![min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)];
        self.draw_shape(points, (min + max) * 0.5, Fan::Perimeter, rotation, style, draw_order);
    }

    /// Draw a regular polygon with `sides` corners, the first one pointing up.
    pub fn draw_ngon(
        &mut self,
        center: Vec2,
        radius: f32,
        sides: u32,
        style: &StyleOptions,
        rotation: f32,
        draw_order: i32,
    ) {
        profile_function!();
        let sides = sides.max(3);
        let step = 360.0 / sides as f32;
        let points = (0..sides)
            .map(|i| math::point_on_circle(center, radius, -90.0 + step * i as f32))
            .collect();
        self.draw_shape(points, center, Fan::Center, rotation, style, draw_order);
    }

    /// Draw a convex polygon. Concave input is not detected and fills incorrectly.
    pub fn draw_convex(
        &mut self,
        points: &[Vec2],
        style: &StyleOptions,
        rotation: f32,
        draw_order: i32,
    ) {
        profile_function!();
        if points.len() < 3 {
            return;
        }
        let center = math::polygon_centroid(points);
        self.draw_shape(points.to_vec(), center, Fan::Perimeter, rotation, style, draw_order);
    }

    /// Draw a full circle with the configured number of perimeter segments.
    pub fn draw_circle(&mut self, center: Vec2, radius: f32, style: &StyleOptions, draw_order: i32) {
        profile_function!();
        let segments = self.config.circle_segments.max(3);
        self.draw_ngon(center, radius, segments, style, 0.0, draw_order);
    }

    /// Draw the pie slice between two angles in degrees, e.g. `0.0..180.0` for a half circle.
    ///
    /// A sweep of 360 degrees or more draws a full circle.
    pub fn draw_circle_sector(
        &mut self,
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        style: &StyleOptions,
        draw_order: i32,
    ) {
        profile_function!();
        let sweep = end_angle - start_angle;
        if sweep.abs() >= 360.0 {
            self.draw_circle(center, radius, style, draw_order);
            return;
        }

        let full = self.config.circle_segments.max(3) as f32;
        let segments = (full * sweep.abs() / 360.0).ceil().max(1.0) as u32;
        let mut points = Vec::with_capacity(segments as usize + 2);
        points.push(center);
        points.extend((0..=segments).map(|i| {
            math::point_on_circle(center, radius, start_angle + sweep * i as f32 / segments as f32)
        }));
        self.draw_shape(points, center, Fan::Perimeter, 0.0, style, draw_order);
    }

    /// Draw a textured rectangle of `size` centered on `center`, tinted by `tint`.
    pub fn draw_image(
        &mut self,
        texture: TextureBinding,
        center: Vec2,
        size: Vec2,
        tint: Color,
        rotation: f32,
        draw_order: i32,
    ) {
        let style = StyleOptions::fill(tint).with_texture(texture);
        let half = size * 0.5;
        self.draw_rect(center - half, center + half, &style, rotation, draw_order);
    }

    fn draw_shape(
        &mut self,
        mut points: Vec<Vec2>,
        center: Vec2,
        fan: Fan,
        rotation: f32,
        style: &StyleOptions,
        draw_order: i32,
    ) {
        self.joint = None;

        if let Some((factor, corners)) = self.rounding_for(style, points.len()) {
            profile_scope!("round_corners");
            points = round_corners(&points, factor, &corners, self.config.rounding_segments);
        }
        if points.len() < 3 {
            return;
        }
        // Keep the first vertex in place so perimeter fans stay anchored on it.
        if math::signed_area(&points) > 0.0 {
            points[1..].reverse();
        }

        let normals = vertex_normals(&points);
        let feather = self.feather(style.aa);
        let placement = Placement {
            center,
            rotation,
            offset: Vec2::ZERO,
        };

        if let Some(shadow) = style.shadow {
            let paint = Paint::new(ColorGradient::solid(shadow.color), None, &points, center);
            let placement = Placement {
                offset: shadow.offset,
                ..placement
            };
            let buffer = self.store.plain_buffer(draw_order);
            let first = emit_fan(buffer, &points, center, fan, &paint, &placement);
            if let Some(distance) = feather {
                feather_ring(buffer, first, &points, &normals, distance, &paint, &placement);
            }
        }

        let paint = Paint::new(style.color, style.texture, &points, center);
        let target = fill_target(&style.color, style.texture, style.aa);
        let buffer = self.store.buffer_for(draw_order, &target);
        if style.filled {
            let first = emit_fan(buffer, &points, center, fan, &paint, &placement);
            if let Some(distance) = feather {
                feather_ring(buffer, first, &points, &normals, distance, &paint, &placement);
            }
        } else {
            let half = style.thickness.start * 0.5;
            emit_ring(buffer, &points, &normals, (-half, half), &paint, &placement);
        }

        if let Some(outline) = style.outline {
            let offsets = match outline.direction {
                OutlineDirection::Outwards => (0.0, outline.thickness),
                OutlineDirection::Inwards => (-outline.thickness, 0.0),
                OutlineDirection::Both => (-outline.thickness * 0.5, outline.thickness * 0.5),
            };
            let paint = Paint::new(outline.color, outline.texture, &points, center);
            let target = fill_target(&outline.color, outline.texture, style.aa);
            let buffer = self.store.buffer_for(draw_order, &target);
            emit_ring(buffer, &points, &normals, offsets, &paint, &placement);
        }
    }

    /// Validated rounding factor and per-corner selection, or `None` when nothing is rounded.
    fn rounding_for(&self, style: &StyleOptions, corner_count: usize) -> Option<(f32, Vec<bool>)> {
        if style.rounding == 0.0 {
            return None;
        }

        let factor = if (0.0..=1.0).contains(&style.rounding) {
            style.rounding
        } else {
            self.config
                .report(ConfigError::RoundingOutOfRange(style.rounding));
            style.rounding.clamp(0.0, 1.0)
        };
        if factor <= 0.0 {
            return None;
        }

        let mut selected = vec![style.rounded_corners.is_empty(); corner_count];
        for &index in &style.rounded_corners {
            match selected.get_mut(index) {
                Some(corner) => *corner = true,
                None => self.config.report(ConfigError::InvalidCorner {
                    index,
                    corner_count,
                }),
            }
        }
        Some((factor, selected))
    }
}

/// Axis-aligned bounds of a point set.
pub(super) fn bounds(points: &[Vec2]) -> (Vec2, Vec2) {
    points.iter().fold(
        (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
        |(min, max), p| (min.min(*p), max.max(*p)),
    )
}

/// Replace every selected corner by a circular fillet of `segments + 1` points.
///
/// The fillet touches both adjacent edges at `factor` times half the shorter edge from the
/// corner.
fn round_corners(points: &[Vec2], factor: f32, corners: &[bool], segments: u32) -> Vec<Vec2> {
    let n = points.len();
    let segments = segments.max(1);
    let mut rounded = Vec::with_capacity(n * (segments as usize + 1));

    for (i, &corner) in points.iter().enumerate() {
        if !corners.get(i).copied().unwrap_or(false) {
            rounded.push(corner);
            continue;
        }

        let to_prev = points[(i + n - 1) % n] - corner;
        let to_next = points[(i + 1) % n] - corner;
        let tangent = factor * 0.5 * math::mag(to_prev).min(math::mag(to_next));
        let dir_prev = math::normalized(to_prev);
        let dir_next = math::normalized(to_next);

        let half_angle = dir_prev.dot(dir_next).clamp(-1.0, 1.0).acos() * 0.5;
        if tangent <= 0.0 || half_angle.cos() < 1e-4 {
            rounded.push(corner);
            continue;
        }

        let radius = tangent * half_angle.tan();
        let fillet_center =
            corner + math::normalized(dir_prev + dir_next) * (tangent / half_angle.cos());
        let start = math::angle_from_center(fillet_center, corner + dir_prev * tangent);
        let end = math::angle_from_center(fillet_center, corner + dir_next * tangent);
        let mut sweep = end - start;
        if sweep > 180.0 {
            sweep -= 360.0;
        } else if sweep < -180.0 {
            sweep += 360.0;
        }

        for s in 0..=segments {
            let angle = start + sweep * s as f32 / segments as f32;
            rounded.push(math::point_on_circle(fillet_center, radius, angle));
        }
    }

    rounded.dedup_by(|a, b| a.distance(*b) < MERGE_EPSILON);
    while rounded.len() > 1
        && rounded[0].distance(rounded[rounded.len() - 1]) < MERGE_EPSILON
    {
        rounded.pop();
    }
    rounded
}

/// Outward offset direction per vertex of a clockwise polygon, scaled to keep edge offsets
/// parallel.
fn vertex_normals(points: &[Vec2]) -> Vec<Vec2> {
    let n = points.len();
    let edge_normal =
        |i: usize| math::rotate_90(math::normalized(points[(i + 1) % n] - points[i]), false);

    (0..n)
        .map(|i| {
            let before = edge_normal((i + n - 1) % n);
            let after = edge_normal(i);
            let normal = math::normalized(before + after);
            normal / normal.dot(after).max(0.25)
        })
        .collect()
}

/// Push the perimeter and its fan triangles. Returns the index of the first perimeter vertex.
fn emit_fan(
    buffer: &mut DrawBuffer,
    points: &[Vec2],
    center: Vec2,
    fan: Fan,
    paint: &Paint,
    placement: &Placement,
) -> u32 {
    let hub = match fan {
        Fan::Center => Some(buffer.push_vertex(paint.vertex(center, placement))),
        Fan::Perimeter => None,
    };

    let first = buffer.next_index();
    for &point in points {
        buffer.push_vertex(paint.vertex(point, placement));
    }

    let n = points.len() as u32;
    match hub {
        Some(hub) => {
            for i in 0..n {
                buffer.push_triangle(hub, first + i, first + (i + 1) % n);
            }
        }
        None => {
            for i in 1..n - 1 {
                buffer.push_triangle(first, first + i, first + i + 1);
            }
        }
    }
    first
}

/// Triangles between an inner ring starting at `inner` and an outer ring starting at `outer`.
fn stitch_rings(buffer: &mut DrawBuffer, inner: u32, outer: u32, n: u32) {
    for i in 0..n {
        let j = (i + 1) % n;
        buffer.push_triangle(outer + i, outer + j, inner + i);
        buffer.push_triangle(outer + j, inner + j, inner + i);
    }
}

/// Band around the perimeter between the signed offsets `inner` and `outer`.
fn emit_ring(
    buffer: &mut DrawBuffer,
    points: &[Vec2],
    normals: &[Vec2],
    (inner, outer): (f32, f32),
    paint: &Paint,
    placement: &Placement,
) {
    let inner_first = buffer.next_index();
    for (point, normal) in points.iter().zip(normals) {
        buffer.push_vertex(paint.vertex(*point + *normal * inner, placement));
    }
    let outer_first = buffer.next_index();
    for (point, normal) in points.iter().zip(normals) {
        buffer.push_vertex(paint.vertex(*point + *normal * outer, placement));
    }
    stitch_rings(buffer, inner_first, outer_first, points.len() as u32);
}

/// Transparent ring outside the perimeter vertices starting at `first`.
fn feather_ring(
    buffer: &mut DrawBuffer,
    first: u32,
    points: &[Vec2],
    normals: &[Vec2],
    distance: f32,
    paint: &Paint,
    placement: &Placement,
) {
    let outer_first = buffer.next_index();
    for (point, normal) in points.iter().zip(normals) {
        let mut vertex = paint.vertex(*point + *normal * distance, placement);
        vertex.color = vertex.color.with_alpha(0.0);
        buffer.push_vertex(vertex);
    }
    stitch_rings(buffer, first, outer_first, points.len() as u32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::style::{OutlineOptions, ShadowOptions};
    use crate::TextureHandle;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn drawer() -> Drawer {
        Drawer::new(Arc::new(Config::default()))
    }

    fn plain(drawer: &Drawer) -> &DrawBuffer {
        drawer
            .store()
            .plain_buffers()
            .next()
            .expect("no plain buffer")
    }

    /// Every triangle must have the same (negative) winding as the line quads.
    fn assert_clockwise(buffer: &DrawBuffer) {
        for tri in buffer.indices().chunks(3) {
            let a = buffer.vertex(tri[0]).position;
            let b = buffer.vertex(tri[1]).position;
            let c = buffer.vertex(tri[2]).position;
            assert!(math::signed_area(&[a, b, c]) <= 1e-4, "triangle {:?} is wound the other way", tri);
        }
    }

    fn recording_config(seen: &Arc<Mutex<Vec<ConfigError>>>) -> Config {
        let sink = seen.clone();
        Config::default().with_diagnostics(move |err| sink.lock().push(err.clone()))
    }

    #[test]
    fn test_rect_is_one_quad() {
        let mut drawer = drawer();
        drawer.draw_rect(
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            &StyleOptions::fill(Color::RED),
            0.0,
            0,
        );

        let buffer = plain(&drawer);
        assert_eq!(buffer.vertex_count(), 4);
        assert_eq!(buffer.index_count(), 6);
        assert!(buffer.vertices().iter().all(|v| v.color == Color::RED));
        assert_clockwise(buffer);
    }

    #[test]
    fn test_triangle_counts() {
        let mut drawer = drawer();
        drawer.draw_triangle(
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
            &StyleOptions::DEFAULT,
            0.0,
            0,
        );

        let buffer = plain(&drawer);
        assert_eq!(buffer.vertex_count(), 3);
        assert_eq!(buffer.index_count(), 3);
        assert_clockwise(buffer);
    }

    #[test]
    fn test_ngon_fans_from_center() {
        let mut drawer = drawer();
        let center = Vec2::new(50.0, 50.0);
        drawer.draw_ngon(center, 10.0, 6, &StyleOptions::DEFAULT, 0.0, 0);

        let buffer = plain(&drawer);
        assert_eq!(buffer.vertex_count(), 7);
        assert_eq!(buffer.index_count(), 18);
        assert_eq!(buffer.vertex(0).position, center);
        assert_clockwise(buffer);
    }

    #[test]
    fn test_circle_uses_configured_segments() {
        let mut drawer = drawer();
        drawer.draw_circle(Vec2::ZERO, 5.0, &StyleOptions::DEFAULT, 0);

        let buffer = plain(&drawer);
        assert_eq!(buffer.vertex_count(), 37);
        assert_eq!(buffer.triangle_count(), 36);
        for vertex in &buffer.vertices()[1..] {
            assert!((vertex.position.length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_half_circle_sector() {
        let mut drawer = drawer();
        drawer.draw_circle_sector(Vec2::ZERO, 5.0, 0.0, 180.0, &StyleOptions::DEFAULT, 0);

        let buffer = plain(&drawer);
        // Center plus 19 arc points.
        assert_eq!(buffer.vertex_count(), 20);
        assert_eq!(buffer.triangle_count(), 18);
        assert_clockwise(buffer);
    }

    #[test]
    fn test_horizontal_gradient_goes_to_gradient_buffer() {
        let mut drawer = drawer();
        let gradient = ColorGradient::new(Color::RED, Color::BLUE, GradientKind::Horizontal);
        drawer.draw_rect(
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            &StyleOptions::gradient(gradient),
            0.0,
            0,
        );

        let store = drawer.store();
        assert_eq!(store.plain_buffers().count(), 0);
        assert_eq!(store.gradient_buffers().len(), 1);

        let buffer = &store.gradient_buffers()[0].buffer;
        for vertex in buffer.vertices() {
            let expected = if vertex.position.x == 0.0 {
                Color::RED
            } else {
                Color::BLUE
            };
            assert_eq!(vertex.color, expected);
        }
    }

    #[test]
    fn test_radial_gradient_center_to_edge() {
        let mut drawer = drawer();
        let gradient = ColorGradient::new(Color::WHITE, Color::BLACK, GradientKind::Radial);
        drawer.draw_circle(Vec2::ZERO, 5.0, &StyleOptions::gradient(gradient), 0);

        let buffer = &drawer.store().gradient_buffers()[0].buffer;
        assert_eq!(buffer.vertex(0).color, Color::WHITE);
        for vertex in &buffer.vertices()[1..] {
            assert!((vertex.color.r).abs() < 1e-4);
        }
    }

    #[test]
    fn test_rotation_keeps_unrotated_colors() {
        let mut drawer = drawer();
        let gradient = ColorGradient::new(Color::RED, Color::BLUE, GradientKind::Horizontal);
        drawer.draw_rect(
            Vec2::ZERO,
            Vec2::new(20.0, 10.0),
            &StyleOptions::gradient(gradient),
            90.0,
            0,
        );

        let buffer = &drawer.store().gradient_buffers()[0].buffer;
        let (min, max) = bounds(&buffer.vertices().iter().map(|v| v.position).collect::<Vec<_>>());
        assert!(min.distance(Vec2::new(5.0, -5.0)) < 1e-4);
        assert!(max.distance(Vec2::new(15.0, 15.0)) < 1e-4);

        // The left edge rotates onto the top edge but stays red.
        for vertex in buffer.vertices() {
            if (vertex.position.y + 5.0).abs() < 1e-4 {
                assert_eq!(vertex.color, Color::RED);
            }
        }
    }

    #[test]
    fn test_rounded_rect() {
        let config = Config::default().with_rounding_segments(8);
        let mut drawer = Drawer::new(Arc::new(config));
        let style = StyleOptions::fill(Color::WHITE).with_rounding(0.5);
        drawer.draw_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), &style, 0.0, 0);

        let buffer = plain(&drawer);
        assert_eq!(buffer.vertex_count(), 4 * 9);
        assert_eq!(buffer.triangle_count(), 4 * 9 - 2);
        for vertex in buffer.vertices() {
            let p = vertex.position;
            assert!(p.x >= -1e-4 && p.x <= 10.0001 && p.y >= -1e-4 && p.y <= 10.0001);
            // Rounded corners pull the perimeter away from the sharp corner.
            assert!(p.distance(Vec2::ZERO) > 0.5);
        }
        assert_clockwise(buffer);
    }

    #[test]
    fn test_rounding_out_of_range_is_clamped() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut drawer = Drawer::new(Arc::new(recording_config(&seen)));
        let style = StyleOptions::DEFAULT.with_rounding(1.5);
        drawer.draw_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), &style, 0.0, 0);

        assert_eq!(
            seen.lock().as_slice(),
            &[ConfigError::RoundingOutOfRange(1.5)]
        );
        // Fully rounded fillets meet at the edge midpoints, which are merged.
        assert_eq!(plain(&drawer).vertex_count(), 4 * 9 - 4);
    }

    #[test]
    fn test_invalid_corner_is_ignored() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut drawer = Drawer::new(Arc::new(recording_config(&seen)));
        let style = StyleOptions::DEFAULT
            .with_rounding(0.5)
            .with_rounded_corners([0, 7]);
        drawer.draw_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), &style, 0.0, 0);

        assert_eq!(
            seen.lock().as_slice(),
            &[ConfigError::InvalidCorner {
                index: 7,
                corner_count: 4
            }]
        );
        assert_eq!(plain(&drawer).vertex_count(), 3 + 9);
    }

    #[test]
    fn test_outline_outwards() {
        let mut drawer = drawer();
        let style = StyleOptions::fill(Color::WHITE)
            .with_outline(OutlineOptions::new(2.0, Color::BLACK));
        drawer.draw_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), &style, 0.0, 0);

        let buffer = plain(&drawer);
        assert_eq!(buffer.vertex_count(), 4 + 8);
        assert_eq!(buffer.index_count(), 6 + 24);

        let (min, max) = bounds(&buffer.vertices()[8..].iter().map(|v| v.position).collect::<Vec<_>>());
        assert!(min.distance(Vec2::splat(-2.0)) < 1e-4);
        assert!(max.distance(Vec2::splat(12.0)) < 1e-4);
        assert!(buffer.vertices()[4..].iter().all(|v| v.color == Color::BLACK));
        assert_clockwise(buffer);
    }

    #[test]
    fn test_outline_inwards_stays_inside() {
        let mut drawer = drawer();
        let style = StyleOptions::fill(Color::WHITE).with_outline(
            OutlineOptions::new(2.0, Color::BLACK).with_direction(OutlineDirection::Inwards),
        );
        drawer.draw_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), &style, 0.0, 0);

        let buffer = plain(&drawer);
        let (min, max) = bounds(&buffer.vertices()[4..8].iter().map(|v| v.position).collect::<Vec<_>>());
        assert!(min.distance(Vec2::splat(2.0)) < 1e-4);
        assert!(max.distance(Vec2::splat(8.0)) < 1e-4);
    }

    #[test]
    fn test_stroke_only_shape() {
        let mut drawer = drawer();
        drawer.draw_rect(
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            &StyleOptions::stroke(Color::WHITE, 2.0),
            0.0,
            0,
        );

        let buffer = plain(&drawer);
        assert_eq!(buffer.vertex_count(), 8);
        assert_eq!(buffer.index_count(), 24);
        assert_clockwise(buffer);
    }

    #[test]
    fn test_shadow_is_emitted_first() {
        let mut drawer = drawer();
        let shadow = ShadowOptions::new(Vec2::new(3.0, 4.0), Color::BLACK.with_alpha(0.5));
        let style = StyleOptions::fill(Color::RED).with_shadow(shadow);
        drawer.draw_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), &style, 0.0, 0);

        let buffer = plain(&drawer);
        assert_eq!(buffer.vertex_count(), 8);
        assert!(buffer.vertices()[..4].iter().all(|v| v.color == Color::BLACK.with_alpha(0.5)));
        assert!(buffer.vertices()[4..].iter().all(|v| v.color == Color::RED));
        for i in 0..4 {
            let offset = buffer.vertex(i).position - buffer.vertex(i + 4).position;
            assert_eq!(offset, Vec2::new(3.0, 4.0));
        }
    }

    #[test]
    fn test_feathered_fill() {
        let mut drawer = Drawer::new(Arc::new(Config::default().with_aa(1.0)));
        let style = StyleOptions::fill(Color::RED).with_aa(true);
        drawer.draw_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), &style, 0.0, 0);

        let buffer = plain(&drawer);
        assert_eq!(buffer.vertex_count(), 8);
        assert_eq!(buffer.index_count(), 6 + 24);
        assert!(buffer.vertices()[4..].iter().all(|v| v.color.a == 0.0));
        assert_clockwise(buffer);
    }

    #[test]
    fn test_image_uvs_and_target() {
        let mut drawer = drawer();
        let texture = TextureBinding::new(TextureHandle(9)).with_tiling(Vec2::splat(2.0));
        drawer.draw_image(texture, Vec2::splat(5.0), Vec2::splat(10.0), Color::WHITE, 0.0, 3);

        let store = drawer.store();
        assert_eq!(store.textured_buffers().len(), 1);

        let textured = &store.textured_buffers()[0];
        assert_eq!(textured.key.handle, TextureHandle(9));
        assert_eq!(textured.draw_order(), 3);
        for vertex in textured.buffer.vertices() {
            assert_eq!(vertex.uv, vertex.position / 10.0 * 2.0);
        }
    }

    #[test]
    fn test_convex_polygon_normalizes_winding() {
        let mut drawer = drawer();
        // Counter-clockwise (positive area) input.
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(12.0, 6.0),
            Vec2::new(5.0, 10.0),
            Vec2::new(-2.0, 6.0),
        ];
        drawer.draw_convex(&points, &StyleOptions::DEFAULT, 0.0, 0);

        let buffer = plain(&drawer);
        assert_eq!(buffer.vertex_count(), 5);
        assert_eq!(buffer.triangle_count(), 3);
        assert_clockwise(buffer);
    }
}

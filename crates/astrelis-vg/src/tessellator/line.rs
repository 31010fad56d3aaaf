//! Line segments, polylines, arcs and Bézier curves.

use super::{Drawer, JointAnchor, line_target};
use crate::buffer::{BufferTarget, DrawBuffer};
use crate::config::{Config, JointMode};
use crate::error::ConfigError;
use crate::math;
use crate::style::StyleOptions;
use crate::{Color, Vertex};
use astrelis_core::profiling::profile_function;
use glam::Vec2;

/// Maximum gap between a segment's start and the previous end for the two to be joined.
const JOINT_EPSILON: f32 = 1e-3;

/// Turns smaller than this (degrees) are treated as straight continuations.
const STRAIGHT_TURN: f32 = 0.5;

/// Centerline of one segment with its interpolated style at both ends.
#[derive(Debug, Clone, Copy)]
struct Segment {
    start: Vec2,
    end: Vec2,
    start_color: Color,
    end_color: Color,
    start_thickness: f32,
    end_thickness: f32,
}

/// Extra triangle closing the outer wedge of a bevel joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wedge {
    /// Counter-clockwise turn: the wedge sits on the lower side.
    Left,
    /// Clockwise turn: the wedge sits on the upper side.
    Right,
}

impl Drawer {
    /// Draw a single segment from `p1` to `p2`.
    ///
    /// The color and thickness gradients run from `p1` to `p2`. A line starting where the
    /// previous line on the same buffer ended is joined to it using the joint mode.
    pub fn draw_line(&mut self, p1: Vec2, p2: Vec2, style: &StyleOptions, draw_order: i32) {
        profile_function!();
        let segment = Segment {
            start: p1,
            end: p2,
            start_color: style.color.start,
            end_color: style.color.end,
            start_thickness: style.thickness.start,
            end_thickness: style.thickness.end,
        };
        self.emit_segment(draw_order, line_target(style), &segment, style.aa);
    }

    /// Draw a connected polyline. Gradients run along the whole path.
    pub fn draw_lines(&mut self, points: &[Vec2], style: &StyleOptions, draw_order: i32) {
        profile_function!();
        self.joint = None;
        self.emit_path(points, style, draw_order);
    }

    /// Draw a half-circle (or parabolic bulge) from `p1` to `p2`.
    ///
    /// With `radius == 0` the arc is the semicircle over the chord. Otherwise it is a
    /// parabola whose apex sits `radius` away from the chord midpoint. `flip` mirrors the arc
    /// to the other side of the chord. `segments` caps the sampling density; the configured
    /// arc resolution is used when it is finer than what the caller asks for.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_arc(
        &mut self,
        p1: Vec2,
        p2: Vec2,
        radius: f32,
        flip: bool,
        style: &StyleOptions,
        segments: Option<u32>,
        draw_order: i32,
    ) {
        profile_function!();
        let resolution = self.config.arc_resolution.max(Config::MIN_ARC_RESOLUTION);
        let step = match segments {
            Some(count) if count > 0 => (180.0 / count as f32).max(resolution),
            _ => resolution,
        };

        let points = sample_arc(p1, p2, radius, flip, step);
        self.joint = None;
        self.emit_path(&points, style, draw_order);
    }

    /// Draw a cubic Bézier curve with `segments` straight pieces (at least
    /// [`Config::MIN_BEZIER_SEGMENTS`]).
    #[allow(clippy::too_many_arguments)]
    pub fn draw_bezier(
        &mut self,
        p0: Vec2,
        p1: Vec2,
        p2: Vec2,
        p3: Vec2,
        style: &StyleOptions,
        segments: u32,
        draw_order: i32,
    ) {
        profile_function!();
        let segments = if segments < Config::MIN_BEZIER_SEGMENTS {
            self.config.report(ConfigError::TooFewSegments {
                requested: segments,
                minimum: Config::MIN_BEZIER_SEGMENTS,
            });
            Config::MIN_BEZIER_SEGMENTS
        } else {
            segments
        };

        let points = sample_bezier_points(p0, p1, p2, p3, segments);
        self.joint = None;
        self.emit_path(&points, style, draw_order);
    }

    /// Emit consecutive segments through `points`, carrying the gradients across them.
    fn emit_path(&mut self, points: &[Vec2], style: &StyleOptions, draw_order: i32) {
        if points.len() < 2 {
            return;
        }

        let target = line_target(style);
        let count = (points.len() - 1) as f32;
        for (i, pair) in points.windows(2).enumerate() {
            let t0 = i as f32 / count;
            let t1 = (i + 1) as f32 / count;
            let segment = Segment {
                start: pair[0],
                end: pair[1],
                start_color: style.color.sample(t0),
                end_color: style.color.sample(t1),
                start_thickness: style.thickness.sample(t0),
                end_thickness: style.thickness.sample(t1),
            };
            self.emit_segment(draw_order, target, &segment, style.aa);
        }
    }

    /// Emit one segment quad, join it to the previous one and feather it if requested.
    ///
    /// Vertex order is upper-start, upper-end, lower-end, lower-start, where "upper" is
    /// offset along the counter-clockwise normal of the direction.
    fn emit_segment(
        &mut self,
        draw_order: i32,
        target: BufferTarget,
        segment: &Segment,
        aa: bool,
    ) {
        let direction = math::normalized(segment.end - segment.start);
        let normal = math::rotate_90(direction, false);
        let start_half = segment.start_thickness * 0.5;
        let end_half = segment.end_thickness * 0.5;

        let mut upper_start = segment.start + normal * start_half;
        let mut lower_start = segment.start - normal * start_half;
        let upper_end = segment.end + normal * end_half;
        let lower_end = segment.end - normal * end_half;

        let feather = self.feather(aa);
        let joint_mode = self.joint_mode;
        let miter_limit = self.config.miter_limit * start_half;
        let anchor = self.joint.filter(|anchor| {
            anchor.draw_order == draw_order
                && anchor.target == target
                && anchor.end_point.distance(segment.start) <= JOINT_EPSILON
        });

        let buffer = self.store.buffer_for(draw_order, &target);
        let anchor = anchor.filter(|anchor| anchor.fits(buffer.next_index()));

        let mut wedge = None;
        let mut moved = false;
        if let Some(anchor) = anchor {
            let prev_upper = buffer.vertex(anchor.upper).position;
            let prev_lower = buffer.vertex(anchor.lower).position;

            match joint_mode {
                JointMode::None => {}
                JointMode::VertexAverage => {
                    upper_start = (prev_upper + upper_start) * 0.5;
                    lower_start = (prev_lower + lower_start) * 0.5;
                    buffer.vertex_mut(anchor.upper).position = upper_start;
                    buffer.vertex_mut(anchor.lower).position = lower_start;
                    moved = true;
                }
                JointMode::Bevel => {
                    wedge = bevel(
                        anchor.direction,
                        direction,
                        (prev_upper, prev_lower),
                        (&mut upper_start, &mut lower_start),
                    );
                }
                JointMode::Miter => {
                    let upper = math::line_intersection(
                        prev_upper - anchor.direction,
                        prev_upper,
                        upper_start,
                        upper_end,
                    );
                    let lower = math::line_intersection(
                        prev_lower - anchor.direction,
                        prev_lower,
                        lower_start,
                        lower_end,
                    );

                    if upper.distance(segment.start) <= miter_limit
                        && lower.distance(segment.start) <= miter_limit
                    {
                        upper_start = upper;
                        lower_start = lower;
                        buffer.vertex_mut(anchor.upper).position = upper;
                        buffer.vertex_mut(anchor.lower).position = lower;
                        moved = true;
                    } else {
                        wedge = bevel(
                            anchor.direction,
                            direction,
                            (prev_upper, prev_lower),
                            (&mut upper_start, &mut lower_start),
                        );
                    }
                }
            }
        }

        let base = buffer.push_quad([
            Vertex::new(upper_start, Vec2::new(0.0, 0.0), segment.start_color),
            Vertex::new(upper_end, Vec2::new(1.0, 0.0), segment.end_color),
            Vertex::new(lower_end, Vec2::new(1.0, 1.0), segment.end_color),
            Vertex::new(lower_start, Vec2::new(0.0, 1.0), segment.start_color),
        ]);

        if let Some(anchor) = anchor {
            match wedge {
                Some(Wedge::Left) => buffer.push_triangle(anchor.upper, base + 3, anchor.lower),
                Some(Wedge::Right) => buffer.push_triangle(anchor.lower, anchor.upper, base),
                None => {}
            }
        }

        let mut feather_ends = None;
        if let Some(distance) = feather {
            let (upper, lower) = feather_segment(buffer, base, normal * distance);
            feather_ends = Some((upper + 1, lower));

            let joined = anchor.and_then(|anchor| anchor.feather.map(|ends| (anchor, ends)));
            if let Some((anchor, (prev_upper, prev_lower))) = joined {
                if moved {
                    // Both strips meet at one outer corner on each side.
                    let prev_normal = math::rotate_90(anchor.direction, false);
                    let offset = corner_normal(prev_normal, normal) * distance;
                    let outer_upper = upper_start + offset;
                    let outer_lower = lower_start - offset;
                    buffer.vertex_mut(prev_upper).position = outer_upper;
                    buffer.vertex_mut(upper).position = outer_upper;
                    buffer.vertex_mut(prev_lower).position = outer_lower;
                    buffer.vertex_mut(lower + 1).position = outer_lower;
                }

                // Fade the outer edge of the bevel wedge between the two strips.
                match wedge {
                    Some(Wedge::Left) => {
                        buffer.push_triangle(anchor.lower, base + 3, lower + 1);
                        buffer.push_triangle(anchor.lower, lower + 1, prev_lower);
                    }
                    Some(Wedge::Right) => {
                        buffer.push_triangle(anchor.upper, upper, base);
                        buffer.push_triangle(anchor.upper, prev_upper, upper);
                    }
                    None => {}
                }
            }
        }

        self.joint = Some(JointAnchor {
            draw_order,
            target,
            end_point: segment.end,
            direction,
            upper: base + 1,
            lower: base + 2,
            feather: feather_ends,
        });
    }
}

/// Snap the inner side of a bevel joint onto the previous segment and pick the wedge side.
fn bevel(
    prev_direction: Vec2,
    direction: Vec2,
    (prev_upper, prev_lower): (Vec2, Vec2),
    (upper_start, lower_start): (&mut Vec2, &mut Vec2),
) -> Option<Wedge> {
    let turn = math::angle_between(prev_direction, direction);
    if turn.abs() < STRAIGHT_TURN {
        *upper_start = prev_upper;
        *lower_start = prev_lower;
        None
    } else if turn > 0.0 {
        *upper_start = prev_upper;
        Some(Wedge::Left)
    } else {
        *lower_start = prev_lower;
        Some(Wedge::Right)
    }
}

/// Transparent copy of a vertex pushed outwards by `offset`.
fn faded(vertex: &Vertex, offset: Vec2) -> Vertex {
    Vertex::new(vertex.position + offset, vertex.uv, vertex.color.with_alpha(0.0))
}

/// Offset direction of a feather corner shared by two segments with unit normals `a` and `b`,
/// scaled so the strip keeps its width along `b`.
fn corner_normal(a: Vec2, b: Vec2) -> Vec2 {
    let bisector = (a + b).normalize_or_zero();
    bisector / bisector.dot(b).max(0.25)
}

/// Add a fading strip along both long edges of the quad starting at `base`.
///
/// Returns the indices of the first outer upper and first outer lower vertex. Each strip
/// pushes its start vertex before its end vertex on the upper side, and the reverse on the
/// lower side.
fn feather_segment(buffer: &mut DrawBuffer, base: u32, offset: Vec2) -> (u32, u32) {
    let outer_upper_start = faded(buffer.vertex(base), offset);
    let outer_upper_end = faded(buffer.vertex(base + 1), offset);
    let outer_lower_end = faded(buffer.vertex(base + 2), -offset);
    let outer_lower_start = faded(buffer.vertex(base + 3), -offset);

    let upper = buffer.push_vertex(outer_upper_start);
    buffer.push_vertex(outer_upper_end);
    buffer.push_triangle(upper, upper + 1, base);
    buffer.push_triangle(upper + 1, base + 1, base);

    let lower = buffer.push_vertex(outer_lower_end);
    buffer.push_vertex(outer_lower_start);
    buffer.push_triangle(base + 3, base + 2, lower + 1);
    buffer.push_triangle(base + 2, lower, lower + 1);

    (upper, lower)
}

/// Sample a half arc from `p1` to `p2` every `step_degrees`. Both endpoints are exact.
///
/// Steps finer than [`Config::MIN_ARC_RESOLUTION`] are raised to it.
///
/// See [`Drawer::draw_arc`] for the meaning of `radius` and `flip`.
pub fn sample_arc(p1: Vec2, p2: Vec2, radius: f32, flip: bool, step_degrees: f32) -> Vec<Vec2> {
    let steps = (180.0 / step_degrees.max(Config::MIN_ARC_RESOLUTION)).round().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 1);
    points.push(p1);

    if radius == 0.0 {
        let center = (p1 + p2) * 0.5;
        let half = math::mag(p2 - p1) * 0.5;
        let start = math::angle_from_center(center, p1);
        let sweep = if flip { -180.0 } else { 180.0 };
        for i in 1..steps {
            let t = i as f32 / steps as f32;
            points.push(math::point_on_circle(center, half, start + sweep * t));
        }
    } else {
        let direction = math::rotate_90(math::normalized(p2 - p1), !flip);
        for i in 1..steps {
            let t = i as f32 / steps as f32;
            points.push(math::sample_parabola(p1, p2, direction, radius, t));
        }
    }

    points.push(p2);
    points
}

/// Sample a cubic Bézier at `t = i / segments` for `i` in `0..=segments`.
pub fn sample_bezier_points(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            if i == segments {
                p3
            } else {
                math::sample_bezier(p0, p1, p2, p3, i as f32 / segments as f32)
            }
        })
        .collect()
}

//! Geometry helpers used by the tessellator.
//!
//! Everything here is a pure function over [`Vec2`]. Angles are in degrees unless the name
//! says otherwise. Degenerate input (zero-length vectors, parallel lines, empty polygons) is
//! not checked and yields NaN or fallback values.

use glam::Vec2;

/// Determinant magnitude below which two lines are treated as parallel.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Length of a vector.
#[inline]
pub fn mag(v: Vec2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Unit vector in the direction of `v`.
#[inline]
pub fn normalized(v: Vec2) -> Vec2 {
    v / mag(v)
}

/// Rotate a vector by 90 degrees, clockwise or counter-clockwise (y-up frame).
#[inline]
pub fn rotate_90(v: Vec2, cw: bool) -> Vec2 {
    if cw {
        Vec2::new(v.y, -v.x)
    } else {
        Vec2::new(-v.y, v.x)
    }
}

/// Angle of `point` as seen from `center`, in degrees within `(-180, 180]`.
#[inline]
pub fn angle_from_center(center: Vec2, point: Vec2) -> f32 {
    (point.y - center.y).atan2(point.x - center.x).to_degrees()
}

/// Signed angle from `a` to `b` in degrees. Positive values turn counter-clockwise.
#[inline]
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    let dot = a.x * b.x + a.y * b.y;
    let det = a.x * b.y - a.y * b.x;
    det.atan2(dot).to_degrees()
}

/// Point on a circle at the given angle in degrees.
#[inline]
pub fn point_on_circle(center: Vec2, radius: f32, degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(center.x + radius * radians.cos(), center.y + radius * radians.sin())
}

/// Sample a parabola through `p1` and `p2` bulging by `height` along `direction`.
///
/// The bulge is zero at both endpoints and peaks at `t = 0.5`.
#[inline]
pub fn sample_parabola(p1: Vec2, p2: Vec2, direction: Vec2, height: f32, t: f32) -> Vec2 {
    let parabolic_t = t * 2.0 - 1.0;
    let bulge = -parabolic_t * parabolic_t + 1.0;
    lerp_vec2(p1, p2, t) + direction * (bulge * height)
}

/// Evaluate a cubic Bézier curve with the Bernstein basis.
#[inline]
pub fn sample_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let t2 = t * t;

    p0 * (mt2 * mt) + p1 * (3.0 * mt2 * t) + p2 * (3.0 * mt * t2) + p3 * (t2 * t)
}

/// Intersection of the infinite lines `p00-p01` and `p10-p11`.
///
/// Parallel lines (|det| below [`PARALLEL_EPSILON`]) return `p01`.
pub fn line_intersection(p00: Vec2, p01: Vec2, p10: Vec2, p11: Vec2) -> Vec2 {
    let a1 = p01.y - p00.y;
    let b1 = p00.x - p01.x;
    let c1 = a1 * p00.x + b1 * p00.y;

    let a2 = p11.y - p10.y;
    let b2 = p10.x - p11.x;
    let c2 = a2 * p10.x + b2 * p10.y;

    let det = a1 * b2 - a2 * b1;
    if det.abs() < PARALLEL_EPSILON {
        return p01;
    }

    Vec2::new((b2 * c1 - b1 * c2) / det, (a1 * c2 - a2 * c1) / det)
}

/// Signed area of a polygon (shoelace). Negative for clockwise winding in a y-up frame.
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Area centroid of a simple polygon (shoelace formula).
pub fn polygon_centroid(points: &[Vec2]) -> Vec2 {
    let n = points.len();
    let mut centroid = Vec2::ZERO;
    let mut area = 0.0;

    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        area += cross;
        centroid += (a + b) * cross;
    }

    area *= 0.5;
    centroid / (6.0 * area)
}

/// Mean of the polygon's vertices. Cheaper than [`polygon_centroid`], exact for regular shapes.
pub fn polygon_centroid_fast(points: &[Vec2]) -> Vec2 {
    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + *p);
    sum / points.len() as f32
}

/// Rotate `point` about `center` by `degrees` (counter-clockwise in a y-up frame).
#[inline]
pub fn rotate_around(point: Vec2, center: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let d = point - center;
    Vec2::new(center.x + d.x * cos - d.y * sin, center.y + d.x * sin + d.y * cos)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Map `value` from `[from_min, from_max]` onto `[to_min, to_max]`.
#[inline]
pub fn remap(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    (value - from_min) / (from_max - from_min) * (to_max - to_min) + to_min
}

#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

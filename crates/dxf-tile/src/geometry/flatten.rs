//! Curve flattening
//!
//! Pure functions from curve parameters and a [`SamplingPolicy`] to an
//! ordered point sequence. Flattening is lossy and one-way.

use crate::constants::{MAX_CURVE_SEGMENTS, MIN_CIRCLE_SEGMENTS, MIN_CURVE_SEGMENTS};
use crate::drawing::Vertex;
use crate::types::DrawingUnits;
use std::f64::consts::TAU;

use super::Point2;

/// How finely curves are sampled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingPolicy {
    /// Longest allowed chord, in world units
    pub max_chord: f64,
}

impl SamplingPolicy {
    pub fn new(max_chord: f64) -> Self {
        Self { max_chord }
    }

    /// Policy whose chords are at most `tolerance_mm` long on paper
    pub fn from_tolerance_mm(tolerance_mm: f64, units: DrawingUnits) -> Self {
        Self::new(units.mm_to_world(tolerance_mm))
    }

    /// Segment count for a curve of the given length
    pub fn segments_for(&self, length: f64, min_segments: usize) -> usize {
        let by_length = if self.max_chord > 0.0 && length.is_finite() {
            (length.abs() / self.max_chord).ceil()
        } else {
            0.0
        };
        // `as` saturates, so huge lengths land on the cap
        (by_length as usize).clamp(min_segments, MAX_CURVE_SEGMENTS)
    }
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Counter-clockwise sweep from `start` to `end` in degrees, in `(0, 360]`.
/// Equal angles mean a full turn.
pub fn arc_sweep_degrees(start_angle: f64, end_angle: f64) -> f64 {
    let sweep = (end_angle - start_angle).rem_euclid(360.0);
    if sweep == 0.0 { 360.0 } else { sweep }
}

/// Closed loop around a circle; the last point repeats the first
pub fn flatten_circle(center: Point2, radius: f64, policy: &SamplingPolicy) -> Vec<Point2> {
    let segments = policy.segments_for(TAU * radius, MIN_CIRCLE_SEGMENTS);
    sample_arc(center, radius, 0.0, TAU, segments)
}

/// Counter-clockwise arc with angles in degrees
pub fn flatten_arc(
    center: Point2,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    policy: &SamplingPolicy,
) -> Vec<Point2> {
    let sweep = arc_sweep_degrees(start_angle, end_angle).to_radians();
    let min_segments =
        ((MIN_CIRCLE_SEGMENTS as f64 * sweep / TAU).ceil() as usize).max(MIN_CURVE_SEGMENTS);
    let segments = policy.segments_for(radius * sweep, min_segments);
    sample_arc(center, radius, start_angle.to_radians(), sweep, segments)
}

fn sample_arc(
    center: Point2,
    radius: f64,
    start_rad: f64,
    sweep_rad: f64,
    segments: usize,
) -> Vec<Point2> {
    (0..=segments)
        .map(|k| {
            let angle = start_rad + sweep_rad * k as f64 / segments as f64;
            Point2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

/// Elliptical arc. `major_axis` is relative to `center`, parameters in radians.
pub fn flatten_ellipse(
    center: Point2,
    major_axis: Point2,
    ratio: f64,
    start_param: f64,
    end_param: f64,
    policy: &SamplingPolicy,
) -> Vec<Point2> {
    let minor_axis = Point2::new(-major_axis.y * ratio, major_axis.x * ratio);

    let mut sweep = (end_param - start_param).rem_euclid(TAU);
    if sweep.abs() < 1e-12 {
        sweep = TAU;
    }

    // Ramanujan's perimeter approximation
    let a = major_axis.x.hypot(major_axis.y);
    let b = a * ratio.abs();
    let h = ((a - b) / (a + b)).powi(2);
    let perimeter =
        std::f64::consts::PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()));
    let length = if perimeter.is_finite() {
        perimeter * sweep / TAU
    } else {
        0.0
    };

    let min_segments =
        ((MIN_CIRCLE_SEGMENTS as f64 * sweep / TAU).ceil() as usize).max(MIN_CURVE_SEGMENTS);
    let segments = policy.segments_for(length, min_segments);

    (0..=segments)
        .map(|k| {
            let t = start_param + sweep * k as f64 / segments as f64;
            center + major_axis * t.cos() + minor_axis * t.sin()
        })
        .collect()
}

/// Spline definition as stored in the drawing
#[derive(Debug, Clone, Copy)]
pub struct SplineDef<'a> {
    pub degree: usize,
    pub knots: &'a [f64],
    pub control_points: &'a [Point2],
    pub weights: &'a [f64],
    pub fit_points: &'a [Point2],
    pub closed: bool,
}

impl SplineDef<'_> {
    /// Whether the knot vector and weights fit the control points
    fn is_evaluable(&self) -> bool {
        let n = self.control_points.len();
        self.degree >= 1
            && n > self.degree
            && self.knots.len() == n + self.degree + 1
            && (self.weights.is_empty() || self.weights.len() == n)
            && self.knots[self.degree] < self.knots[n]
    }

    fn weight(&self, index: usize) -> f64 {
        self.weights.get(index).copied().unwrap_or(1.0)
    }

    /// Evaluate the (rational) B-spline at `t` with De Boor's algorithm
    fn point_at(&self, t: f64) -> Point2 {
        let p = self.degree;
        let n = self.control_points.len();
        let knots = self.knots;

        // Last span whose start is <= t, skipping empty spans at the end
        let mut span = p;
        for k in p..n {
            if knots[k] <= t && knots[k] < knots[k + 1] {
                span = k;
            }
        }

        // Homogeneous coordinates (wx, wy, w)
        let mut d: Vec<(f64, f64, f64)> = (0..=p)
            .map(|j| {
                let index = j + span - p;
                let w = self.weight(index);
                let cp = self.control_points[index];
                (cp.x * w, cp.y * w, w)
            })
            .collect();

        for r in 1..=p {
            for j in (r..=p).rev() {
                let i = j + span - p;
                let denom = knots[i + p + 1 - r] - knots[i];
                let alpha = if denom.abs() < f64::EPSILON {
                    0.0
                } else {
                    (t - knots[i]) / denom
                };
                let prev = d[j - 1];
                let cur = d[j];
                d[j] = (
                    (1.0 - alpha) * prev.0 + alpha * cur.0,
                    (1.0 - alpha) * prev.1 + alpha * cur.1,
                    (1.0 - alpha) * prev.2 + alpha * cur.2,
                );
            }
        }

        let (x, y, w) = d[p];
        if w.abs() < f64::EPSILON {
            Point2::new(x, y)
        } else {
            Point2::new(x / w, y / w)
        }
    }
}

/// Flatten a spline.
///
/// Falls back to the fit points, then to the control polygon, when the knot
/// vector does not describe a valid B-spline.
pub fn flatten_spline(spline: &SplineDef<'_>, policy: &SamplingPolicy) -> Vec<Point2> {
    let mut points = if spline.is_evaluable() {
        let t0 = spline.knots[spline.degree];
        let t1 = spline.knots[spline.control_points.len()];
        let hull_length = polyline_length(spline.control_points);
        let segments = policy.segments_for(hull_length, MIN_CURVE_SEGMENTS);
        (0..=segments)
            .map(|k| spline.point_at(t0 + (t1 - t0) * k as f64 / segments as f64))
            .collect()
    } else if spline.fit_points.len() >= 2 {
        spline.fit_points.to_vec()
    } else {
        spline.control_points.to_vec()
    };

    if spline.closed && points.len() > 2 && points.first() != points.last() {
        points.push(points[0]);
    }
    points
}

/// Points along a polyline with DXF bulges, arcs sampled.
///
/// For closed polylines the segment from the last vertex back to the first
/// is included, but the closing point itself is not repeated.
pub fn flatten_bulge_polyline(
    vertices: &[Vertex],
    closed: bool,
    policy: &SamplingPolicy,
) -> Vec<Point2> {
    let Some(first) = vertices.first() else {
        return Vec::new();
    };

    let segment_count = if closed {
        vertices.len()
    } else {
        vertices.len() - 1
    };

    let mut points = vec![first.point];
    for i in 0..segment_count {
        let from = vertices[i];
        let to = vertices[(i + 1) % vertices.len()];
        if from.bulge.abs() < 1e-12 {
            points.push(to.point);
        } else {
            points.extend(flatten_bulge(from.point, to.point, from.bulge, policy));
        }
    }

    if closed && points.len() > 1 {
        points.pop();
    }
    points
}

/// Arc from `from` to `to` described by a bulge, excluding `from`.
pub fn flatten_bulge(from: Point2, to: Point2, bulge: f64, policy: &SamplingPolicy) -> Vec<Point2> {
    let chord = from.distance_to(to);
    if chord < f64::EPSILON {
        return vec![to];
    }

    // Included angle, positive = counter-clockwise
    let theta = 4.0 * bulge.atan();
    let mid = from.lerp(to, 0.5);
    let left_normal = Point2::new(-(to.y - from.y) / chord, (to.x - from.x) / chord);
    let center = mid + left_normal * (chord / 2.0 / (theta / 2.0).tan());

    let radius = from.distance_to(center);
    let start = (from.y - center.y).atan2(from.x - center.x);
    let min_segments =
        ((MIN_CIRCLE_SEGMENTS as f64 * theta.abs() / TAU).ceil() as usize).max(2);
    let segments = policy.segments_for(radius * theta.abs(), min_segments);

    let mut points: Vec<Point2> = (1..segments)
        .map(|k| {
            let angle = start + theta * k as f64 / segments as f64;
            Point2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect();
    points.push(to);
    points
}

/// Total length of an open polyline
pub fn polyline_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(w[1])).sum()
}

// =============================================================================
// Tests
// =============================================================================

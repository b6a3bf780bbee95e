//! Linetype resolution and dash generation
//!
//! Patterns are walked in world units before the world-to-page transform,
//! so dash lengths scale exactly like the geometry they decorate. The
//! pattern phase restarts at the start of every primitive on every tile.

use crate::constants::{DASH_EPSILON, MAX_DASH_CYCLES};
use crate::drawing::{BYBLOCK, BYLAYER, CONTINUOUS, Drawing, Entity};
use crate::geometry::Point2;

/// Dash pattern: positive = dash, negative = gap, zero = dot (world units)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinetypePattern {
    pub elements: Vec<f64>,
}

impl LinetypePattern {
    pub fn new(elements: Vec<f64>) -> Self {
        Self { elements }
    }

    /// Length of one full pattern cycle
    pub fn cycle_length(&self) -> f64 {
        self.elements.iter().map(|e| e.abs()).sum()
    }

    /// A pattern with nothing to repeat draws as a solid line
    pub fn is_continuous(&self) -> bool {
        !self.cycle_length().is_finite() || self.cycle_length() <= DASH_EPSILON
    }
}

/// Linetype after BYLAYER has been followed
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLinetype {
    /// Upper-cased linetype name
    pub name: String,
    /// Dash pattern, `None` when the line is drawn solid
    pub pattern: Option<LinetypePattern>,
}

impl ResolvedLinetype {
    pub fn continuous() -> Self {
        Self {
            name: CONTINUOUS.to_string(),
            pattern: None,
        }
    }

    pub fn dashed(name: impl Into<String>, pattern: LinetypePattern) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            pattern: Some(pattern),
        }
    }

    pub fn is_continuous(&self) -> bool {
        self.pattern.is_none()
    }
}

/// Effective linetype of an entity.
///
/// The entity's own linetype wins unless it is BYLAYER (or blank), in which
/// case the layer default is used. BYBLOCK, CONTINUOUS and names missing
/// from the linetype table all draw solid.
pub fn resolve_linetype(drawing: &Drawing, entity: &Entity) -> ResolvedLinetype {
    let mut name = entity.linetype.trim();
    if name.is_empty() || name.eq_ignore_ascii_case(BYLAYER) {
        name = drawing
            .layer(&entity.layer)
            .map(|layer| layer.linetype.trim())
            .unwrap_or(CONTINUOUS);
    }

    if name.is_empty()
        || name.eq_ignore_ascii_case(BYLAYER)
        || name.eq_ignore_ascii_case(BYBLOCK)
        || name.eq_ignore_ascii_case(CONTINUOUS)
    {
        return ResolvedLinetype::continuous();
    }

    match drawing.linetype(name) {
        Some(pattern) if !pattern.is_continuous() => {
            ResolvedLinetype::dashed(name, pattern.clone())
        }
        Some(_) => ResolvedLinetype {
            name: name.to_ascii_uppercase(),
            pattern: None,
        },
        None => {
            log::debug!("Linetype '{}' is not defined; drawing it solid", name);
            ResolvedLinetype {
                name: name.to_ascii_uppercase(),
                pattern: None,
            }
        }
    }
}

/// Arc-length intervals covered by dashes along a path of `total_length`.
///
/// The pattern repeats from the start of the path. A dash that starts
/// exactly at the end of the path is reported as a zero-length interval.
pub fn dash_intervals(total_length: f64, pattern: &LinetypePattern) -> Vec<(f64, f64)> {
    if pattern.is_continuous() || total_length <= 0.0 {
        return vec![(0.0, total_length.max(0.0))];
    }

    let cycles = total_length / pattern.cycle_length();
    if cycles > MAX_DASH_CYCLES {
        log::warn!(
            "Dash pattern repeats {:.0} times along one path; drawing it solid",
            cycles
        );
        return vec![(0.0, total_length)];
    }

    let mut intervals = Vec::new();
    let mut pos = 0.0;
    'walk: loop {
        for &element in &pattern.elements {
            if pos > total_length + DASH_EPSILON {
                break 'walk;
            }
            let start = pos.min(total_length);
            pos += element.abs();
            if element >= 0.0 {
                intervals.push((start, pos.min(total_length)));
            }
        }
    }
    intervals
}

/// Cut a polyline into the sub-polylines drawn by its linetype.
///
/// Continuous linetypes return the whole path. Zero-length dashes inside
/// the path (dots) are kept as two identical points; the zero-length dash a
/// pattern may leave exactly at the path end is dropped.
pub fn resolve_dashes(path: &[Point2], pattern: Option<&LinetypePattern>) -> Vec<Vec<Point2>> {
    if path.len() < 2 {
        return Vec::new();
    }
    let Some(pattern) = pattern.filter(|p| !p.is_continuous()) else {
        return vec![path.to_vec()];
    };

    let mut cumulative = Vec::with_capacity(path.len());
    let mut total = 0.0;
    cumulative.push(0.0);
    for w in path.windows(2) {
        total += w[0].distance_to(w[1]);
        cumulative.push(total);
    }

    dash_intervals(total, pattern)
        .into_iter()
        .filter(|&(start, _)| start < total - DASH_EPSILON)
        .map(|(start, end)| sub_path(path, &cumulative, start, end))
        .collect()
}

/// Portion of `path` between two arc-length positions
fn sub_path(path: &[Point2], cumulative: &[f64], start: f64, end: f64) -> Vec<Point2> {
    let mut points = vec![point_at(path, cumulative, start)];
    for (i, &s) in cumulative.iter().enumerate() {
        if s > start && s < end {
            points.push(path[i]);
        }
    }
    points.push(point_at(path, cumulative, end));
    points
}

fn point_at(path: &[Point2], cumulative: &[f64], s: f64) -> Point2 {
    // First segment whose end reaches s
    let index = cumulative
        .iter()
        .skip(1)
        .position(|&c| c >= s)
        .unwrap_or(cumulative.len() - 2);
    let seg_start = cumulative[index];
    let seg_len = cumulative[index + 1] - seg_start;
    if seg_len <= 0.0 {
        return path[index];
    }
    path[index].lerp(path[index + 1], (s - seg_start) / seg_len)
}

// =============================================================================
// Tests
// =============================================================================

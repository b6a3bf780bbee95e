//! Axis-aligned extents of primitives

use crate::types::{Result, TileError};

use super::{Point2, Primitive, Shape};

/// Axis-aligned bounding box in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn from_point(point: Point2) -> Self {
        Self::new(point.x, point.y, point.x, point.y)
    }

    /// Box around every finite point, or `None` if there are none
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        let mut bounds: Option<BoundingBox> = None;
        for &point in points {
            if !point.is_finite() {
                continue;
            }
            match bounds.as_mut() {
                Some(b) => b.include_point(point),
                None => bounds = Some(BoundingBox::from_point(point)),
            }
        }
        bounds
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn include_point(&mut self, point: Point2) {
        self.min_x = self.min_x.min(point.x);
        self.min_y = self.min_y.min(point.y);
        self.max_x = self.max_x.max(point.x);
        self.max_y = self.max_y.max(point.y);
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Whether `point` lies inside, allowing `tolerance` of slack
    pub fn contains(&self, point: Point2, tolerance: f64) -> bool {
        point.x >= self.min_x - tolerance
            && point.x <= self.max_x + tolerance
            && point.y >= self.min_y - tolerance
            && point.y <= self.max_y + tolerance
    }

    /// Whether the two closed boxes share any point
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

/// Extent of a single primitive.
///
/// Arcs use the box of their full circle. This overestimates, which can add
/// tiles, but never misses geometry.
pub fn primitive_bounds(primitive: &Primitive) -> Option<BoundingBox> {
    match &primitive.shape {
        Shape::Polyline { points, .. } | Shape::Curve { points, .. } => {
            BoundingBox::from_points(points)
        }
        Shape::Circle { center, radius, .. } | Shape::Arc { center, radius, .. } => {
            circle_bounds(*center, *radius)
        }
        Shape::Point(point) => point.is_finite().then(|| BoundingBox::from_point(*point)),
    }
}

fn circle_bounds(center: Point2, radius: f64) -> Option<BoundingBox> {
    if !center.is_finite() || !radius.is_finite() {
        return None;
    }
    let r = radius.abs();
    Some(BoundingBox::new(
        center.x - r,
        center.y - r,
        center.x + r,
        center.y + r,
    ))
}

/// Extent of a set of primitives
pub fn drawing_bounds(primitives: &[Primitive]) -> Result<BoundingBox> {
    primitives
        .iter()
        .filter_map(primitive_bounds)
        .reduce(|acc, b| acc.union(&b))
        .ok_or(TileError::NoGeometry)
}

// =============================================================================
// Tests
// =============================================================================

//! Primitive data types
//!
//! These types are the normalized form of drawing entities, shared by the
//! bounding box calculator, the dash resolver and the page composer.

use crate::linetype::ResolvedLinetype;
use std::ops::{Add, Mul, Sub};

/// A point in world units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point2) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation: `t = 0` is `self`, `t = 1` is `other`
    pub fn lerp(self, other: Point2, t: f64) -> Point2 {
        Point2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;

    fn mul(self, rhs: f64) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

/// Normalized geometry of one entity
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Lines and polylines (lines are 2-point polylines)
    Polyline { points: Vec<Point2>, closed: bool },
    /// Full circle; `outline` is the flattened closed loop
    Circle {
        center: Point2,
        radius: f64,
        outline: Vec<Point2>,
    },
    /// Counter-clockwise arc in degrees; `outline` is the flattened arc
    Arc {
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        outline: Vec<Point2>,
    },
    /// Spline or ellipse sampled into a polyline
    Curve { points: Vec<Point2>, closed: bool },
    /// Single coordinate, only contributes to the drawing extent
    Point(Point2),
}

impl Shape {
    /// The polyline to stroke for this shape, closing point included.
    ///
    /// Returns `None` for points, which are never drawn.
    pub fn stroke_path(&self) -> Option<Vec<Point2>> {
        match self {
            Shape::Polyline { points, closed } | Shape::Curve { points, closed } => {
                let mut path = points.clone();
                if *closed && points.len() > 2 && points.first() != points.last() {
                    path.push(points[0]);
                }
                Some(path)
            }
            Shape::Circle { outline, .. } | Shape::Arc { outline, .. } => Some(outline.clone()),
            Shape::Point(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Polyline { .. } => "polyline",
            Shape::Circle { .. } => "circle",
            Shape::Arc { .. } => "arc",
            Shape::Curve { .. } => "curve",
            Shape::Point(_) => "point",
        }
    }
}

/// A shape with the layer it came from and its resolved linetype
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub layer: String,
    pub linetype: ResolvedLinetype,
}

impl Primitive {
    pub fn new(shape: Shape, layer: impl Into<String>, linetype: ResolvedLinetype) -> Self {
        Self {
            shape,
            layer: layer.into(),
            linetype,
        }
    }
}

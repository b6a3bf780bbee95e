//! In-memory drawing model
//!
//! This is the read-only view of a parsed drawing the tiler works from:
//! layers, entities and the linetype table. `tile::io` fills it from a DXF
//! file; tests build it by hand.

use crate::geometry::Point2;
use crate::linetype::LinetypePattern;
use std::collections::HashMap;

/// Linetype name meaning "use the owning layer's linetype"
pub const BYLAYER: &str = "BYLAYER";

/// Linetype name meaning "use the owning block's linetype"
pub const BYBLOCK: &str = "BYBLOCK";

/// Name of the solid linetype
pub const CONTINUOUS: &str = "CONTINUOUS";

/// A drawing layer
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    /// Default linetype for entities that say BYLAYER
    pub linetype: String,
}

impl Layer {
    pub fn new(name: impl Into<String>, linetype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            linetype: linetype.into(),
        }
    }
}

/// A polyline vertex with the DXF bulge of the segment that starts here
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub point: Point2,
    /// Tangent of a quarter of the segment's included angle (0 = straight)
    pub bulge: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            point: Point2::new(x, y),
            bulge: 0.0,
        }
    }

    pub fn with_bulge(x: f64, y: f64, bulge: f64) -> Self {
        Self {
            point: Point2::new(x, y),
            bulge,
        }
    }
}

/// Geometric content of an entity
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Line {
        start: Point2,
        end: Point2,
    },
    Polyline {
        vertices: Vec<Vertex>,
        closed: bool,
    },
    Circle {
        center: Point2,
        radius: f64,
    },
    /// Counter-clockwise arc, angles in degrees
    Arc {
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    /// Elliptical arc, parameters in radians
    Ellipse {
        center: Point2,
        /// Major axis end point relative to the center
        major_axis: Point2,
        /// Minor axis length divided by major axis length
        ratio: f64,
        start_param: f64,
        end_param: f64,
    },
    Spline {
        degree: usize,
        knots: Vec<f64>,
        control_points: Vec<Point2>,
        /// Rational weights; empty means all 1.0
        weights: Vec<f64>,
        fit_points: Vec<Point2>,
        closed: bool,
    },
    Point {
        location: Point2,
    },
    /// Anything the tiler does not draw (text, hatches, block inserts...)
    Unsupported {
        kind: String,
    },
}

impl EntityKind {
    /// DXF-style type name, used in log messages
    pub fn type_name(&self) -> &str {
        match self {
            EntityKind::Line { .. } => "LINE",
            EntityKind::Polyline { .. } => "LWPOLYLINE",
            EntityKind::Circle { .. } => "CIRCLE",
            EntityKind::Arc { .. } => "ARC",
            EntityKind::Ellipse { .. } => "ELLIPSE",
            EntityKind::Spline { .. } => "SPLINE",
            EntityKind::Point { .. } => "POINT",
            EntityKind::Unsupported { kind } => kind,
        }
    }
}

/// A drawing entity with its layer and linetype reference
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub layer: String,
    /// Linetype name, or BYLAYER / BYBLOCK
    pub linetype: String,
    pub kind: EntityKind,
}

impl Entity {
    /// Entity on `layer` that follows the layer's linetype
    pub fn new(layer: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            layer: layer.into(),
            linetype: BYLAYER.to_string(),
            kind,
        }
    }

    /// Override the linetype for this entity only
    pub fn with_linetype(mut self, linetype: impl Into<String>) -> Self {
        self.linetype = linetype.into();
        self
    }
}

/// A parsed drawing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    pub layers: Vec<Layer>,
    pub entities: Vec<Entity>,
    /// Linetype table keyed by upper-cased name
    linetypes: HashMap<String, LinetypePattern>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Register a linetype; names are case-insensitive
    pub fn add_linetype(&mut self, name: &str, pattern: LinetypePattern) {
        self.linetypes.insert(name.to_ascii_uppercase(), pattern);
    }

    pub fn linetype(&self, name: &str) -> Option<&LinetypePattern> {
        self.linetypes.get(&name.to_ascii_uppercase())
    }

    /// Layer names are case-insensitive in DXF
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers
            .iter()
            .find(|layer| layer.name.eq_ignore_ascii_case(name))
    }

    pub fn linetype_count(&self) -> usize {
        self.linetypes.len()
    }
}

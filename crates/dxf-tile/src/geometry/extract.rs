//! Entity to primitive conversion
//!
//! Walks the drawing's entities in order, applies the layer allow-list and
//! the linetype filter, and normalizes every supported entity into a
//! [`Primitive`]. Unsupported entity kinds are counted, never fatal.

use std::collections::HashSet;

use crate::drawing::{Drawing, Entity, EntityKind};
use crate::linetype::{ResolvedLinetype, resolve_linetype};

use super::flatten::{
    SamplingPolicy, SplineDef, flatten_arc, flatten_bulge_polyline, flatten_circle,
    flatten_ellipse, flatten_spline,
};
use super::{Point2, Primitive, Shape};

/// Which entities take part in tiling
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityFilter {
    /// Layer allow-list; `None` keeps every layer. Names match exactly.
    pub layers: Option<Vec<String>>,
    /// Drop entities whose effective linetype is dashed
    pub continuous_only: bool,
}

impl EntityFilter {
    pub fn allows_layer(&self, layer: &str) -> bool {
        match &self.layers {
            Some(layers) => layers.iter().any(|name| name == layer),
            None => true,
        }
    }
}

/// Result of [`extract_primitives`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Primitives in drawing order
    pub primitives: Vec<Primitive>,
    pub skipped_by_layer: usize,
    pub skipped_by_linetype: usize,
    /// Unsupported kinds plus entities with no usable geometry
    pub skipped_unsupported: usize,
}

/// Convert a drawing's entities into primitives.
pub fn extract_primitives(
    drawing: &Drawing,
    filter: &EntityFilter,
    policy: &SamplingPolicy,
) -> Extraction {
    let mut extraction = Extraction::default();
    let mut warned_kinds: HashSet<String> = HashSet::new();

    for entity in &drawing.entities {
        if !filter.allows_layer(&entity.layer) {
            extraction.skipped_by_layer += 1;
            continue;
        }

        let linetype = resolve_linetype(drawing, entity);
        if filter.continuous_only && !linetype.is_continuous() {
            log::debug!(
                "Skipping {} on layer '{}': linetype {} is not continuous",
                entity.kind.type_name(),
                entity.layer,
                linetype.name
            );
            extraction.skipped_by_linetype += 1;
            continue;
        }

        if let EntityKind::Unsupported { kind } = &entity.kind {
            if warned_kinds.insert(kind.clone()) {
                log::warn!("Skipping unsupported entity type {}", kind);
            } else {
                log::debug!("Skipping unsupported entity type {}", kind);
            }
            extraction.skipped_unsupported += 1;
            continue;
        }

        match to_primitive(entity, linetype, policy) {
            Some(primitive) => extraction.primitives.push(primitive),
            None => {
                log::debug!(
                    "Skipping {} on layer '{}': no usable geometry",
                    entity.kind.type_name(),
                    entity.layer
                );
                extraction.skipped_unsupported += 1;
            }
        }
    }

    extraction
}

fn to_primitive(
    entity: &Entity,
    linetype: ResolvedLinetype,
    policy: &SamplingPolicy,
) -> Option<Primitive> {
    let shape = match &entity.kind {
        EntityKind::Line { start, end } => {
            finite_points(&[*start, *end])?;
            Shape::Polyline {
                points: vec![*start, *end],
                closed: false,
            }
        }
        EntityKind::Polyline { vertices, closed } => {
            let points = flatten_bulge_polyline(vertices, *closed, policy);
            finite_points(&points)?;
            Shape::Polyline {
                points,
                closed: *closed,
            }
        }
        EntityKind::Circle { center, radius } => {
            valid_circle(*center, *radius)?;
            Shape::Circle {
                center: *center,
                radius: *radius,
                outline: flatten_circle(*center, *radius, policy),
            }
        }
        EntityKind::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        } => {
            valid_circle(*center, *radius)?;
            if !start_angle.is_finite() || !end_angle.is_finite() {
                return None;
            }
            Shape::Arc {
                center: *center,
                radius: *radius,
                start_angle: *start_angle,
                end_angle: *end_angle,
                outline: flatten_arc(*center, *radius, *start_angle, *end_angle, policy),
            }
        }
        EntityKind::Ellipse {
            center,
            major_axis,
            ratio,
            start_param,
            end_param,
        } => {
            let points = flatten_ellipse(
                *center,
                *major_axis,
                *ratio,
                *start_param,
                *end_param,
                policy,
            );
            finite_points(&points)?;
            let full_turn = (end_param - start_param).abs() >= std::f64::consts::TAU - 1e-9
                || (end_param - start_param).abs() < 1e-12;
            Shape::Curve {
                points,
                closed: full_turn,
            }
        }
        EntityKind::Spline {
            degree,
            knots,
            control_points,
            weights,
            fit_points,
            closed,
        } => {
            let points = flatten_spline(
                &SplineDef {
                    degree: *degree,
                    knots,
                    control_points,
                    weights,
                    fit_points,
                    closed: *closed,
                },
                policy,
            );
            finite_points(&points)?;
            Shape::Curve {
                points,
                closed: *closed,
            }
        }
        EntityKind::Point { location } => {
            if !location.is_finite() {
                return None;
            }
            Shape::Point(*location)
        }
        EntityKind::Unsupported { .. } => return None,
    };

    Some(Primitive::new(shape, entity.layer.clone(), linetype))
}

/// `Some(())` when there are at least two points and all are finite
fn finite_points(points: &[Point2]) -> Option<()> {
    (points.len() >= 2 && points.iter().all(|p| p.is_finite())).then_some(())
}

fn valid_circle(center: Point2, radius: f64) -> Option<()> {
    (center.is_finite() && radius.is_finite() && radius > 0.0).then_some(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{Layer, Vertex};
    use crate::linetype::LinetypePattern;

    fn line(layer: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Entity {
        Entity::new(
            layer,
            EntityKind::Line {
                start: Point2::new(x0, y0),
                end: Point2::new(x1, y1),
            },
        )
    }

    fn sample_drawing() -> Drawing {
        let mut drawing = Drawing::new();
        drawing.add_linetype("DASHED", LinetypePattern::new(vec![5.0, -3.0]));
        drawing.add_layer(Layer::new("CUT", "CONTINUOUS"));
        drawing.add_layer(Layer::new("FOLD", "DASHED"));
        drawing.add_entity(line("CUT", 0.0, 0.0, 10.0, 0.0));
        drawing.add_entity(line("FOLD", 0.0, 5.0, 10.0, 5.0));
        drawing.add_entity(Entity::new(
            "CUT",
            EntityKind::Unsupported {
                kind: "TEXT".to_string(),
            },
        ));
        drawing.add_entity(Entity::new(
            "CUT",
            EntityKind::Circle {
                center: Point2::new(5.0, 5.0),
                radius: 2.0,
            },
        ));
        drawing
    }

    #[test]
    fn test_line_becomes_two_point_polyline() {
        let drawing = sample_drawing();
        let extraction =
            extract_primitives(&drawing, &EntityFilter::default(), &SamplingPolicy::default());
        assert_eq!(
            extraction.primitives[0].shape,
            Shape::Polyline {
                points: vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)],
                closed: false,
            }
        );
        assert_eq!(extraction.primitives.len(), 3);
        assert_eq!(extraction.skipped_unsupported, 1);
    }

    #[test]
    fn test_order_and_linetypes_preserved() {
        let drawing = sample_drawing();
        let extraction =
            extract_primitives(&drawing, &EntityFilter::default(), &SamplingPolicy::default());
        let kinds: Vec<_> = extraction
            .primitives
            .iter()
            .map(|p| p.shape.kind_name())
            .collect();
        assert_eq!(kinds, vec!["polyline", "polyline", "circle"]);
        assert!(extraction.primitives[0].linetype.is_continuous());
        assert_eq!(extraction.primitives[1].linetype.name, "DASHED");
    }

    #[test]
    fn test_layer_allow_list() {
        let drawing = sample_drawing();
        let filter = EntityFilter {
            layers: Some(vec!["FOLD".to_string()]),
            continuous_only: false,
        };
        let extraction = extract_primitives(&drawing, &filter, &SamplingPolicy::default());
        assert_eq!(extraction.primitives.len(), 1);
        assert_eq!(extraction.primitives[0].layer, "FOLD");
        assert_eq!(extraction.skipped_by_layer, 3);
    }

    #[test]
    fn test_continuous_only_drops_dashed() {
        let drawing = sample_drawing();
        let filter = EntityFilter {
            layers: None,
            continuous_only: true,
        };
        let extraction = extract_primitives(&drawing, &filter, &SamplingPolicy::default());
        assert_eq!(extraction.primitives.len(), 2);
        assert_eq!(extraction.skipped_by_linetype, 1);
        assert!(extraction.primitives.iter().all(|p| p.layer == "CUT"));
    }

    #[test]
    fn test_only_unsupported_yields_nothing() {
        let mut drawing = Drawing::new();
        for kind in ["TEXT", "HATCH", "TEXT"] {
            drawing.add_entity(Entity::new(
                "0",
                EntityKind::Unsupported {
                    kind: kind.to_string(),
                },
            ));
        }
        let extraction =
            extract_primitives(&drawing, &EntityFilter::default(), &SamplingPolicy::default());
        assert!(extraction.primitives.is_empty());
        assert_eq!(extraction.skipped_unsupported, 3);
    }

    #[test]
    fn test_closed_polyline_keeps_flag() {
        let mut drawing = Drawing::new();
        drawing.add_entity(Entity::new(
            "0",
            EntityKind::Polyline {
                vertices: vec![
                    Vertex::new(0.0, 0.0),
                    Vertex::new(10.0, 0.0),
                    Vertex::new(10.0, 10.0),
                ],
                closed: true,
            },
        ));
        let extraction =
            extract_primitives(&drawing, &EntityFilter::default(), &SamplingPolicy::default());
        let shape = &extraction.primitives[0].shape;
        assert!(matches!(shape, Shape::Polyline { closed: true, points } if points.len() == 3));
        let path = shape.stroke_path().unwrap();
        assert_eq!(path.first(), path.last());
    }

    #[test]
    fn test_degenerate_entities_are_skipped() {
        let mut drawing = Drawing::new();
        drawing.add_entity(Entity::new(
            "0",
            EntityKind::Circle {
                center: Point2::new(0.0, 0.0),
                radius: 0.0,
            },
        ));
        drawing.add_entity(Entity::new(
            "0",
            EntityKind::Polyline {
                vertices: vec![Vertex::new(1.0, 1.0)],
                closed: false,
            },
        ));
        drawing.add_entity(line("0", f64::NAN, 0.0, 1.0, 1.0));
        let extraction =
            extract_primitives(&drawing, &EntityFilter::default(), &SamplingPolicy::default());
        assert!(extraction.primitives.is_empty());
        assert_eq!(extraction.skipped_unsupported, 3);
    }

    #[test]
    fn test_full_ellipse_is_closed_curve() {
        let mut drawing = Drawing::new();
        drawing.add_entity(Entity::new(
            "0",
            EntityKind::Ellipse {
                center: Point2::new(0.0, 0.0),
                major_axis: Point2::new(10.0, 0.0),
                ratio: 0.5,
                start_param: 0.0,
                end_param: std::f64::consts::TAU,
            },
        ));
        let extraction =
            extract_primitives(&drawing, &EntityFilter::default(), &SamplingPolicy::default());
        assert!(matches!(
            extraction.primitives[0].shape,
            Shape::Curve { closed: true, .. }
        ));
    }
}

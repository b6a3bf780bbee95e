//! Drawing and document I/O

use crate::drawing::{BYLAYER, Drawing, Entity, EntityKind, Layer, Vertex};
use crate::geometry::Point2;
use crate::linetype::LinetypePattern;
use crate::types::*;
use dxf::entities::EntityType;
use lopdf::Document;
use std::fmt::{self, Write};
use std::io::Cursor;
use std::path::Path;

/// Load a DXF drawing
pub async fn load_drawing(path: impl AsRef<Path>) -> Result<Drawing> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let drawing = tokio::task::spawn_blocking(move || parse_dxf(&bytes)).await??;
    log::debug!(
        "Loaded {}: {} layers, {} entities, {} linetypes",
        path.display(),
        drawing.layers.len(),
        drawing.entities.len(),
        drawing.linetype_count()
    );
    Ok(drawing)
}

/// Parse DXF bytes into a [`Drawing`]
pub fn parse_dxf(bytes: &[u8]) -> Result<Drawing> {
    let source = dxf::Drawing::load(&mut Cursor::new(bytes))
        .map_err(|e| TileError::Dxf(e.to_string()))?;
    Ok(convert_drawing(&source))
}

/// Save the tiled document.
///
/// The whole file is serialized in memory first, so the output path is only
/// touched once the document is complete.
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let pages = doc.get_pages().len();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok::<_, TileError>(buffer)
    })
    .await??;
    tokio::fs::write(&path, &bytes).await?;
    log::info!(
        "Wrote {} pages ({} bytes) to {}",
        pages,
        bytes.len(),
        path.display()
    );
    Ok(())
}

fn convert_drawing(source: &dxf::Drawing) -> Drawing {
    let mut drawing = Drawing::new();

    for layer in source.layers() {
        drawing.add_layer(Layer::new(
            layer.name.clone(),
            layer.line_type_name.clone(),
        ));
    }

    for line_type in source.line_types() {
        drawing.add_linetype(
            &line_type.name,
            LinetypePattern::new(line_type.dash_dot_space_lengths.clone()),
        );
    }

    // Model space only; paper space holds layouts and title blocks
    for entity in source.entities().filter(|e| !e.common.is_in_paper_space) {
        let linetype = if entity.common.line_type_name.trim().is_empty() {
            BYLAYER.to_string()
        } else {
            entity.common.line_type_name.clone()
        };
        drawing.add_entity(
            Entity::new(entity.common.layer.clone(), convert_entity(&entity.specific))
                .with_linetype(linetype),
        );
    }

    drawing
}

fn point(p: &dxf::Point) -> Point2 {
    Point2::new(p.x, p.y)
}

fn convert_entity(specific: &EntityType) -> EntityKind {
    match specific {
        EntityType::Line(line) => EntityKind::Line {
            start: point(&line.p1),
            end: point(&line.p2),
        },
        EntityType::LwPolyline(poly) => EntityKind::Polyline {
            vertices: poly
                .vertices
                .iter()
                .map(|v| Vertex::with_bulge(v.x, v.y, v.bulge))
                .collect(),
            closed: poly.is_closed(),
        },
        EntityType::Polyline(poly) => EntityKind::Polyline {
            vertices: poly
                .vertices()
                .map(|v| Vertex::with_bulge(v.location.x, v.location.y, v.bulge))
                .collect(),
            closed: poly.is_closed(),
        },
        EntityType::Circle(circle) => EntityKind::Circle {
            center: point(&circle.center),
            radius: circle.radius,
        },
        EntityType::Arc(arc) => EntityKind::Arc {
            center: point(&arc.center),
            radius: arc.radius,
            start_angle: arc.start_angle,
            end_angle: arc.end_angle,
        },
        EntityType::Ellipse(ellipse) => EntityKind::Ellipse {
            center: point(&ellipse.center),
            major_axis: Point2::new(ellipse.major_axis.x, ellipse.major_axis.y),
            ratio: ellipse.minor_axis_ratio,
            start_param: ellipse.start_parameter,
            end_param: ellipse.end_parameter,
        },
        EntityType::Spline(spline) => EntityKind::Spline {
            degree: usize::try_from(spline.degree_of_curve).unwrap_or(0),
            knots: spline.knot_values.clone(),
            control_points: spline.control_points.iter().map(point).collect(),
            weights: spline.weight_values.clone(),
            fit_points: spline.fit_points.iter().map(point).collect(),
            closed: spline.is_closed(),
        },
        EntityType::ModelPoint(p) => EntityKind::Point {
            location: point(&p.location),
        },
        other => EntityKind::Unsupported {
            kind: entity_type_name(other),
        },
    }
}

/// Upper-cased variant name, e.g. `TEXT` or `INSERT`
fn entity_type_name(specific: &EntityType) -> String {
    let mut name = VariantName::default();
    // The writer refuses everything after the variant name, which stops
    // the Debug output there
    let _ = write!(name, "{:?}", specific);
    if name.0.is_empty() {
        "UNKNOWN".to_string()
    } else {
        name.0.to_ascii_uppercase()
    }
}

/// Collects the leading identifier of a Debug output, then fails
#[derive(Default)]
struct VariantName(String);

impl fmt::Write for VariantName {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match s.find(|c: char| !c.is_alphanumeric()) {
            Some(end) => {
                self.0.push_str(&s[..end]);
                Err(fmt::Error)
            }
            None => {
                self.0.push_str(s);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal R12-style DXF with a dashed layer, a line, a circle and a text
    const SAMPLE_DXF: &str = "  0
SECTION
  2
TABLES
  0
TABLE
  2
LTYPE
  0
LTYPE
  2
DASHED
 70
0
  3
Dashed
 72
65
 73
2
 40
8.0
 49
5.0
 49
-3.0
  0
ENDTAB
  0
TABLE
  2
LAYER
  0
LAYER
  2
FOLD
 70
0
 62
1
  6
DASHED
  0
ENDTAB
  0
ENDSEC
  0
SECTION
  2
ENTITIES
  0
LINE
  8
FOLD
 10
0.0
 20
0.0
 30
0.0
 11
100.0
 21
50.0
 31
0.0
  0
CIRCLE
  8
0
 10
10.0
 20
10.0
 30
0.0
 40
5.0
  0
TEXT
  8
0
 10
0.0
 20
0.0
 30
0.0
 40
2.5
  1
hello
  0
ENDSEC
  0
EOF
";

    #[test]
    fn test_entity_type_name_stops_at_variant() {
        let text = EntityType::Text(dxf::entities::Text::default());
        assert_eq!(entity_type_name(&text), "TEXT");

        let mut name = VariantName::default();
        assert!(write!(name, "MText(MText {{ x: 1 }})").is_err());
        assert_eq!(name.0, "MText");
    }

    #[test]
    fn test_parse_sample() {
        let drawing = parse_dxf(SAMPLE_DXF.as_bytes()).unwrap();

        assert_eq!(drawing.entities.len(), 3);
        assert_eq!(
            drawing.entities[0].kind,
            EntityKind::Line {
                start: Point2::new(0.0, 0.0),
                end: Point2::new(100.0, 50.0),
            }
        );
        assert_eq!(drawing.entities[0].layer, "FOLD");
        assert!(matches!(
            drawing.entities[1].kind,
            EntityKind::Circle { radius, .. } if radius == 5.0
        ));
        assert!(matches!(
            &drawing.entities[2].kind,
            EntityKind::Unsupported { kind } if kind == "TEXT"
        ));

        assert_eq!(
            drawing.layer("fold").map(|l| l.linetype.as_str()),
            Some("DASHED")
        );
        assert_eq!(
            drawing.linetype("dashed"),
            Some(&LinetypePattern::new(vec![5.0, -3.0]))
        );
    }
}

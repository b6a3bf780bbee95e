use dxf_tile::*;

fn line(layer: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Entity {
    Entity::new(
        layer,
        EntityKind::Line {
            start: Point2::new(x0, y0),
            end: Point2::new(x1, y1),
        },
    )
}

#[test]
fn test_blank_tiles_counted() {
    let mut drawing = Drawing::new();
    drawing.add_entity(line("0", 0.0, 0.0, 10.0, 10.0));
    drawing.add_entity(line("0", 490.0, 290.0, 500.0, 300.0));

    let stats = calculate_statistics(&drawing, &TileOptions::default()).unwrap();
    assert_eq!((stats.cols, stats.rows), (3, 2));
    // Only the two corner tiles hold geometry
    assert_eq!(stats.blank_tiles, 4);
}

#[test]
fn test_skip_counts() {
    let mut drawing = Drawing::new();
    drawing.add_entity(line("CUT", 0.0, 0.0, 100.0, 0.0));
    drawing.add_entity(line("FOLD", 0.0, 0.0, 0.0, 100.0));
    drawing.add_entity(Entity::new(
        "CUT",
        EntityKind::Unsupported {
            kind: "MTEXT".to_string(),
        },
    ));
    drawing.add_entity(Entity::new(
        "CUT",
        EntityKind::Circle {
            center: Point2::new(0.0, 0.0),
            radius: 0.0,
        },
    ));

    let options = TileOptions {
        layers: Some(vec!["CUT".to_string()]),
        ..Default::default()
    };
    let stats = calculate_statistics(&drawing, &options).unwrap();
    assert_eq!(stats.primitives, 1);
    assert_eq!(stats.skipped_by_layer, 1);
    assert_eq!(stats.skipped_unsupported, 2);
    assert_eq!(stats.skipped_by_linetype, 0);
}

#[test]
fn test_steps_follow_overlap() {
    let mut drawing = Drawing::new();
    drawing.add_entity(line("0", 0.0, 0.0, 1000.0, 1000.0));

    let options = TileOptions {
        paper_size: PaperSize::Custom {
            width_mm: 220.0,
            height_mm: 220.0,
        },
        overlap_mm: 20.0,
        ..Default::default()
    };
    let stats = calculate_statistics(&drawing, &options).unwrap();
    assert_eq!(stats.step_w, 180.0);
    assert_eq!(stats.step_h, 180.0);
    // ceil((1000 - 20) / 180)
    assert_eq!((stats.cols, stats.rows), (6, 6));
    assert_eq!(stats.pages, 36);
    assert_eq!(stats.blank_tiles, 0);
}

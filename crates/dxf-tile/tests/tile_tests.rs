use dxf_tile::*;
use lopdf::Document;
use std::path::Path;

/// Closed square polyline with its lower-left corner at the origin
fn square_drawing(size: f64) -> Drawing {
    let mut drawing = Drawing::new();
    drawing.add_layer(Layer::new("0", "CONTINUOUS"));
    drawing.add_entity(Entity::new(
        "0",
        EntityKind::Polyline {
            vertices: vec![
                Vertex::new(0.0, 0.0),
                Vertex::new(size, 0.0),
                Vertex::new(size, size),
                Vertex::new(0.0, size),
            ],
            closed: true,
        },
    ));
    drawing
}

/// Tile and save, the way the command line tool does
async fn tile_to_file(drawing: &Drawing, options: &TileOptions, path: &Path) -> Result<()> {
    let doc = tile_drawing(drawing, options).await?;
    save_pdf(doc, path).await
}

fn page_content(doc: &Document, index: usize) -> String {
    let pages = doc.get_pages();
    let page_id = *pages.values().nth(index).unwrap();
    String::from_utf8(doc.get_page_content(page_id).unwrap()).unwrap()
}

fn scale_bar_length(canvas: &RecordingCanvas) -> f64 {
    canvas
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Line { from, to } => Some(to.0 - from.0),
            _ => None,
        })
        .unwrap()
}

#[tokio::test]
async fn test_square_on_letter_end_to_end() {
    use tempfile::NamedTempFile;

    let drawing = square_drawing(500.0);
    let options = TileOptions::default();

    let stats = calculate_statistics(&drawing, &options).unwrap();
    assert_eq!((stats.cols, stats.rows), (3, 2));
    assert_eq!(stats.pages, 6);

    let temp_file = NamedTempFile::new().unwrap();
    tile_to_file(&drawing, &options, temp_file.path())
        .await
        .unwrap();

    let doc = Document::load(temp_file.path()).unwrap();
    assert_eq!(doc.get_pages().len(), 6);

    // Row-major from the bottom-left tile
    assert!(page_content(&doc, 0).contains("(Tile 1/3 x 1/2) Tj"));
    assert!(page_content(&doc, 2).contains("(Tile 3/3 x 1/2) Tj"));
    assert!(page_content(&doc, 3).contains("(Tile 1/3 x 2/2) Tj"));
    assert!(page_content(&doc, 0).contains("(100 mm scale bar) Tj"));
    assert!(page_content(&doc, 0).contains("World origin for tile: \\(0.00, 0.00\\) mm"));
}

#[tokio::test]
async fn test_page_size_matches_paper() {
    let options = TileOptions {
        paper_size: PaperSize::A4,
        orientation: Orientation::Landscape,
        ..Default::default()
    };
    let doc = tile_drawing(&square_drawing(100.0), &options).await.unwrap();

    let pages = doc.get_pages();
    let page_id = *pages.values().next().unwrap();
    let media_box = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .clone();
    let width = media_box[2].as_float().unwrap();
    let height = media_box[3].as_float().unwrap();
    assert!((width - 841.89).abs() < 0.01);
    assert!((height - 595.28).abs() < 0.01);
}

#[tokio::test]
async fn test_overlap_too_large_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("tiles.pdf");

    let options = TileOptions {
        overlap_mm: 200.0,
        ..Default::default()
    };
    let result = tile_to_file(&square_drawing(500.0), &options, &output).await;

    assert!(matches!(result, Err(TileError::OverlapTooLarge)));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_no_supported_geometry() {
    let mut drawing = Drawing::new();
    drawing.add_entity(Entity::new(
        "0",
        EntityKind::Unsupported {
            kind: "TEXT".to_string(),
        },
    ));
    drawing.add_entity(Entity::new(
        "0",
        EntityKind::Unsupported {
            kind: "HATCH".to_string(),
        },
    ));

    let result = tile_drawing(&drawing, &TileOptions::default()).await;
    assert!(matches!(result, Err(TileError::NoGeometry)));
}

#[tokio::test]
async fn test_layer_filter_can_remove_everything() {
    let options = TileOptions {
        layers: Some(vec!["CUT".to_string()]),
        ..Default::default()
    };
    let result = tile_drawing(&square_drawing(100.0), &options).await;
    assert!(matches!(result, Err(TileError::NoGeometry)));
}

#[tokio::test]
async fn test_invalid_options_rejected_before_tiling() {
    let options = TileOptions {
        margin_mm: -5.0,
        ..Default::default()
    };
    let result = tile_drawing(&square_drawing(100.0), &options).await;
    assert!(matches!(result, Err(TileError::Config(_))));
}

#[tokio::test]
async fn test_one_plan_feeds_statistics_and_pages() {
    let drawing = square_drawing(500.0);
    let options = TileOptions::default();

    let plan = plan_tiles(&drawing, &options).await.unwrap();
    let stats = plan.statistics();
    assert_eq!(stats, calculate_statistics(&drawing, &options).unwrap());

    let doc = render_plan(plan).await.unwrap();
    assert_eq!(doc.get_pages().len(), stats.pages);
}

#[tokio::test]
async fn test_plan_tiles_rejects_huge_drawing() {
    let mut drawing = Drawing::new();
    drawing.add_entity(Entity::new(
        "0",
        EntityKind::Line {
            start: Point2::new(0.0, 0.0),
            end: Point2::new(1e12, 1e12),
        },
    ));
    let result = plan_tiles(&drawing, &TileOptions::default()).await;
    assert!(matches!(result, Err(TileError::TooManyTiles(_))));
}

#[test]
fn test_printable_corners_map_exactly() {
    for units in [DrawingUnits::Millimeters, DrawingUnits::Inches] {
        let options = TileOptions {
            units,
            ..Default::default()
        };
        let page = options.page_geometry().unwrap();
        let rect = page.printable_rect();
        let grid = plan_tile_grid(
            &BoundingBox::new(-3.0, 7.0, 400.0, 600.0),
            &page.printable_area(),
            page.overlap_wu,
        )
        .unwrap();

        for tile in grid.tiles() {
            let transform = WorldToPage::for_tile(&tile, units);
            let near = transform.to_page(tile.world_origin);
            let far = transform.to_page(Point2::new(
                tile.world_origin.x + page.printable_width_wu,
                tile.world_origin.y + page.printable_height_wu,
            ));
            assert!((near.0 - rect.x).abs() < 1e-9 && (near.1 - rect.y).abs() < 1e-9);
            assert!((far.0 - rect.right()).abs() < 1e-9, "{:?}", units);
            assert!((far.1 - rect.top()).abs() < 1e-9, "{:?}", units);
        }
    }
}

#[tokio::test]
async fn test_save_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("tiles.pdf");

    let doc = tile_drawing(&square_drawing(100.0), &TileOptions::default())
        .await
        .unwrap();
    let result = save_pdf(doc, &output).await;
    assert!(matches!(result, Err(TileError::Io(_))));
    assert!(!output.exists());
}

#[test]
fn test_single_tile_when_drawing_fits() {
    let mut canvas = RecordingCanvas::new();
    let grid = tile_onto(&mut canvas, &square_drawing(150.0), &TileOptions::default()).unwrap();

    assert_eq!(grid.tile_count(), 1);
    assert_eq!(canvas.pages().len(), 1);
    assert_eq!(canvas.texts()[0], "Tile 1/1 x 1/1");
}

#[test]
fn test_scale_bar_independent_of_units() {
    let mut mm_canvas = RecordingCanvas::new();
    tile_onto(&mut mm_canvas, &square_drawing(500.0), &TileOptions::default()).unwrap();

    let inch_options = TileOptions {
        units: DrawingUnits::Inches,
        ..Default::default()
    };
    let mut inch_canvas = RecordingCanvas::new();
    tile_onto(&mut inch_canvas, &square_drawing(20.0), &inch_options).unwrap();

    let expected = 100.0 * 72.0 / 25.4;
    assert!((scale_bar_length(&mm_canvas) - expected).abs() < 1e-9);
    assert!((scale_bar_length(&inch_canvas) - expected).abs() < 1e-9);
}

#[test]
fn test_inch_drawing_is_true_size() {
    let options = TileOptions {
        units: DrawingUnits::Inches,
        ..Default::default()
    };
    let mut canvas = RecordingCanvas::new();
    tile_onto(&mut canvas, &square_drawing(2.0), &options).unwrap();

    let square = canvas
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Polyline { points, closed: true } => Some(points.clone()),
            _ => None,
        })
        .unwrap();
    // Two inches is 144 points on paper
    assert!((square[1].0 - square[0].0 - 144.0).abs() < 1e-9);
}

#[test]
fn test_crop_marks_replace_seams() {
    let options = TileOptions {
        marks: AssemblyMarks::CropMarks,
        ..Default::default()
    };
    let mut canvas = RecordingCanvas::new();
    tile_onto(&mut canvas, &square_drawing(500.0), &options).unwrap();

    for page in canvas.pages() {
        assert!(!page.iter().any(|op| matches!(op, DrawOp::Dash(_))));
        let rings = page
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
            .count();
        assert_eq!(rings, 4);
    }
}

#[test]
fn test_continuous_only_drops_dashed_entities() {
    let mut drawing = square_drawing(100.0);
    drawing.add_linetype("DASHED", LinetypePattern::new(vec![5.0, -3.0]));
    drawing.add_entity(
        Entity::new(
            "0",
            EntityKind::Line {
                start: Point2::new(0.0, 0.0),
                end: Point2::new(400.0, 400.0),
            },
        )
        .with_linetype("DASHED"),
    );

    let options = TileOptions {
        continuous_only: true,
        ..Default::default()
    };
    let stats = calculate_statistics(&drawing, &options).unwrap();
    assert_eq!(stats.skipped_by_linetype, 1);
    assert_eq!(stats.pages, 1);
}

#[tokio::test]
async fn test_load_drawing_from_file() {
    use tempfile::NamedTempFile;

    let dxf = "  0\nSECTION\n  2\nENTITIES\n  0\nLINE\n  8\nCUT\n 10\n0.0\n 20\n0.0\n 30\n0.0\n 11\n250.0\n 21\n100.0\n 31\n0.0\n  0\nENDSEC\n  0\nEOF\n";
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), dxf).unwrap();

    let drawing = load_drawing(temp_file.path()).await.unwrap();
    assert_eq!(drawing.entities.len(), 1);
    assert_eq!(drawing.entities[0].layer, "CUT");

    let stats = calculate_statistics(&drawing, &TileOptions::default()).unwrap();
    assert_eq!(stats.bounds, BoundingBox::new(0.0, 0.0, 250.0, 100.0));
    assert_eq!((stats.cols, stats.rows), (2, 1));
}

#[tokio::test]
async fn test_load_missing_file() {
    let result = load_drawing("/nonexistent/drawing.dxf").await;
    assert!(matches!(result, Err(TileError::Io(_))));
}

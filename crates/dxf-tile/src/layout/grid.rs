//! Tile grid planning
//!
//! Splits a drawing extent into a grid of overlapping tiles sized to the
//! printable area of one page.

use crate::constants::MAX_TILES;
use crate::geometry::{BoundingBox, Point2};
use crate::types::{Result, TileError};

use super::{PrintableArea, TileGrid};

// =============================================================================
// Grid Planning
// =============================================================================

/// Plan the tile grid covering `bounds`.
///
/// # Arguments
/// * `bounds` - Drawing extent in world units
/// * `area` - Printable area of one page
/// * `overlap` - Overlap between neighbouring tiles in world units
///
/// # Errors
/// `TileError::OverlapTooLarge` when the overlap leaves no step in either
/// direction, `TileError::TooManyTiles` when the grid would exceed
/// [`MAX_TILES`] pages.
pub fn plan_tile_grid(
    bounds: &BoundingBox,
    area: &PrintableArea,
    overlap: f64,
) -> Result<TileGrid> {
    let step_w = area.width_wu - overlap;
    let step_h = area.height_wu - overlap;
    if !(step_w > 0.0 && step_h > 0.0) {
        return Err(TileError::OverlapTooLarge);
    }

    let cols = tile_count_along(bounds.width(), step_w, overlap);
    let rows = tile_count_along(bounds.height(), step_h, overlap);
    // Counts stay in f64 until checked; huge extents would saturate usize
    if !(cols * rows <= MAX_TILES as f64) {
        return Err(TileError::TooManyTiles(MAX_TILES));
    }

    Ok(TileGrid {
        cols: cols as usize,
        rows: rows as usize,
        step_w,
        step_h,
        overlap,
        origin: Point2::new(bounds.min_x, bounds.min_y),
        area: *area,
    })
}

/// `max(1, ceil((total - overlap) / step))`
fn tile_count_along(total: f64, step: f64, overlap: f64) -> f64 {
    let count = ((total - overlap) / step).ceil();
    if count.is_nan() { 1.0 } else { count.max(1.0) }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn area(width: f64, height: f64) -> PrintableArea {
        PrintableArea::new(width, height, (28.35, 28.35))
    }

    fn bounds(width: f64, height: f64) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, width, height)
    }

    #[test]
    fn test_count_formula() {
        // (total, printable, overlap, expected)
        let cases = [
            (1000.0, 200.0, 20.0, 6),
            (200.0, 200.0, 20.0, 1),
            (10.0, 200.0, 20.0, 1),
            (0.0, 200.0, 20.0, 1),
            (381.0, 200.0, 20.0, 3),
            (380.0, 200.0, 20.0, 2),
            (500.0, 195.9, 10.0, 3),
            (100.0, 50.0, 0.0, 2),
            (100.1, 50.0, 0.0, 3),
        ];
        for (total, printable, overlap, expected) in cases {
            let grid = plan_tile_grid(&bounds(total, 1.0), &area(printable, 100.0), overlap)
                .unwrap();
            assert_eq!(grid.cols, expected, "total={total} printable={printable}");
        }
    }

    #[test]
    fn test_overlap_too_large() {
        let result = plan_tile_grid(&bounds(100.0, 100.0), &area(50.0, 80.0), 50.0);
        assert!(matches!(result, Err(TileError::OverlapTooLarge)));

        let result = plan_tile_grid(&bounds(100.0, 100.0), &area(80.0, 50.0), 60.0);
        assert!(matches!(result, Err(TileError::OverlapTooLarge)));
    }

    #[test]
    fn test_huge_extent_rejected() {
        for size in [1e12, 1e300] {
            let result = plan_tile_grid(&bounds(size, size), &area(195.9, 259.4), 10.0);
            assert!(matches!(result, Err(TileError::TooManyTiles(MAX_TILES))));
        }

        // A long thin strip is judged by its page count, not one side
        let result = plan_tile_grid(&bounds(1e9, 1.0), &area(195.9, 259.4), 10.0);
        assert!(matches!(result, Err(TileError::TooManyTiles(_))));
    }

    #[test]
    fn test_page_limit_is_inclusive() {
        // 100 x 100 tiles of step 10
        let grid = plan_tile_grid(&bounds(1000.0, 1000.0), &area(10.0, 10.0), 0.0).unwrap();
        assert_eq!(grid.tile_count(), MAX_TILES);

        let result = plan_tile_grid(&bounds(1000.0, 1000.1), &area(10.0, 10.0), 0.0);
        assert!(matches!(result, Err(TileError::TooManyTiles(_))));
    }

    #[test]
    fn test_tiles_bottom_row_first() {
        let grid = plan_tile_grid(
            &BoundingBox::new(-10.0, 5.0, 300.0, 300.0),
            &area(200.0, 200.0),
            20.0,
        )
        .unwrap();
        assert_eq!((grid.cols, grid.rows), (2, 2));

        let order: Vec<_> = grid.tiles().map(|t| (t.col, t.row)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);

        let tiles: Vec<_> = grid.tiles().collect();
        assert_eq!(tiles[0].world_origin, Point2::new(-10.0, 5.0));
        assert_eq!(tiles[3].world_origin, Point2::new(170.0, 185.0));
        assert!(tiles.iter().all(|t| t.page_origin == (28.35, 28.35)));
    }

    #[test]
    fn test_coverage_contains_bounds() {
        let cases = [
            (1000.0, 750.0, 200.0, 20.0),
            (12.5, 999.0, 40.0, 5.0),
            (500.0, 500.0, 195.9, 10.0),
            (1.0, 1.0, 10.0, 0.0),
        ];
        for (w, h, printable, overlap) in cases {
            let b = BoundingBox::new(3.0, -7.0, 3.0 + w, -7.0 + h);
            let grid = plan_tile_grid(&b, &area(printable, printable), overlap).unwrap();
            let cover = grid.coverage();
            assert!(cover.min_x <= b.min_x && cover.max_x >= b.max_x);
            assert!(cover.min_y <= b.min_y && cover.max_y >= b.max_y);
        }
    }

    #[test]
    fn test_neighbours() {
        let grid = plan_tile_grid(&bounds(500.0, 300.0), &area(200.0, 200.0), 20.0).unwrap();
        assert_eq!((grid.cols, grid.rows), (3, 2));
        assert_eq!(grid.tile_count(), 6);

        let corner = grid.tile(0, 0);
        assert!(grid.has_right_neighbour(&corner));
        assert!(grid.has_top_neighbour(&corner));

        let last = grid.tile(2, 1);
        assert!(!grid.has_right_neighbour(&last));
        assert!(!grid.has_top_neighbour(&last));
        assert_eq!(last.label(&grid), "Tile 3/3 x 2/2");
    }

    #[test]
    fn test_tile_region_overlaps_neighbour() {
        let grid = plan_tile_grid(&bounds(500.0, 100.0), &area(200.0, 200.0), 20.0).unwrap();
        let a = grid.tile_region(&grid.tile(0, 0));
        let b = grid.tile_region(&grid.tile(1, 0));
        assert_eq!(a.max_x - b.min_x, 20.0);
    }
}

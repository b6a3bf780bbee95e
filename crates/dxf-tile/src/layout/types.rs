//! Layout data types for tiling
//!
//! These types sit between the drawing extent and PDF rendering: they say
//! which part of the world lands on which page, and where on the page.

use crate::geometry::{BoundingBox, Point2};

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f64,
    /// Y position (bottom edge)
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Corners counter-clockwise from bottom-left
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.x, self.y),
            (self.right(), self.y),
            (self.right(), self.top()),
            (self.x, self.top()),
        ]
    }
}

/// The part of a page that carries geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintableArea {
    /// Printable width in world units
    pub width_wu: f64,
    /// Printable height in world units
    pub height_wu: f64,
    /// Bottom-left corner of the printable rectangle on the page (points)
    pub origin_pt: (f64, f64),
}

impl PrintableArea {
    pub fn new(width_wu: f64, height_wu: f64, origin_pt: (f64, f64)) -> Self {
        Self {
            width_wu,
            height_wu,
            origin_pt,
        }
    }
}

/// One page of the grid.
///
/// Column `col` and row `row` are zero-based; row 0 is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub col: usize,
    pub row: usize,
    /// World coordinate that maps to `page_origin`
    pub world_origin: Point2,
    /// Page position of `world_origin` (points); the same for every tile
    pub page_origin: (f64, f64),
}

impl Tile {
    /// One-based label used on the page header: `Tile i/nx x j/ny`
    pub fn label(&self, grid: &TileGrid) -> String {
        format!(
            "Tile {}/{} x {}/{}",
            self.col + 1,
            grid.cols,
            self.row + 1,
            grid.rows
        )
    }
}

/// The planned grid of overlapping tiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    pub cols: usize,
    pub rows: usize,
    /// Horizontal distance between neighbouring tile origins (world units)
    pub step_w: f64,
    /// Vertical distance between neighbouring tile origins (world units)
    pub step_h: f64,
    /// Overlap between neighbours (world units)
    pub overlap: f64,
    /// Bottom-left of the drawing extent, origin of tile (0, 0)
    pub origin: Point2,
    /// Printable area the grid was planned for
    pub area: PrintableArea,
}

impl TileGrid {
    /// Total number of tiles in the grid
    pub fn tile_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Descriptor of the tile at (`col`, `row`)
    pub fn tile(&self, col: usize, row: usize) -> Tile {
        Tile {
            col,
            row,
            world_origin: Point2::new(
                self.origin.x + col as f64 * self.step_w,
                self.origin.y + row as f64 * self.step_h,
            ),
            page_origin: self.area.origin_pt,
        }
    }

    /// Tiles in page order: rows bottom to top, columns left to right
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| self.tile(col, row)))
    }

    /// Check if a tile has a neighbour to its right
    pub fn has_right_neighbour(&self, tile: &Tile) -> bool {
        tile.col + 1 < self.cols
    }

    /// Check if a tile has a neighbour above it
    pub fn has_top_neighbour(&self, tile: &Tile) -> bool {
        tile.row + 1 < self.rows
    }

    /// World region printed on one tile
    pub fn tile_region(&self, tile: &Tile) -> BoundingBox {
        BoundingBox::new(
            tile.world_origin.x,
            tile.world_origin.y,
            tile.world_origin.x + self.area.width_wu,
            tile.world_origin.y + self.area.height_wu,
        )
    }

    /// World region covered by the whole grid
    pub fn coverage(&self) -> BoundingBox {
        BoundingBox::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.cols as f64 * self.step_w + self.overlap,
            self.origin.y + self.rows as f64 * self.step_h + self.overlap,
        )
    }
}

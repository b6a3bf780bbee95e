//! World-to-page coordinate mapping
//!
//! Each tile maps its world origin onto the bottom-left corner of the
//! printable rectangle with a uniform scale that depends only on the
//! drawing units. There is no rotation and no per-tile scaling.

use crate::geometry::Point2;
use crate::layout::Tile;
use crate::types::DrawingUnits;

/// Affine map from world units to PDF points for one tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldToPage {
    /// Points per world unit
    pub scale: f64,
    pub world_origin: Point2,
    pub page_origin: (f64, f64),
}

impl WorldToPage {
    pub fn new(scale: f64, world_origin: Point2, page_origin: (f64, f64)) -> Self {
        Self {
            scale,
            world_origin,
            page_origin,
        }
    }

    pub fn for_tile(tile: &Tile, units: DrawingUnits) -> Self {
        Self::new(units.points_per_unit(), tile.world_origin, tile.page_origin)
    }

    /// Page position of a world point
    pub fn to_page(&self, point: Point2) -> (f64, f64) {
        (
            self.page_origin.0 + (point.x - self.world_origin.x) * self.scale,
            self.page_origin.1 + (point.y - self.world_origin.y) * self.scale,
        )
    }

    /// World position of a page point
    pub fn to_world(&self, x: f64, y: f64) -> Point2 {
        Point2::new(
            self.world_origin.x + (x - self.page_origin.0) / self.scale,
            self.world_origin.y + (y - self.page_origin.1) / self.scale,
        )
    }

    /// World length in points
    pub fn length(&self, world_length: f64) -> f64 {
        world_length * self.scale
    }
}

use crate::drawing::Drawing;
use crate::geometry::{BoundingBox, primitive_bounds};
use crate::options::TileOptions;
use crate::tile::TilePlan;
use crate::types::*;

/// Calculate statistics for tiling a drawing, without rendering any page
pub fn calculate_statistics(drawing: &Drawing, options: &TileOptions) -> Result<TilingStatistics> {
    Ok(TilePlan::new(drawing, options)?.statistics())
}

impl TilePlan {
    /// Statistics for this plan
    pub fn statistics(&self) -> TilingStatistics {
        let boxes: Vec<BoundingBox> = self
            .extraction
            .primitives
            .iter()
            .filter_map(primitive_bounds)
            .collect();

        let blank_tiles = self
            .grid
            .tiles()
            .filter(|tile| {
                let region = self.grid.tile_region(tile);
                !boxes.iter().any(|b| b.intersects(&region))
            })
            .count();

        TilingStatistics {
            primitives: self.extraction.primitives.len(),
            skipped_by_layer: self.extraction.skipped_by_layer,
            skipped_by_linetype: self.extraction.skipped_by_linetype,
            skipped_unsupported: self.extraction.skipped_unsupported,
            bounds: self.bounds,
            cols: self.grid.cols,
            rows: self.grid.rows,
            pages: self.grid.tile_count(),
            blank_tiles,
            step_w: self.grid.step_w,
            step_h: self.grid.step_h,
        }
    }
}

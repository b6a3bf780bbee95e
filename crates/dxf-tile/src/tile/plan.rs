//! Tile planning shared by statistics and rendering

use crate::drawing::Drawing;
use crate::geometry::{BoundingBox, Extraction, drawing_bounds, extract_primitives};
use crate::layout::{TileGrid, plan_tile_grid};
use crate::options::{PageGeometry, TileOptions};
use crate::render::{PageCanvas, compose_tile};
use crate::types::*;

/// Everything decided before the first page is drawn.
///
/// Building a plan extracts and flattens the drawing once; the primitives
/// are then only read, by [`TilePlan::statistics`] and by
/// [`TilePlan::compose`].
#[derive(Debug, Clone)]
pub struct TilePlan {
    pub options: TileOptions,
    pub page: PageGeometry,
    pub extraction: Extraction,
    /// Drawing extent in world units
    pub bounds: BoundingBox,
    pub grid: TileGrid,
}

impl TilePlan {
    pub fn new(drawing: &Drawing, options: &TileOptions) -> Result<Self> {
        let page = options.page_geometry()?;

        let extraction = extract_primitives(
            drawing,
            &options.entity_filter(),
            &options.sampling_policy(),
        );
        log::debug!(
            "Extracted {} primitives ({} skipped by layer, {} by linetype, {} unsupported)",
            extraction.primitives.len(),
            extraction.skipped_by_layer,
            extraction.skipped_by_linetype,
            extraction.skipped_unsupported
        );

        let bounds = drawing_bounds(&extraction.primitives)?;
        let grid = plan_tile_grid(&bounds, &page.printable_area(), page.overlap_wu)?;
        log::info!(
            "Drawing extent {:.2} x {:.2} {}; {} x {} tiles ({} pages)",
            bounds.width(),
            bounds.height(),
            options.units.label(),
            grid.cols,
            grid.rows,
            grid.tile_count()
        );

        Ok(Self {
            options: options.clone(),
            page,
            extraction,
            bounds,
            grid,
        })
    }

    /// Draw every tile page onto `canvas`, in grid order
    pub fn compose<C: PageCanvas + ?Sized>(&self, canvas: &mut C) {
        for tile in self.grid.tiles() {
            log::debug!(
                "Composing tile {}/{} x {}/{} at world ({:.2}, {:.2})",
                tile.col + 1,
                self.grid.cols,
                tile.row + 1,
                self.grid.rows,
                tile.world_origin.x,
                tile.world_origin.y
            );
            compose_tile(
                canvas,
                &tile,
                &self.grid,
                &self.page,
                &self.extraction.primitives,
                &self.options,
            );
        }
    }
}

//! DXF tiling - splitting a drawing into true-size printable pages
//!
//! This module orchestrates the tiling process:
//! 1. Extract primitives from the drawing (layer and linetype filters)
//! 2. Measure the drawing extent
//! 3. Plan the overlapping tile grid
//! 4. Compose one page per tile into an in-memory PDF
//!
//! Steps 1-3 produce a [`TilePlan`], which can report statistics before
//! step 4 renders it. Nothing is written to disk here; the caller saves the
//! finished document, so a failed run never leaves a partial file behind.

mod io;
mod plan;

pub use io::{load_drawing, parse_dxf, save_pdf};
pub use plan::TilePlan;

use crate::drawing::Drawing;
use crate::layout::TileGrid;
use crate::options::TileOptions;
use crate::render::{PageCanvas, PdfCanvas};
use crate::types::*;
use lopdf::Document;

/// Main tiling function
pub async fn tile_drawing(drawing: &Drawing, options: &TileOptions) -> Result<Document> {
    let plan = plan_tiles(drawing, options).await?;
    render_plan(plan).await
}

/// Extract the drawing and plan its tiles without drawing any page
pub async fn plan_tiles(drawing: &Drawing, options: &TileOptions) -> Result<TilePlan> {
    options.validate()?;

    let drawing = drawing.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || TilePlan::new(&drawing, &options)).await?
}

/// Render a prepared plan into a PDF document
pub async fn render_plan(plan: TilePlan) -> Result<Document> {
    tokio::task::spawn_blocking(move || {
        let mut canvas = PdfCanvas::new();
        plan.compose(&mut canvas);
        Ok(canvas.finish())
    })
    .await?
}

/// Tile a drawing onto any canvas, returning the planned grid
pub fn tile_onto<C: PageCanvas + ?Sized>(
    canvas: &mut C,
    drawing: &Drawing,
    options: &TileOptions,
) -> Result<TileGrid> {
    let plan = TilePlan::new(drawing, options)?;
    plan.compose(canvas);
    Ok(plan.grid)
}

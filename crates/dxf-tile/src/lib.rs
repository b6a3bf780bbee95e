pub mod constants;
pub mod drawing;
pub mod geometry;
pub mod layout;
pub mod linetype;
mod marks;
mod options;
pub mod render;
mod stats;
pub mod tile;
pub mod transform;
mod types;

pub use drawing::*;
pub use geometry::{
    BoundingBox, EntityFilter, Extraction, Point2, Primitive, SamplingPolicy, Shape,
    drawing_bounds, extract_primitives,
};
pub use layout::{PrintableArea, Rect, Tile, TileGrid, plan_tile_grid};
pub use linetype::{LinetypePattern, ResolvedLinetype, dash_intervals, resolve_dashes};
pub use marks::SeamConfig;
pub use options::*;
pub use render::{DrawOp, PageCanvas, PdfCanvas, RecordingCanvas, TextAlign};
pub use stats::calculate_statistics;
pub use tile::{
    TilePlan, load_drawing, parse_dxf, plan_tiles, render_plan, save_pdf, tile_drawing, tile_onto,
};
pub use transform::WorldToPage;
pub use types::*;

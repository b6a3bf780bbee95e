//! Layout calculation modules for tiling
//!
//! This module handles the geometric calculations for splitting a drawing
//! into overlapping pages:
//! - Printable area and page rectangles
//! - Tile grid planning (step, counts, per-tile world origin)

mod grid;
mod types;

pub use grid::*;
pub use types::*;

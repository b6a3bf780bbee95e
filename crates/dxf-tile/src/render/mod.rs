//! Page rendering for tiling
//!
//! This module handles everything that ends up on a page:
//! - The `PageCanvas` drawing interface and a recording implementation
//! - The lopdf-backed PDF canvas
//! - Per-tile page composition (text, scale bar, assembly aids, geometry)

mod canvas;
mod page;
mod pdf;

pub use canvas::*;
pub use page::*;
pub use pdf::PdfCanvas;

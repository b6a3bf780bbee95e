use crate::constants::{MM_PER_INCH, POINTS_PER_INCH, POINTS_PER_MM};
use crate::geometry::BoundingBox;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TileError {
    #[error("DXF error: {0}")]
    Dxf(String),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Overlap too large; no printable area remains.")]
    OverlapTooLarge,
    #[error("Drawing too large to tile; it would need more than {0} pages.")]
    TooManyTiles(usize),
    #[error("No supported geometry found in DXF (LINE/LWPOLYLINE/SPLINE/etc.).")]
    NoGeometry,
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, TileError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Long edge vertical
    #[default]
    Portrait,
    /// Long edge horizontal
    Landscape,
}

/// Paper sizes the tiles can be printed on
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    #[default]
    Letter,
    A4,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// Portrait dimensions in millimeters
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Dimensions after rotating for `orientation`
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// What one drawing unit stands for. DXF files carry no reliable unit,
/// so this is declared by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawingUnits {
    #[default]
    Millimeters,
    Inches,
}

impl DrawingUnits {
    /// Scale factor from world units to PDF points
    pub fn points_per_unit(self) -> f64 {
        match self {
            DrawingUnits::Millimeters => POINTS_PER_MM,
            DrawingUnits::Inches => POINTS_PER_INCH,
        }
    }

    /// Convert a physical length in millimeters to world units
    pub fn mm_to_world(self, mm: f64) -> f64 {
        match self {
            DrawingUnits::Millimeters => mm,
            DrawingUnits::Inches => mm / MM_PER_INCH,
        }
    }

    /// Short unit label used in page annotations
    pub fn label(self) -> &'static str {
        match self {
            DrawingUnits::Millimeters => "mm",
            DrawingUnits::Inches => "inch",
        }
    }
}

/// Which assembly aids are printed on each tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssemblyMarks {
    /// Dashed lines showing where the neighbouring sheet's paper edge goes
    #[default]
    SeamLines,
    /// Crop marks and registration crosses at the printable corners
    CropMarks,
}

/// Statistics about a tiling run
#[derive(Debug, Clone, PartialEq)]
pub struct TilingStatistics {
    /// Number of primitives kept after filtering
    pub primitives: usize,
    /// Entities dropped by the layer filter
    pub skipped_by_layer: usize,
    /// Entities dropped by the continuous-linetype filter
    pub skipped_by_linetype: usize,
    /// Entities of a kind that cannot be tiled
    pub skipped_unsupported: usize,
    /// Drawing extent in world units
    pub bounds: BoundingBox,
    /// Number of tile columns
    pub cols: usize,
    /// Number of tile rows
    pub rows: usize,
    /// Output page count
    pub pages: usize,
    /// Tiles whose coverage touches no geometry
    pub blank_tiles: usize,
    /// Horizontal distance between tile origins (world units)
    pub step_w: f64,
    /// Vertical distance between tile origins (world units)
    pub step_h: f64,
}

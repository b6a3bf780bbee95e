//! Shared constants for tiling
//!
//! Unit factors and page furniture sizes.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Points per inch (PDF user space unit)
pub const POINTS_PER_INCH: f64 = 72.0;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f64 = POINTS_PER_INCH / MM_PER_INCH; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Defaults
// =============================================================================

/// Default page margin on every side (mm)
pub const DEFAULT_MARGIN_MM: f64 = 10.0;

/// Default overlap between neighbouring tiles (mm)
pub const DEFAULT_OVERLAP_MM: f64 = 10.0;

/// Default maximum chord deviation for curve flattening, measured on paper (mm)
pub const DEFAULT_FLATTEN_TOLERANCE_MM: f64 = 0.5;

// =============================================================================
// Tiling
// =============================================================================

/// Largest number of pages a single run may produce
pub const MAX_TILES: usize = 10_000;

// =============================================================================
// Flattening
// =============================================================================

/// Minimum number of segments used for a full circle
pub const MIN_CIRCLE_SEGMENTS: usize = 64;

/// Minimum number of segments for any flattened curve or arc
pub const MIN_CURVE_SEGMENTS: usize = 8;

/// Upper bound on segments for a single flattened curve
pub const MAX_CURVE_SEGMENTS: usize = 8192;

// =============================================================================
// Linetypes
// =============================================================================

/// Pattern cycles per primitive above which a dash pattern is drawn solid
pub const MAX_DASH_CYCLES: f64 = 100_000.0;

/// Tolerance used when walking dash patterns along a path (world units)
pub const DASH_EPSILON: f64 = 1e-9;

// =============================================================================
// Printer's Marks
// =============================================================================

/// Line width for seam lines (points)
pub const SEAM_LINE_WIDTH: f64 = 0.5;

/// Dash pattern for seam lines: 6pt dash, 3pt gap
pub const SEAM_DASH_PATTERN: [f64; 2] = [6.0, 3.0];

/// Line width for crop marks (points)
pub const CROP_MARK_WIDTH: f64 = 0.25;

/// Line width for registration marks (points)
pub const REGISTRATION_MARK_WIDTH: f64 = 0.25;

/// Length of crop marks (mm)
pub const CROP_MARK_LENGTH_MM: f64 = 6.0;

/// Gap between crop mark and the printable rectangle corner (points)
pub const CROP_MARK_GAP: f64 = 3.0;

/// Size of the registration cross centred on a printable corner (mm)
pub const REGISTRATION_MARK_SIZE_MM: f64 = 10.0;

/// Size of the registration crosses placed on seam lines (mm)
pub const SEAM_MARK_SIZE_MM: f64 = 8.0;

/// Inset of seam crosses from the paper edge (mm)
pub const SEAM_MARK_INSET_MM: f64 = 10.0;

// =============================================================================
// Scale Bar
// =============================================================================

/// Physical length of the scale bar (mm)
pub const SCALE_BAR_LENGTH_MM: f64 = 100.0;

/// Offset of the scale bar from the printable rectangle corner (mm)
pub const SCALE_BAR_OFFSET_MM: f64 = 5.0;

/// Half height of the scale bar end ticks (mm)
pub const SCALE_BAR_TICK_MM: f64 = 2.0;

/// Distance between bar and label baseline (mm)
pub const SCALE_BAR_LABEL_OFFSET_MM: f64 = 3.0;

/// Line width of the scale bar (points)
pub const SCALE_BAR_LINE_WIDTH: f64 = 1.0;

/// Font size of the scale bar label (points)
pub const SCALE_BAR_FONT_SIZE: f64 = 8.0;

// =============================================================================
// Page Text
// =============================================================================

/// Font size for the tile header (points)
pub const HEADER_FONT_SIZE: f64 = 9.0;

/// Baseline offset of the header above the printable rectangle (points)
pub const HEADER_OFFSET: f64 = 2.0;

/// Title printed at the right of the header
pub const HEADER_TITLE: &str = "DXF tiled pattern (1:1)";

/// Font size for the world-origin footer (points)
pub const FOOTER_FONT_SIZE: f64 = 7.0;

/// Baseline offset of the footer below the printable rectangle (points)
pub const FOOTER_OFFSET: f64 = 8.0;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f64 = 0.5;

// =============================================================================
// Geometry
// =============================================================================

/// Stroke width for drawing geometry (points)
pub const GEOMETRY_LINE_WIDTH: f64 = 1.0;

// =============================================================================
// Bezier Curve Constants
// =============================================================================

/// Bezier handle length for a quarter circle of unit radius,
/// 4 * (sqrt(2) - 1) / 3
pub const BEZIER_CIRCLE_FACTOR: f64 = 0.552284749831;

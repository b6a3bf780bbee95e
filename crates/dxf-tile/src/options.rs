use crate::constants::{
    DEFAULT_FLATTEN_TOLERANCE_MM, DEFAULT_MARGIN_MM, DEFAULT_OVERLAP_MM, mm_to_pt,
};
use crate::geometry::{EntityFilter, SamplingPolicy};
use crate::layout::{PrintableArea, Rect};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tiling configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TileOptions {
    // Paper
    pub paper_size: PaperSize,
    pub orientation: Orientation,

    // Physical distances on paper (mm)
    pub margin_mm: f64,
    pub overlap_mm: f64,

    // Drawing interpretation
    pub units: DrawingUnits,
    /// Layer allow-list, exact names; `None` keeps every layer
    pub layers: Option<Vec<String>>,
    /// Drop entities whose linetype is not continuous
    pub continuous_only: bool,
    /// Longest chord of a flattened curve, measured on paper (mm)
    pub flatten_tolerance_mm: f64,

    // Page furniture
    pub marks: AssemblyMarks,
    /// Clip geometry to the printable rectangle
    pub clip_to_printable: bool,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter,
            orientation: Orientation::Portrait,
            margin_mm: DEFAULT_MARGIN_MM,
            overlap_mm: DEFAULT_OVERLAP_MM,
            units: DrawingUnits::Millimeters,
            layers: None,
            continuous_only: false,
            flatten_tolerance_mm: DEFAULT_FLATTEN_TOLERANCE_MM,
            marks: AssemblyMarks::SeamLines,
            clip_to_printable: false,
        }
    }
}

/// Page measurements derived from [`TileOptions`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width_pt: f64,
    pub page_height_pt: f64,
    pub margin_pt: f64,
    /// Points per world unit
    pub scale: f64,
    pub printable_width_pt: f64,
    pub printable_height_pt: f64,
    pub printable_width_wu: f64,
    pub printable_height_wu: f64,
    pub overlap_wu: f64,
    pub overlap_pt: f64,
}

impl PageGeometry {
    /// Printable rectangle on the page
    pub fn printable_rect(&self) -> Rect {
        Rect::new(
            self.margin_pt,
            self.margin_pt,
            self.printable_width_pt,
            self.printable_height_pt,
        )
    }

    pub fn printable_area(&self) -> PrintableArea {
        PrintableArea::new(
            self.printable_width_wu,
            self.printable_height_wu,
            (self.margin_pt, self.margin_pt),
        )
    }
}

impl TileOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| TileError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| TileError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let (width_mm, height_mm) = self.paper_size.dimensions_mm();
        if !(width_mm.is_finite() && height_mm.is_finite() && width_mm > 0.0 && height_mm > 0.0)
        {
            return Err(TileError::Config(format!(
                "Paper size must be positive, got {} x {} mm",
                width_mm, height_mm
            )));
        }

        if !self.margin_mm.is_finite() || self.margin_mm < 0.0 {
            return Err(TileError::Config(format!(
                "Margin must be a non-negative number of mm, got {}",
                self.margin_mm
            )));
        }

        if !self.overlap_mm.is_finite() || self.overlap_mm < 0.0 {
            return Err(TileError::Config(format!(
                "Overlap must be a non-negative number of mm, got {}",
                self.overlap_mm
            )));
        }

        if 2.0 * self.margin_mm >= width_mm.min(height_mm) {
            return Err(TileError::Config(format!(
                "Margins of {} mm leave no printable area on a {} x {} mm page",
                self.margin_mm, width_mm, height_mm
            )));
        }

        if !self.flatten_tolerance_mm.is_finite() || self.flatten_tolerance_mm <= 0.0 {
            return Err(TileError::Config(format!(
                "Curve flattening tolerance must be positive, got {}",
                self.flatten_tolerance_mm
            )));
        }

        if matches!(&self.layers, Some(layers) if layers.is_empty()) {
            return Err(TileError::Config(
                "Layer filter is empty; omit it to keep every layer".to_string(),
            ));
        }

        Ok(())
    }

    /// Derive page measurements. Validates first.
    pub fn page_geometry(&self) -> Result<PageGeometry> {
        self.validate()?;

        let (width_mm, height_mm) = self.paper_size.dimensions_with_orientation(self.orientation);
        let printable_w_mm = width_mm - 2.0 * self.margin_mm;
        let printable_h_mm = height_mm - 2.0 * self.margin_mm;

        Ok(PageGeometry {
            page_width_pt: mm_to_pt(width_mm),
            page_height_pt: mm_to_pt(height_mm),
            margin_pt: mm_to_pt(self.margin_mm),
            scale: self.units.points_per_unit(),
            printable_width_pt: mm_to_pt(printable_w_mm),
            printable_height_pt: mm_to_pt(printable_h_mm),
            printable_width_wu: self.units.mm_to_world(printable_w_mm),
            printable_height_wu: self.units.mm_to_world(printable_h_mm),
            overlap_wu: self.units.mm_to_world(self.overlap_mm),
            overlap_pt: mm_to_pt(self.overlap_mm),
        })
    }

    pub fn entity_filter(&self) -> EntityFilter {
        EntityFilter {
            layers: self.layers.clone(),
            continuous_only: self.continuous_only,
        }
    }

    pub fn sampling_policy(&self) -> SamplingPolicy {
        SamplingPolicy::from_tolerance_mm(self.flatten_tolerance_mm, self.units)
    }
}

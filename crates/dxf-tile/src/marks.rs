//! Assembly aids for tile pages
//!
//! Everything here is laid out in physical page units. Nothing passes
//! through the world transform, so the aids look the same whatever the
//! drawing units are.

use crate::constants::*;
use crate::layout::Rect;
use crate::render::{PageCanvas, TextAlign};

/// Where the seams of one page go
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeamConfig {
    pub page_width: f64,
    pub page_height: f64,
    /// Vertical seam x position, when the tile has a right neighbour
    pub seam_x: Option<f64>,
    /// Horizontal seam y position, when the tile has a neighbour above
    pub seam_y: Option<f64>,
}

/// Draw the 100 mm scale bar with its end ticks and label.
///
/// `origin` is the left end of the bar.
pub fn draw_scale_bar<C: PageCanvas + ?Sized>(canvas: &mut C, origin: (f64, f64)) {
    let (x, y) = origin;
    let length = mm_to_pt(SCALE_BAR_LENGTH_MM);
    let tick = mm_to_pt(SCALE_BAR_TICK_MM);

    canvas.set_line_width(SCALE_BAR_LINE_WIDTH);
    canvas.clear_dash();
    canvas.line((x, y), (x + length, y));
    canvas.line((x, y - tick), (x, y + tick));
    canvas.line((x + length, y - tick), (x + length, y + tick));
    canvas.text(
        x,
        y + mm_to_pt(SCALE_BAR_LABEL_OFFSET_MM),
        SCALE_BAR_FONT_SIZE,
        &format!("{} mm scale bar", SCALE_BAR_LENGTH_MM as i64),
        TextAlign::Left,
    );
}

/// Crop marks outside each printable corner, plus a registration cross
/// centred on the corner.
pub fn draw_crop_marks<C: PageCanvas + ?Sized>(canvas: &mut C, printable: &Rect) {
    let length = mm_to_pt(CROP_MARK_LENGTH_MM);

    canvas.set_line_width(CROP_MARK_WIDTH);
    canvas.clear_dash();

    // Outward directions, in the same order as `Rect::corners`
    let outward = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    for ((x, y), (dx, dy)) in printable.corners().into_iter().zip(outward) {
        // Extension of the vertical edge
        canvas.line(
            (x, y + dy * CROP_MARK_GAP),
            (x, y + dy * (CROP_MARK_GAP + length)),
        );
        // Extension of the horizontal edge
        canvas.line(
            (x + dx * CROP_MARK_GAP, y),
            (x + dx * (CROP_MARK_GAP + length), y),
        );
    }

    canvas.set_line_width(REGISTRATION_MARK_WIDTH);
    for corner in printable.corners() {
        draw_registration_mark(canvas, corner, mm_to_pt(REGISTRATION_MARK_SIZE_MM), true);
    }
}

/// Dashed seam lines where the neighbouring sheet's paper edge lands, each
/// with a cross near both paper edges.
pub fn draw_seam_lines<C: PageCanvas + ?Sized>(canvas: &mut C, seams: &SeamConfig) {
    if seams.seam_x.is_none() && seams.seam_y.is_none() {
        return;
    }

    let inset = mm_to_pt(SEAM_MARK_INSET_MM);
    let size = mm_to_pt(SEAM_MARK_SIZE_MM);

    canvas.set_line_width(SEAM_LINE_WIDTH);
    canvas.set_dash(&SEAM_DASH_PATTERN, 0.0);
    if let Some(x) = seams.seam_x {
        canvas.line((x, 0.0), (x, seams.page_height));
    }
    if let Some(y) = seams.seam_y {
        canvas.line((0.0, y), (seams.page_width, y));
    }
    canvas.clear_dash();

    canvas.set_line_width(REGISTRATION_MARK_WIDTH);
    if let Some(x) = seams.seam_x {
        draw_registration_mark(canvas, (x, inset), size, false);
        draw_registration_mark(canvas, (x, seams.page_height - inset), size, false);
    }
    if let Some(y) = seams.seam_y {
        draw_registration_mark(canvas, (inset, y), size, false);
        draw_registration_mark(canvas, (seams.page_width - inset, y), size, false);
    }
}

/// Crosshair of the given overall size, optionally with a ring
fn draw_registration_mark<C: PageCanvas + ?Sized>(
    canvas: &mut C,
    center: (f64, f64),
    size: f64,
    with_circle: bool,
) {
    let (x, y) = center;
    let half = size / 2.0;
    canvas.line((x - half, y), (x + half, y));
    canvas.line((x, y - half), (x, y + half));
    if with_circle {
        canvas.circle(center, half * 0.5);
    }
}

// =============================================================================
// Tests
// =============================================================================

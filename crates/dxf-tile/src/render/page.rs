//! Tile page composition
//!
//! One call draws one complete page: header, scale bar, assembly aids,
//! geometry and footer, in that order.

use crate::constants::{
    FOOTER_FONT_SIZE, FOOTER_OFFSET, GEOMETRY_LINE_WIDTH, HEADER_FONT_SIZE, HEADER_OFFSET,
    HEADER_TITLE, SCALE_BAR_OFFSET_MM, mm_to_pt,
};
use crate::geometry::{Primitive, Shape};
use crate::layout::{Tile, TileGrid};
use crate::linetype::resolve_dashes;
use crate::marks::{SeamConfig, draw_crop_marks, draw_scale_bar, draw_seam_lines};
use crate::options::{PageGeometry, TileOptions};
use crate::transform::WorldToPage;
use crate::types::AssemblyMarks;

use super::{PageCanvas, TextAlign};

/// Draw the page for one tile.
///
/// Geometry is not culled: everything is drawn through the tile's
/// transform and whatever falls outside the page is discarded by the
/// viewer. A tile with no geometry still gets its page furniture.
pub fn compose_tile<C: PageCanvas + ?Sized>(
    canvas: &mut C,
    tile: &Tile,
    grid: &TileGrid,
    page: &PageGeometry,
    primitives: &[Primitive],
    options: &TileOptions,
) {
    canvas.begin_page(page.page_width_pt, page.page_height_pt);

    draw_header(canvas, tile, grid, page);

    let bar_offset = page.margin_pt + mm_to_pt(SCALE_BAR_OFFSET_MM);
    draw_scale_bar(canvas, (bar_offset, bar_offset));

    match options.marks {
        AssemblyMarks::CropMarks => draw_crop_marks(canvas, &page.printable_rect()),
        AssemblyMarks::SeamLines => draw_seam_lines(canvas, &seam_config(tile, grid, page)),
    }

    let transform = WorldToPage::for_tile(tile, options.units);
    if options.clip_to_printable {
        canvas.set_clip(&page.printable_rect());
    }
    draw_geometry(canvas, &transform, primitives);
    if options.clip_to_printable {
        canvas.clear_clip();
    }

    // World point under the printable corner
    let origin = transform.to_world(tile.page_origin.0, tile.page_origin.1);
    canvas.text(
        page.margin_pt,
        page.margin_pt - FOOTER_OFFSET,
        FOOTER_FONT_SIZE,
        &format!(
            "World origin for tile: ({:.2}, {:.2}) {}",
            origin.x,
            origin.y,
            options.units.label()
        ),
        TextAlign::Left,
    );

    canvas.end_page();
}

fn draw_header<C: PageCanvas + ?Sized>(
    canvas: &mut C,
    tile: &Tile,
    grid: &TileGrid,
    page: &PageGeometry,
) {
    let y = page.page_height_pt - page.margin_pt + HEADER_OFFSET;
    canvas.text(
        page.margin_pt,
        y,
        HEADER_FONT_SIZE,
        &tile.label(grid),
        TextAlign::Left,
    );
    canvas.text(
        page.page_width_pt - page.margin_pt,
        y,
        HEADER_FONT_SIZE,
        HEADER_TITLE,
        TextAlign::Right,
    );
}

/// Seams sit where the neighbour's paper edge lands on this page. Without
/// overlap there is nothing to align, so no seams are drawn.
pub fn seam_config(tile: &Tile, grid: &TileGrid, page: &PageGeometry) -> SeamConfig {
    let has_overlap = page.overlap_pt > 0.0;
    let step_w_pt = page.printable_width_pt - page.overlap_pt;
    let step_h_pt = page.printable_height_pt - page.overlap_pt;
    SeamConfig {
        page_width: page.page_width_pt,
        page_height: page.page_height_pt,
        seam_x: (has_overlap && grid.has_right_neighbour(tile)).then_some(step_w_pt),
        seam_y: (has_overlap && grid.has_top_neighbour(tile)).then_some(step_h_pt),
    }
}

fn draw_geometry<C: PageCanvas + ?Sized>(
    canvas: &mut C,
    transform: &WorldToPage,
    primitives: &[Primitive],
) {
    canvas.set_line_width(GEOMETRY_LINE_WIDTH);
    canvas.clear_dash();

    for primitive in primitives {
        let continuous = primitive.linetype.is_continuous();
        match &primitive.shape {
            Shape::Point(_) => {}
            Shape::Circle { center, radius, .. } if continuous => {
                canvas.circle(transform.to_page(*center), transform.length(*radius));
            }
            Shape::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                ..
            } if continuous => {
                canvas.arc(
                    transform.to_page(*center),
                    transform.length(*radius),
                    *start_angle,
                    *end_angle,
                );
            }
            Shape::Polyline { points, closed } | Shape::Curve { points, closed }
                if continuous =>
            {
                let page_points: Vec<_> = points.iter().map(|&p| transform.to_page(p)).collect();
                canvas.polyline(&page_points, *closed && page_points.len() > 2);
            }
            shape => {
                let Some(path) = shape.stroke_path() else {
                    continue;
                };
                for dash in resolve_dashes(&path, primitive.linetype.pattern.as_ref()) {
                    let page_points: Vec<_> =
                        dash.iter().map(|&p| transform.to_page(p)).collect();
                    canvas.polyline(&page_points, false);
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

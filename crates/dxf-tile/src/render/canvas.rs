//! Page drawing interface
//!
//! Coordinates are PDF points with the origin at the bottom-left of the
//! page. Implementations hold the current line width and dash state.

use crate::layout::Rect;

/// Horizontal anchoring of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// `x` is the left end of the text
    Left,
    /// `x` is the right end of the text
    Right,
}

/// Drawing operations used to compose a tile page
pub trait PageCanvas {
    fn begin_page(&mut self, width_pt: f64, height_pt: f64);
    fn set_line_width(&mut self, width: f64);
    /// Dash lengths in points, alternating on and off
    fn set_dash(&mut self, pattern: &[f64], phase: f64);
    fn clear_dash(&mut self);
    fn line(&mut self, from: (f64, f64), to: (f64, f64));
    fn polyline(&mut self, points: &[(f64, f64)], closed: bool);
    fn circle(&mut self, center: (f64, f64), radius: f64);
    /// Counter-clockwise arc, angles in degrees
    fn arc(&mut self, center: (f64, f64), radius: f64, start_angle: f64, end_angle: f64);
    /// Restrict drawing to `rect` until [`PageCanvas::clear_clip`].
    /// Clearing also restores the line width and dash set before the clip.
    fn set_clip(&mut self, rect: &Rect);
    fn clear_clip(&mut self);
    fn text(&mut self, x: f64, y: f64, size: f64, text: &str, align: TextAlign);
    fn end_page(&mut self);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    BeginPage { width: f64, height: f64 },
    LineWidth(f64),
    Dash(Vec<f64>),
    ClearDash,
    Line { from: (f64, f64), to: (f64, f64) },
    Polyline { points: Vec<(f64, f64)>, closed: bool },
    Circle { center: (f64, f64), radius: f64 },
    Arc {
        center: (f64, f64),
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Clip(Rect),
    ClearClip,
    Text {
        x: f64,
        y: f64,
        size: f64,
        text: String,
        align: TextAlign,
    },
    EndPage,
}

/// Canvas that keeps every call, for inspecting composed pages
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls grouped per page, page markers removed
    pub fn pages(&self) -> Vec<Vec<DrawOp>> {
        let mut pages = Vec::new();
        let mut current: Option<Vec<DrawOp>> = None;
        for op in &self.ops {
            match op {
                DrawOp::BeginPage { .. } => current = Some(Vec::new()),
                DrawOp::EndPage => pages.extend(current.take()),
                other => {
                    if let Some(page) = current.as_mut() {
                        page.push(other.clone());
                    }
                }
            }
        }
        pages.extend(current);
        pages
    }

    /// Text runs drawn so far
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl PageCanvas for RecordingCanvas {
    fn begin_page(&mut self, width_pt: f64, height_pt: f64) {
        self.ops.push(DrawOp::BeginPage {
            width: width_pt,
            height: height_pt,
        });
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn set_dash(&mut self, pattern: &[f64], _phase: f64) {
        self.ops.push(DrawOp::Dash(pattern.to_vec()));
    }

    fn clear_dash(&mut self) {
        self.ops.push(DrawOp::ClearDash);
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.ops.push(DrawOp::Line { from, to });
    }

    fn polyline(&mut self, points: &[(f64, f64)], closed: bool) {
        self.ops.push(DrawOp::Polyline {
            points: points.to_vec(),
            closed,
        });
    }

    fn circle(&mut self, center: (f64, f64), radius: f64) {
        self.ops.push(DrawOp::Circle { center, radius });
    }

    fn arc(&mut self, center: (f64, f64), radius: f64, start_angle: f64, end_angle: f64) {
        self.ops.push(DrawOp::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn set_clip(&mut self, rect: &Rect) {
        self.ops.push(DrawOp::Clip(*rect));
    }

    fn clear_clip(&mut self) {
        self.ops.push(DrawOp::ClearClip);
    }

    fn text(&mut self, x: f64, y: f64, size: f64, text: &str, align: TextAlign) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            size,
            text: text.to_string(),
            align,
        });
    }

    fn end_page(&mut self) {
        self.ops.push(DrawOp::EndPage);
    }
}

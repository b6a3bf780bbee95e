//! lopdf-backed page canvas
//!
//! Drawing calls are turned into content stream operators as they arrive.
//! Each finished page becomes a page object sharing one Helvetica font
//! resource; `finish` adds the page tree and catalog.

use crate::constants::{BEZIER_CIRCLE_FACTOR, HELVETICA_CHAR_WIDTH_RATIO};
use crate::geometry::arc_sweep_degrees;
use crate::layout::Rect;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::f64::consts::FRAC_PI_2;

use super::{PageCanvas, TextAlign};

/// Page being drawn
struct OpenPage {
    width: f64,
    height: f64,
    ops: String,
    clip_depth: usize,
}

/// Canvas that writes pages into an in-memory PDF document
pub struct PdfCanvas {
    doc: Document,
    pages_tree_id: ObjectId,
    font_id: ObjectId,
    page_refs: Vec<Object>,
    current: Option<OpenPage>,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfCanvas {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_tree_id = doc.new_object_id();

        let mut font_dict = Dictionary::new();
        font_dict.set("Type", Object::Name(b"Font".to_vec()));
        font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        let font_id = doc.add_object(font_dict);

        Self {
            doc,
            pages_tree_id,
            font_id,
            page_refs: Vec::new(),
            current: None,
        }
    }

    /// Number of pages finished so far
    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Close any open page and assemble the document
    pub fn finish(mut self) -> Document {
        self.end_page();

        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);

        self.doc
    }

    fn push(&mut self, op: &str) {
        if let Some(page) = self.current.as_mut() {
            page.ops.push_str(op);
        }
    }
}

/// Format a coordinate for the content stream
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape a string for a PDF literal; characters outside ASCII become '?'
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            _ => out.push('?'),
        }
    }
    out
}

/// Cubic Bézier segments for a counter-clockwise arc, each at most 90°
fn arc_curves(center: (f64, f64), radius: f64, start_rad: f64, sweep_rad: f64) -> String {
    let (cx, cy) = center;
    let pieces = (sweep_rad / FRAC_PI_2).ceil().max(1.0) as usize;
    let delta = sweep_rad / pieces as f64;
    let k = radius * 4.0 / 3.0 * (delta / 4.0).tan();

    let mut ops = format!(
        "{} {} m\n",
        num(cx + radius * start_rad.cos()),
        num(cy + radius * start_rad.sin())
    );
    for i in 0..pieces {
        let a0 = start_rad + delta * i as f64;
        let a1 = a0 + delta;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        ops.push_str(&format!(
            "{} {} {} {} {} {} c\n",
            num(cx + radius * c0 - k * s0),
            num(cy + radius * s0 + k * c0),
            num(cx + radius * c1 + k * s1),
            num(cy + radius * s1 - k * c1),
            num(cx + radius * c1),
            num(cy + radius * s1)
        ));
    }
    ops
}

impl PageCanvas for PdfCanvas {
    fn begin_page(&mut self, width_pt: f64, height_pt: f64) {
        self.end_page();
        self.current = Some(OpenPage {
            width: width_pt,
            height: height_pt,
            // Black strokes and fills, round joins for flattened curves
            ops: "0 0 0 RG\n0 0 0 rg\n1 j\n".to_string(),
            clip_depth: 0,
        });
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(&format!("{} w\n", num(width)));
    }

    fn set_dash(&mut self, pattern: &[f64], phase: f64) {
        let lengths: Vec<String> = pattern.iter().map(|&v| num(v)).collect();
        self.push(&format!("[{}] {} d\n", lengths.join(" "), num(phase)));
    }

    fn clear_dash(&mut self) {
        self.push("[] 0 d\n");
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64)) {
        self.push(&format!(
            "{} {} m {} {} l S\n",
            num(from.0),
            num(from.1),
            num(to.0),
            num(to.1)
        ));
    }

    fn polyline(&mut self, points: &[(f64, f64)], closed: bool) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut ops = format!("{} {} m\n", num(first.0), num(first.1));
        if rest.is_empty() {
            // Single point: a zero-length segment so round caps can show it
            ops.push_str(&format!("{} {} l\n", num(first.0), num(first.1)));
        }
        for p in rest {
            ops.push_str(&format!("{} {} l\n", num(p.0), num(p.1)));
        }
        ops.push_str(if closed { "s\n" } else { "S\n" });
        self.push(&ops);
    }

    fn circle(&mut self, center: (f64, f64), radius: f64) {
        let (cx, cy) = center;
        let r = radius;
        let k = r * BEZIER_CIRCLE_FACTOR;
        let mut ops = format!("{} {} m\n", num(cx + r), num(cy));
        let quarters = [
            (cx + r, cy + k, cx + k, cy + r, cx, cy + r),
            (cx - k, cy + r, cx - r, cy + k, cx - r, cy),
            (cx - r, cy - k, cx - k, cy - r, cx, cy - r),
            (cx + k, cy - r, cx + r, cy - k, cx + r, cy),
        ];
        for (x1, y1, x2, y2, x3, y3) in quarters {
            ops.push_str(&format!(
                "{} {} {} {} {} {} c\n",
                num(x1),
                num(y1),
                num(x2),
                num(y2),
                num(x3),
                num(y3)
            ));
        }
        ops.push_str("s\n");
        self.push(&ops);
    }

    fn arc(&mut self, center: (f64, f64), radius: f64, start_angle: f64, end_angle: f64) {
        let sweep = arc_sweep_degrees(start_angle, end_angle).to_radians();
        let mut ops = arc_curves(center, radius, start_angle.to_radians(), sweep);
        ops.push_str("S\n");
        self.push(&ops);
    }

    fn set_clip(&mut self, rect: &Rect) {
        if let Some(page) = self.current.as_mut() {
            page.clip_depth += 1;
            page.ops.push_str(&format!(
                "q {} {} {} {} re W n\n",
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height)
            ));
        }
    }

    fn clear_clip(&mut self) {
        if let Some(page) = self.current.as_mut() {
            if page.clip_depth > 0 {
                page.clip_depth -= 1;
                page.ops.push_str("Q\n");
            }
        }
    }

    fn text(&mut self, x: f64, y: f64, size: f64, text: &str, align: TextAlign) {
        let x = match align {
            TextAlign::Left => x,
            TextAlign::Right => {
                x - text.chars().count() as f64 * size * HELVETICA_CHAR_WIDTH_RATIO
            }
        };
        self.push(&format!(
            "BT /F1 {} Tf {} {} Td ({}) Tj ET\n",
            num(size),
            num(x),
            num(y),
            escape_text(text)
        ));
    }

    fn end_page(&mut self) {
        let Some(mut page) = self.current.take() else {
            return;
        };
        for _ in 0..page.clip_depth {
            page.ops.push_str("Q\n");
        }

        let mut fonts = Dictionary::new();
        fonts.set("F1", Object::Reference(self.font_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));

        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), page.ops.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page.width as f32),
                Object::Real(page.height as f32),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.doc.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
    }
}

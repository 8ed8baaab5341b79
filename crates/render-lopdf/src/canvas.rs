use crate::text::{text_width, to_win_ansi};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use powerdeck_types::{Color, Rect};

/// The two standard fonts every page registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfFont {
    Regular,
    Bold,
}

impl PdfFont {
    pub fn resource_name(self) -> &'static str {
        match self {
            PdfFont::Regular => "F1",
            PdfFont::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            PdfFont::Regular => "Helvetica",
            PdfFont::Bold => "Helvetica-Bold",
        }
    }
}

fn rgb_operands(color: Color) -> Vec<Object> {
    let [r, g, b] = color.unit_rgb();
    vec![r.into(), g.into(), b.into()]
}

/// Collects content-stream operations for one page.
///
/// Callers work in top-down coordinates (y grows downwards from the top edge);
/// the canvas flips them into PDF user space.
pub struct PageCanvas {
    page_height: f32,
    content: Content,
}

impl PageCanvas {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
        }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn flip(&self, rect: &Rect) -> f32 {
        self.page_height - (rect.y + rect.height)
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let y = self.flip(rect);
        self.push("rg", rgb_operands(color));
        self.push("re", vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()]);
        self.push("f", vec![]);
    }

    pub fn stroke_rect(&mut self, rect: &Rect, color: Color, width: f32) {
        let y = self.flip(rect);
        self.push("w", vec![width.into()]);
        self.push("RG", rgb_operands(color));
        self.push("re", vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()]);
        self.push("S", vec![]);
    }

    /// A filled closed path through three top-down points.
    pub fn fill_triangle(&mut self, points: [(f32, f32); 3], color: Color) {
        self.push("rg", rgb_operands(color));
        for (i, (x, y)) in points.into_iter().enumerate() {
            let op = if i == 0 { "m" } else { "l" };
            self.push(op, vec![x.into(), (self.page_height - y).into()]);
        }
        self.push("h", vec![]);
        self.push("f", vec![]);
    }

    /// Draws `text` with its baseline at top-down `baseline`.
    pub fn text(&mut self, text: &str, font: PdfFont, size: f32, x: f32, baseline: f32, color: Color) {
        if text.trim().is_empty() {
            return;
        }
        self.push("BT", vec![]);
        self.push("Tf", vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()]);
        self.push("rg", rgb_operands(color));
        self.push("Td", vec![x.into(), (self.page_height - baseline).into()]);
        self.push("Tj", vec![Object::String(to_win_ansi(text), StringFormat::Literal)]);
        self.push("ET", vec![]);
    }

    pub fn text_centered(&mut self, text: &str, font: PdfFont, size: f32, center_x: f32, baseline: f32, color: Color) {
        let x = center_x - text_width(text, font, size) / 2.0;
        self.text(text, font, size, x, baseline, color);
    }

    /// Paints the image XObject `name` into `rect`.
    pub fn image(&mut self, name: &str, rect: &Rect) {
        let y = self.flip(rect);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![rect.width.into(), 0.into(), 0.into(), rect.height.into(), rect.x.into(), y.into()],
        );
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }

    pub fn operations(&self) -> &[Operation] {
        &self.content.operations
    }

    pub fn finish(self) -> Content {
        self.content
    }
}

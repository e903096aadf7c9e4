//! Page content for report pages.
//!
//! Only what a report draws: single lines of Base-14 text at a position,
//! an RGB fill for that text, and stroked horizontal rules.

use super::object_serializer::format_real;
use crate::fonts::encode_literal;

/// One step of a page's drawing program.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// `BT`
    BeginText,
    /// `ET`
    EndText,
    /// `/F1 11 Tf`
    SetFont(String, f32),
    /// `1 0 0 1 x y Tm`
    MoveText(f32, f32),
    /// `(...) Tj`, Latin-1 escaped
    ShowText(String),
    /// `r g b rg`
    FillColor(f32, f32, f32),
    /// Stroked segment in its own `q ... Q` so stroke state never leaks into
    /// text
    Rule {
        /// Start point
        from: (f32, f32),
        /// End point
        to: (f32, f32),
        /// Line width in points
        width: f32,
        /// Stroke color
        color: (f32, f32, f32),
    },
}

/// Records drawing operations for one page.
///
/// Font and fill changes that would not change anything are skipped, so a
/// page of body text sets its font once.
#[derive(Debug, Default, Clone)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentStreamOp>,
    current_font: Option<(String, f32)>,
    current_fill: Option<(f32, f32, f32)>,
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw operation.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    fn open_text(&mut self) {
        if !self.in_text_object {
            self.operations.push(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
    }

    /// Close the open text object, if any.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.operations.push(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Font resource and size for the text that follows.
    pub fn set_font(&mut self, resource_id: &str, size: f32) -> &mut Self {
        let wanted = (resource_id.to_string(), size);
        if self.current_font.as_ref() != Some(&wanted) {
            self.open_text();
            self.operations.push(ContentStreamOp::SetFont(wanted.0.clone(), size));
            self.current_font = Some(wanted);
        }
        self
    }

    /// Fill color for the text that follows.
    pub fn set_fill_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        if self.current_fill != Some((r, g, b)) {
            self.operations.push(ContentStreamOp::FillColor(r, g, b));
            self.current_fill = Some((r, g, b));
        }
        self
    }

    /// One line of text, baseline starting at (x, y) in points.
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.open_text();
        self.operations.push(ContentStreamOp::MoveText(x, y));
        self.op(ContentStreamOp::ShowText(text.to_string()))
    }

    /// Straight stroked line between two points, in points.
    pub fn line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: (f32, f32, f32),
    ) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::Rule {
            from: (x1, y1),
            to: (x2, y2),
            width,
            color,
        })
    }

    /// Operations recorded so far.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// True for a blank page.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Serialize, closing a text object left open.
    pub fn build(&self) -> Vec<u8> {
        let mut out = String::new();
        for op in &self.operations {
            write_op(&mut out, op);
            out.push('\n');
        }
        if self.in_text_object {
            out.push_str("ET\n");
        }
        out.into_bytes()
    }
}

/// Operands are written to 1/1000 pt.
fn num(value: f32) -> String {
    format_real(f64::from(value), 3)
}

fn write_op(out: &mut String, op: &ContentStreamOp) {
    let text = match op {
        ContentStreamOp::BeginText => "BT".to_string(),
        ContentStreamOp::EndText => "ET".to_string(),
        ContentStreamOp::SetFont(name, size) => format!("/{} {} Tf", name, num(*size)),
        ContentStreamOp::MoveText(x, y) => format!("1 0 0 1 {} {} Tm", num(*x), num(*y)),
        ContentStreamOp::ShowText(text) => format!("{} Tj", encode_literal(text)),
        ContentStreamOp::FillColor(r, g, b) => format!("{} {} {} rg", num(*r), num(*g), num(*b)),
        ContentStreamOp::Rule {
            from,
            to,
            width,
            color,
        } => format!(
            "q\n{} {} {} RG\n{} w\n{} {} m\n{} {} l\nS\nQ",
            num(color.0),
            num(color.1),
            num(color.2),
            num(*width),
            num(from.0),
            num(from.1),
            num(to.0),
            num(to.1)
        ),
    };
    out.push_str(&text);
}

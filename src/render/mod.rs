//! Rendering page blocks onto a drawing surface.
//!
//! ## Architecture
//!
//! ```text
//! Vec<PageBlock>
//!     ↓
//! [Renderer] (Flow placement, fonts, colors)
//!     ↓
//! [Canvas] ── PdfCanvas  (writer::PdfWriter, mm → pt, y flipped)
//!          └─ TextCanvas (column-mapped text grid)
//!     ↓
//! header/footer pass (RunningTemplate, total page count known)
//!     ↓
//! RenderOutput { bytes, page_count }
//! ```

mod pdf_canvas;
mod text_canvas;

pub use pdf_canvas::PdfCanvas;
pub use text_canvas::TextCanvas;

use crate::config::{ReportConfig, Rgb};
use crate::delivery::OutputFormat;
use crate::error::{Error, Result};
use crate::fonts::sanitize;
use crate::report::{assemble, Flow, PageBlock, ReportRequest};
use crate::writer::{Anchor, PageContext, RunningLine, RunningTemplate};
use chrono::NaiveDate;

/// A drawing surface. Coordinates are millimetres from the top-left corner.
pub trait Canvas {
    /// Append a page and make it current. Returns its index.
    fn add_page(&mut self) -> Result<usize>;

    /// Number of pages added so far.
    fn page_count(&self) -> usize;

    /// Make an existing page current.
    fn select_page(&mut self, index: usize) -> Result<()>;

    /// Font for subsequent text.
    fn set_font(&mut self, name: &str, size: f32) -> Result<()>;

    /// Color for subsequent text.
    fn set_text_color(&mut self, color: Rgb) -> Result<()>;

    /// Draw one line of text. `x` is the left edge, `y` the top of a line box
    /// `line_height` tall; the text is vertically centered in the box.
    fn draw_text(&mut self, x: f32, y: f32, line_height: f32, text: &str) -> Result<()>;

    /// Draw a horizontal rule from `x1` to `x2` at `y`.
    fn draw_rule(&mut self, x1: f32, x2: f32, y: f32) -> Result<()>;

    /// Produce the finished buffer.
    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

/// Rendered report bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Document bytes
    pub bytes: Vec<u8>,
    /// Number of pages
    pub page_count: usize,
}

/// Draws blocks onto a canvas, then decorates every page.
pub struct Renderer<C: Canvas> {
    canvas: C,
    flow: Flow,
    template: RunningTemplate,
}

impl<C: Canvas> Renderer<C> {
    /// Create a renderer using the configuration's geometry and template.
    pub fn new(canvas: C, config: &ReportConfig) -> Self {
        Self::with_template(canvas, config, RunningTemplate::from_config(config))
    }

    /// Create a renderer with an explicit header/footer template.
    pub fn with_template(canvas: C, config: &ReportConfig, template: RunningTemplate) -> Self {
        Self {
            canvas,
            flow: Flow::from_config(config),
            template,
        }
    }

    /// Render blocks. `title` and `date` fill the `{title}` and `{date}`
    /// placeholders of the running header and footer.
    pub fn render(
        mut self,
        blocks: &[PageBlock],
        title: &str,
        date: NaiveDate,
    ) -> Result<RenderOutput> {
        self.draw_blocks(blocks).map_err(as_rendering)?;

        let page_count = self.canvas.page_count();
        self.decorate(page_count, title, date).map_err(as_rendering)?;

        let bytes = self.canvas.finish().map_err(as_rendering)?;
        log::info!("Rendered {} pages, {} bytes", page_count, bytes.len());
        Ok(RenderOutput { bytes, page_count })
    }

    fn draw_blocks(&mut self, blocks: &[PageBlock]) -> Result<()> {
        self.canvas.add_page()?;
        let mut cursor = self.flow.start();

        for block in blocks {
            let placement = self.flow.place(cursor, block);
            if !placement.lines.is_empty() {
                self.canvas.set_font(self.flow.font_name(&block.style), block.style.size)?;
                self.canvas.set_text_color(block.style.color)?;
            }
            for line in &placement.lines {
                let page = line.cursor.page_index;
                while self.canvas.page_count() <= page {
                    self.canvas.add_page()?;
                }
                self.canvas.select_page(page)?;
                self.canvas
                    .draw_text(line.x, line.cursor.y_offset, block.style.line_height, &line.text)?;
            }
            cursor = placement.end;
        }
        Ok(())
    }

    fn decorate(&mut self, page_count: usize, title: &str, date: NaiveDate) -> Result<()> {
        if self.template.is_empty() {
            return Ok(());
        }
        let geometry = *self.flow.geometry();
        let header = self.template.header.clone();
        let footer = self.template.footer.clone();

        for index in 0..page_count {
            self.canvas.select_page(index)?;
            let context = PageContext::new(index + 1, page_count).titled(title).dated(date);

            if let Some(header) = &header {
                self.draw_running(header, &context, geometry.margin_top, geometry.header_height)?;
                if let Some(offset) = header.rule_below {
                    self.canvas.draw_rule(
                        geometry.margin_left,
                        geometry.content_right(),
                        geometry.margin_top + offset,
                    )?;
                }
            }
            if let Some(footer) = &footer {
                self.draw_running(footer, &context, geometry.footer_top(), FOOTER_LINE_HEIGHT)?;
            }
        }
        Ok(())
    }

    fn draw_running(
        &mut self,
        element: &RunningLine,
        context: &PageContext,
        y: f32,
        line_height: f32,
    ) -> Result<()> {
        let text = element.fill(context);
        let text = sanitize(&text);
        if text.trim().is_empty() {
            return Ok(());
        }

        let style = &element.style;
        let font = self.flow.face(style.weight, style.italic);
        let width = self.flow.text_width(&text, font, style.size);
        let geometry = self.flow.geometry();
        let x = match element.anchor {
            Anchor::Left => geometry.margin_left,
            Anchor::Center => {
                geometry.margin_left + (geometry.content_width() - width).max(0.0) / 2.0
            },
            Anchor::Right => (geometry.content_right() - width).max(geometry.margin_left),
        };

        self.canvas.set_font(font, style.size)?;
        self.canvas.set_text_color(style.color)?;
        self.canvas.draw_text(x, y, line_height, &text)
    }
}

/// Height of the footer line box (mm).
const FOOTER_LINE_HEIGHT: f32 = 10.0;

fn as_rendering(err: Error) -> Error {
    match err {
        Error::Rendering(_) => err,
        other => Error::rendering(other),
    }
}

/// Assemble and render a request in one step.
pub fn generate(
    request: &ReportRequest,
    config: &ReportConfig,
    format: OutputFormat,
) -> Result<RenderOutput> {
    config.validate()?;
    let blocks = assemble(request, config);
    let date = request.generated_at();

    match format {
        OutputFormat::Pdf => {
            let canvas = PdfCanvas::new(config, &request.title, date);
            Renderer::new(canvas, config).render(&blocks, &request.title, date)
        },
        OutputFormat::Text => {
            let canvas = TextCanvas::new(config.geometry);
            Renderer::new(canvas, config).render(&blocks, &request.title, date)
        },
    }
}

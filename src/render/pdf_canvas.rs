//! Canvas backed by [`PdfWriter`].

use super::Canvas;
use crate::config::{ReportConfig, Rgb};
use crate::error::{Error, Result};
use crate::geometry::{mm_to_pt, pt_to_mm, PageGeometry};
use crate::writer::{PdfWriter, PdfWriterConfig};
use chrono::NaiveDate;

/// Stroke width of rules in millimetres.
const RULE_WIDTH_MM: f32 = 0.2;

/// Distance from the vertical center of a line box down to the baseline,
/// as a fraction of the font size.
const BASELINE_SHIFT: f32 = 0.3;

/// Draws onto PDF pages. Millimetres from the top-left are converted to
/// points from the bottom-left.
pub struct PdfCanvas {
    writer: PdfWriter,
    geometry: PageGeometry,
    current: Option<usize>,
    font: (String, f32),
    color: Rgb,
}

impl PdfCanvas {
    /// Create a canvas whose document info carries `title` and `date`.
    pub fn new(config: &ReportConfig, title: &str, date: NaiveDate) -> Self {
        let mut writer_config = PdfWriterConfig::default()
            .with_title(title)
            .with_creation_date(date)
            .with_compress(config.compress);
        if let Some(author) = &config.author {
            writer_config = writer_config.with_author(author.clone());
        }
        Self {
            writer: PdfWriter::with_config(writer_config),
            geometry: config.geometry,
            current: None,
            font: ("Helvetica".to_string(), 12.0),
            color: Rgb::BLACK,
        }
    }

    fn current_page(&self) -> Result<usize> {
        self.current
            .ok_or_else(|| Error::rendering("no page has been added to the canvas"))
    }

    /// PDF y coordinate of the baseline for a line box at `y` (mm).
    fn baseline(&self, y: f32, line_height: f32, size: f32) -> f32 {
        let baseline_mm = y + line_height / 2.0 + BASELINE_SHIFT * pt_to_mm(size);
        mm_to_pt(self.geometry.height - baseline_mm)
    }
}

impl Canvas for PdfCanvas {
    fn add_page(&mut self) -> Result<usize> {
        let page = self
            .writer
            .add_page(mm_to_pt(self.geometry.width), mm_to_pt(self.geometry.height));
        let index = page.index();
        page.finish();
        self.current = Some(index);
        Ok(index)
    }

    fn page_count(&self) -> usize {
        self.writer.page_count()
    }

    fn select_page(&mut self, index: usize) -> Result<()> {
        if index >= self.writer.page_count() {
            return Err(Error::rendering(format!(
                "page {} out of range ({} pages)",
                index,
                self.writer.page_count()
            )));
        }
        self.current = Some(index);
        Ok(())
    }

    fn set_font(&mut self, name: &str, size: f32) -> Result<()> {
        if size <= 0.0 {
            return Err(Error::rendering(format!("invalid font size {}", size)));
        }
        self.font = (name.to_string(), size);
        Ok(())
    }

    fn set_text_color(&mut self, color: Rgb) -> Result<()> {
        self.color = color;
        Ok(())
    }

    fn draw_text(&mut self, x: f32, y: f32, line_height: f32, text: &str) -> Result<()> {
        let index = self.current_page()?;
        let (font, size) = (self.font.0.clone(), self.font.1);
        let baseline = self.baseline(y, line_height, size);
        let (r, g, b) = self.color.to_unit();

        let mut page = self
            .writer
            .page(index)
            .ok_or_else(|| Error::rendering(format!("page {} vanished", index)))?;
        page.set_fill_color(r, g, b)
            .add_text(text, mm_to_pt(x), baseline, &font, size);
        page.finish();
        Ok(())
    }

    fn draw_rule(&mut self, x1: f32, x2: f32, y: f32) -> Result<()> {
        let index = self.current_page()?;
        let y_pt = mm_to_pt(self.geometry.height - y);
        let mut page = self
            .writer
            .page(index)
            .ok_or_else(|| Error::rendering(format!("page {} vanished", index)))?;
        page.draw_line(mm_to_pt(x1), y_pt, mm_to_pt(x2), y_pt, mm_to_pt(RULE_WIDTH_MM));
        page.finish();
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> PdfCanvas {
        PdfCanvas::new(
            &ReportConfig::default(),
            "Quantum Computing",
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        )
    }

    #[test]
    fn test_draw_without_page_fails() {
        let mut canvas = canvas();
        let err = canvas.draw_text(10.0, 20.0, 7.0, "hello").unwrap_err();
        assert!(matches!(err, Error::Rendering(_)));
        assert!(canvas.select_page(0).is_err());
    }

    #[test]
    fn test_baseline_flips_axis() {
        let canvas = canvas();
        // Line box at the top content edge, 10 mm high, 16 pt text
        let baseline = canvas.baseline(20.0, 10.0, 16.0);
        let expected_mm = 297.0 - (20.0 + 5.0 + 0.3 * pt_to_mm(16.0));
        assert!((baseline - mm_to_pt(expected_mm)).abs() < 0.01);
    }

    #[test]
    fn test_pages_and_text_reach_pdf() {
        let mut canvas = canvas();
        canvas.add_page().unwrap();
        canvas.set_font("Helvetica-Bold", 16.0).unwrap();
        canvas.draw_text(10.0, 20.0, 10.0, "1. EXECUTIVE SUMMARY").unwrap();
        canvas.add_page().unwrap();
        canvas.draw_rule(10.0, 200.0, 18.0).unwrap();
        assert_eq!(canvas.page_count(), 2);

        let bytes = canvas.finish().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.7"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/Helvetica-Bold"));
        assert!(text.contains("(1. EXECUTIVE SUMMARY) Tj"));
        assert!(text.contains("(Quantum Computing)"));
    }

    #[test]
    fn test_rejects_zero_font_size() {
        let mut canvas = canvas();
        assert!(canvas.set_font("Helvetica", 0.0).is_err());
    }
}

//! Plain-text canvas: each page becomes a character grid.
//!
//! Positions in millimetres map onto a fixed grid of columns and rows, so the
//! text output keeps the PDF's pagination and rough placement. Lines that are
//! wider than the grid run past its right edge instead of being cut.

use super::Canvas;
use crate::config::Rgb;
use crate::error::{Error, Result};
use crate::geometry::PageGeometry;

/// Default grid width in characters.
pub const DEFAULT_COLUMNS: usize = 80;

/// Default grid height in rows.
pub const DEFAULT_ROWS: usize = 66;

/// Separator written between pages.
const PAGE_SEPARATOR: &str = "\u{000C}";

/// Renders pages into a text grid.
#[derive(Debug, Clone)]
pub struct TextCanvas {
    geometry: PageGeometry,
    columns: usize,
    rows: usize,
    pages: Vec<Vec<Vec<char>>>,
    current: Option<usize>,
}

impl TextCanvas {
    /// Create a canvas with the default 80x66 grid.
    pub fn new(geometry: PageGeometry) -> Self {
        Self::with_grid(geometry, DEFAULT_COLUMNS, DEFAULT_ROWS)
    }

    /// Create a canvas with a custom grid size.
    pub fn with_grid(geometry: PageGeometry, columns: usize, rows: usize) -> Self {
        Self {
            geometry,
            columns: columns.max(1),
            rows: rows.max(1),
            pages: Vec::new(),
            current: None,
        }
    }

    fn column(&self, x: f32) -> usize {
        let col = (x / self.geometry.width * self.columns as f32).round();
        col.max(0.0) as usize
    }

    fn row(&self, y: f32) -> usize {
        let row = (y / self.geometry.height * self.rows as f32 + 1e-3).floor().max(0.0) as usize;
        row.min(self.rows - 1)
    }

    fn grid(&mut self) -> Result<&mut Vec<Vec<char>>> {
        let index = self
            .current
            .ok_or_else(|| Error::rendering("no page has been added to the canvas"))?;
        self.pages
            .get_mut(index)
            .ok_or_else(|| Error::rendering(format!("page {} out of range", index)))
    }

    fn write_at(&mut self, row: usize, col: usize, text: impl Iterator<Item = char>) -> Result<()> {
        let line = &mut self.grid()?[row];
        for (offset, ch) in text.enumerate() {
            let at = col + offset;
            if line.len() <= at {
                line.resize(at + 1, ' ');
            }
            line[at] = ch;
        }
        Ok(())
    }
}

impl Canvas for TextCanvas {
    fn add_page(&mut self) -> Result<usize> {
        self.pages.push(vec![Vec::new(); self.rows]);
        let index = self.pages.len() - 1;
        self.current = Some(index);
        Ok(index)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn select_page(&mut self, index: usize) -> Result<()> {
        if index >= self.pages.len() {
            return Err(Error::rendering(format!(
                "page {} out of range ({} pages)",
                index,
                self.pages.len()
            )));
        }
        self.current = Some(index);
        Ok(())
    }

    fn set_font(&mut self, _name: &str, _size: f32) -> Result<()> {
        Ok(())
    }

    fn set_text_color(&mut self, _color: Rgb) -> Result<()> {
        Ok(())
    }

    fn draw_text(&mut self, x: f32, y: f32, line_height: f32, text: &str) -> Result<()> {
        let row = self.row(y + line_height / 2.0);
        let col = self.column(x);
        self.write_at(row, col, text.chars())
    }

    fn draw_rule(&mut self, x1: f32, x2: f32, y: f32) -> Result<()> {
        let row = self.row(y);
        let (start, end) = (self.column(x1), self.column(x2));
        let len = end.saturating_sub(start);
        self.write_at(row, start, std::iter::repeat('-').take(len))
    }

    fn finish(self) -> Result<Vec<u8>> {
        let pages: Vec<String> = self
            .pages
            .iter()
            .map(|grid| {
                let mut lines: Vec<String> = grid
                    .iter()
                    .map(|row| row.iter().collect::<String>().trim_end().to_string())
                    .collect();
                while lines.last().is_some_and(|l| l.is_empty()) {
                    lines.pop();
                }
                let mut page = lines.join("\n");
                page.push('\n');
                page
            })
            .collect();
        Ok(pages.join(PAGE_SEPARATOR).into_bytes())
    }
}

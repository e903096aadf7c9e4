//! Vertical flow of blocks across pages.
//!
//! [`LayoutCursor`] is a plain value: every [`Flow`] operation takes a cursor
//! and hands back a new one, so the assembler can simulate pagination with
//! exactly the arithmetic the renderer later uses to draw.

use super::block::{Align, BlockStyle, PageBlock};
use crate::config::ReportConfig;
use crate::geometry::{mm_to_pt, pt_to_mm, PageGeometry};
use crate::writer::{FontFamily, FontWeight, TextLayout};

/// Tolerance for comparing millimetre offsets.
const EPSILON: f32 = 1e-3;

/// Position in the document: a page and a distance from its top edge (mm).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    /// Zero-based page index
    pub page_index: usize,
    /// Distance from the top edge of the page in millimetres
    pub y_offset: f32,
}

/// One wrapped line with its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Top of the line box
    pub cursor: LayoutCursor,
    /// Left edge of the text in millimetres
    pub x: f32,
    /// Line text
    pub text: String,
    /// Advance width in millimetres
    pub width: f32,
}

/// Result of placing one block.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Placed lines in reading order; empty for an empty block
    pub lines: Vec<PlacedLine>,
    /// Cursor after any break and spacing, where the first line starts
    pub start: LayoutCursor,
    /// Cursor below the last line
    pub end: LayoutCursor,
}

impl Placement {
    /// Index of the last page this block touches.
    pub fn last_page(&self) -> usize {
        self.end.page_index
    }
}

/// Page geometry plus font metrics: everything needed to place text.
#[derive(Debug, Clone)]
pub struct Flow {
    geometry: PageGeometry,
    layout: TextLayout,
    family: FontFamily,
}

impl Flow {
    /// Create a flow over the given geometry and font family.
    pub fn new(geometry: PageGeometry, family: FontFamily) -> Self {
        Self {
            geometry,
            layout: TextLayout::new(),
            family,
        }
    }

    /// The flow a report configuration describes.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.geometry, config.theme.font_family)
    }

    /// Page geometry.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Content top of the first page.
    pub fn start(&self) -> LayoutCursor {
        LayoutCursor {
            page_index: 0,
            y_offset: self.geometry.content_top(),
        }
    }

    /// Content top of the page after `cursor`'s page.
    pub fn next_page(&self, cursor: LayoutCursor) -> LayoutCursor {
        LayoutCursor {
            page_index: cursor.page_index + 1,
            y_offset: self.geometry.content_top(),
        }
    }

    /// No line may extend below this offset.
    pub fn break_threshold(&self) -> f32 {
        self.geometry.break_threshold()
    }

    /// Whether `cursor` sits at its page's content top.
    pub fn at_page_top(&self, cursor: LayoutCursor) -> bool {
        (cursor.y_offset - self.geometry.content_top()).abs() < EPSILON
    }

    /// Whether `height` millimetres fit between `cursor` and the threshold.
    pub fn fits(&self, cursor: LayoutCursor, height: f32) -> bool {
        cursor.y_offset + height <= self.break_threshold() + EPSILON
    }

    /// Whether `cursor` already lies in the bottom margin.
    pub fn in_bottom_margin(&self, cursor: LayoutCursor) -> bool {
        cursor.y_offset >= self.break_threshold() - EPSILON
    }

    /// Base-14 face of the flow's family.
    pub fn face(&self, weight: FontWeight, italic: bool) -> &'static str {
        self.layout
            .font_manager()
            .select_font(self.family, weight, italic)
    }

    /// Base-14 face for a block style.
    pub fn font_name(&self, style: &BlockStyle) -> &'static str {
        self.face(style.font_weight, false)
    }

    /// Width of `text` in millimetres.
    pub fn text_width(&self, text: &str, font_name: &str, size: f32) -> f32 {
        pt_to_mm(self.layout.font_manager().text_width(text, font_name, size))
    }

    /// Wrap a block's text to the content width. Widths are in millimetres.
    pub fn wrap(&self, block: &PageBlock) -> Vec<(String, f32)> {
        let font = self.font_name(&block.style);
        let max_width = mm_to_pt(self.geometry.content_width());
        self.layout
            .wrap_text(&block.text, font, block.style.size, max_width)
            .into_iter()
            .map(|(line, width)| (line, pt_to_mm(width)))
            .collect()
    }

    /// Height a block takes when it starts mid-page and does not break.
    pub fn block_height(&self, block: &PageBlock) -> f32 {
        let lines = self.wrap(block).len();
        if lines == 0 {
            0.0
        } else {
            block.style.space_before + lines as f32 * block.style.line_height
        }
    }

    /// Place a block starting at `cursor`.
    ///
    /// A forced break is skipped when the cursor is already at a content top.
    /// Spacing above the block is dropped when the block is empty or opens a
    /// page through a break. Lines move to a new page when they would cross
    /// the break threshold; a line at a page top is always placed.
    pub fn place(&self, cursor: LayoutCursor, block: &PageBlock) -> Placement {
        let style = &block.style;
        let mut c = cursor;
        let mut opened_page = false;

        if block.break_before {
            if !self.at_page_top(c) {
                c = self.next_page(c);
                log::debug!(
                    "Forced break before {:?}, now on page {}",
                    block.kind,
                    c.page_index + 1
                );
            }
            opened_page = true;
        }

        let wrapped = self.wrap(block);
        if wrapped.is_empty() {
            return Placement {
                lines: Vec::new(),
                start: c,
                end: c,
            };
        }

        if !opened_page {
            let spaced = LayoutCursor {
                y_offset: c.y_offset + style.space_before,
                ..c
            };
            if self.fits(spaced, style.line_height) {
                c = spaced;
            } else if !self.at_page_top(c) {
                c = self.next_page(c);
                log::debug!("{:?} does not fit, moving to page {}", block.kind, c.page_index + 1);
            }
        }

        let start = c;
        let mut lines = Vec::with_capacity(wrapped.len());
        for (text, width) in wrapped {
            if !self.fits(c, style.line_height) && !self.at_page_top(c) {
                c = self.next_page(c);
                log::debug!("Page break inside {:?}, now on page {}", block.kind, c.page_index + 1);
            }
            lines.push(PlacedLine {
                cursor: c,
                x: self.line_x(style.align, width),
                text,
                width,
            });
            c.y_offset += style.line_height;
        }

        Placement {
            lines,
            start,
            end: c,
        }
    }

    fn line_x(&self, align: Align, width: f32) -> f32 {
        match align {
            Align::Left => self.geometry.margin_left,
            Align::Center => {
                let slack = (self.geometry.content_width() - width).max(0.0);
                self.geometry.margin_left + slack / 2.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::report::block::BlockKind;

    fn flow() -> Flow {
        Flow::new(PageGeometry::a4(), FontFamily::Helvetica)
    }

    fn block(kind: BlockKind, text: &str) -> PageBlock {
        PageBlock::new(kind, text, &Theme::default())
    }

    #[test]
    fn test_start_and_threshold() {
        let flow = flow();
        assert_eq!(flow.start(), LayoutCursor { page_index: 0, y_offset: 20.0 });
        assert_eq!(flow.break_threshold(), 277.0);
        assert!(flow.at_page_top(flow.start()));
        assert!(flow.in_bottom_margin(LayoutCursor { page_index: 0, y_offset: 280.0 }));
        assert!(!flow.in_bottom_margin(LayoutCursor { page_index: 0, y_offset: 270.0 }));
    }

    #[test]
    fn test_fits() {
        let flow = flow();
        let c = LayoutCursor { page_index: 0, y_offset: 270.0 };
        assert!(flow.fits(c, 7.0));
        assert!(!flow.fits(c, 7.5));
    }

    #[test]
    fn test_cover_title_keeps_spacing_on_first_page() {
        let flow = flow();
        let placement = flow.place(flow.start(), &block(BlockKind::CoverTitle, "QUANTUM"));
        assert_eq!(placement.lines.len(), 1);
        assert_eq!(placement.start.y_offset, 70.0);
        assert_eq!(placement.end.y_offset, 85.0);
    }

    #[test]
    fn test_centered_line() {
        let flow = flow();
        let placement = flow.place(flow.start(), &block(BlockKind::CoverTitle, "X"));
        let line = &placement.lines[0];
        assert!((line.x + line.width / 2.0 - 105.0).abs() < 0.01);
    }

    #[test]
    fn test_break_before_skips_spacing() {
        let flow = flow();
        let c = LayoutCursor { page_index: 0, y_offset: 100.0 };
        let heading = block(BlockKind::Heading, "1. SUMMARY").with_break_before();
        let placement = flow.place(c, &heading);
        assert_eq!(placement.start, LayoutCursor { page_index: 1, y_offset: 20.0 });
    }

    #[test]
    fn test_break_before_at_top_is_noop() {
        let flow = flow();
        let c = flow.next_page(flow.start());
        let heading = block(BlockKind::Heading, "1. SUMMARY").with_break_before();
        let placement = flow.place(c, &heading);
        assert_eq!(placement.start, c);
    }

    #[test]
    fn test_empty_block_takes_no_height() {
        let flow = flow();
        let c = LayoutCursor { page_index: 0, y_offset: 120.0 };
        let placement = flow.place(c, &block(BlockKind::Body, "   "));
        assert!(placement.lines.is_empty());
        assert_eq!(placement.end, c);
        assert_eq!(flow.block_height(&block(BlockKind::Body, "")), 0.0);
    }

    #[test]
    fn test_long_body_spans_pages() {
        let flow = flow();
        let text = "lorem ipsum dolor sit amet ".repeat(400);
        let placement = flow.place(flow.start(), &block(BlockKind::Body, &text));
        assert!(placement.last_page() >= 1);
        for line in &placement.lines {
            assert!(line.cursor.y_offset + 7.0 <= 277.0 + 1e-3);
        }
        let pages: Vec<usize> = placement.lines.iter().map(|l| l.cursor.page_index).collect();
        assert!(pages.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_line_that_does_not_fit_moves_whole_block() {
        let flow = flow();
        let c = LayoutCursor { page_index: 2, y_offset: 272.0 };
        let placement = flow.place(c, &block(BlockKind::Body, "tail"));
        assert_eq!(placement.start, LayoutCursor { page_index: 3, y_offset: 20.0 });
        assert_eq!(placement.end.y_offset, 27.0);
    }

    #[test]
    fn test_wrap_respects_content_width() {
        let flow = flow();
        let text = "measurement ".repeat(60);
        for (_, width) in flow.wrap(&block(BlockKind::Body, &text)) {
            assert!(width <= 190.0 + 1e-3);
        }
    }
}

//! Report assembly: request in, ordered page blocks out.
//!
//! The assembler decides structure (cover, contents, numbered sections) and
//! pagination hints. It runs the same [`Flow`] the renderer uses, so every
//! `break_before` it sets is the break the renderer will take.

use super::block::{BlockKind, PageBlock};
use super::cursor::{Flow, LayoutCursor};
use super::model::ReportRequest;
use crate::config::ReportConfig;

/// Assemble a request into page blocks.
///
/// Pure: no I/O, no clock, no hidden state. Equal inputs give equal blocks.
pub fn assemble(request: &ReportRequest, config: &ReportConfig) -> Vec<PageBlock> {
    Assembler::new(config).assemble(request)
}

/// Builds page blocks for one configuration.
#[derive(Debug, Clone)]
pub struct Assembler<'a> {
    config: &'a ReportConfig,
    flow: Flow,
}

impl<'a> Assembler<'a> {
    /// Create an assembler for a configuration.
    pub fn new(config: &'a ReportConfig) -> Self {
        Self {
            config,
            flow: Flow::from_config(config),
        }
    }

    /// The flow used for pagination.
    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    /// Assemble a request.
    pub fn assemble(&self, request: &ReportRequest) -> Vec<PageBlock> {
        let mut blocks = self.cover(request);
        let cover_len = blocks.len();

        if self.config.toc {
            blocks.extend(self.table_of_contents(request));
        }

        let summary_label = format!("1. {}", self.config.summary_heading_label());
        let mut summary_heading = self.block(BlockKind::Heading, &summary_label);
        // The contents get a page of their own
        summary_heading.break_before = self.config.toc;
        blocks.push(summary_heading);
        blocks.push(self.block(BlockKind::Body, &request.summary));

        for (index, section) in request.sections.iter().enumerate() {
            let number = ReportRequest::section_number(index);
            blocks.push(self.block(BlockKind::Heading, &format!("{}. {}", number, section.title)));
            blocks.push(self.block(BlockKind::Body, &section.body));
        }

        // Whatever follows the cover (contents or summary) opens a new page
        if let Some(first) = blocks.get_mut(cover_len) {
            first.break_before = true;
        }

        let pages = self.paginate(&mut blocks);
        log::info!(
            "Assembled '{}': {} blocks, {} sections, {} pages",
            request.title,
            blocks.len(),
            request.sections.len(),
            pages
        );
        blocks
    }

    fn block(&self, kind: BlockKind, text: &str) -> PageBlock {
        PageBlock::new(kind, text, &self.config.theme)
    }

    fn cover(&self, request: &ReportRequest) -> Vec<PageBlock> {
        let mut blocks = vec![self.block(BlockKind::CoverTitle, &request.title.to_uppercase())];

        if let Some(subtitle) = &self.config.cover.subtitle {
            blocks.push(self.block(BlockKind::CoverMeta, subtitle));
        }

        let date = request.generated_at().format("%B %d, %Y");
        blocks.push(self.block(BlockKind::CoverMeta, &format!("Generated on: {}", date)));

        if let Some(status) = &self.config.cover.status_line {
            blocks.push(self.block(BlockKind::CoverMeta, status));
        }
        blocks
    }

    fn table_of_contents(&self, request: &ReportRequest) -> Vec<PageBlock> {
        let mut entries = vec![self.block(
            BlockKind::TocEntry,
            &format!("1. {}", self.config.summary_heading_label()),
        )];
        for (index, section) in request.sections.iter().enumerate() {
            let number = ReportRequest::section_number(index);
            let text = format!("{}. {}", number, section.title);
            entries.push(self.block(BlockKind::TocEntry, &text));
        }
        entries
    }

    /// Walk the blocks through the flow, pushing headings that would be
    /// stranded at a page bottom. Returns the number of pages used.
    fn paginate(&self, blocks: &mut [PageBlock]) -> usize {
        let mut cursor = self.flow.start();
        for index in 0..blocks.len() {
            if blocks[index].kind == BlockKind::Heading && !blocks[index].break_before {
                let body = blocks.get(index + 1).filter(|b| b.kind == BlockKind::Body);
                if self.strands_heading(cursor, &blocks[index], body) {
                    log::debug!(
                        "Pushing heading '{}' from page {} to the next page",
                        blocks[index].text,
                        cursor.page_index + 1
                    );
                    blocks[index].break_before = true;
                }
            }
            cursor = self.flow.place(cursor, &blocks[index]).end;
        }
        cursor.page_index + 1
    }

    /// A heading is stranded when it starts in the bottom margin, or when it
    /// and the first line of its body do not fit above the threshold.
    fn strands_heading(
        &self,
        cursor: LayoutCursor,
        heading: &PageBlock,
        body: Option<&PageBlock>,
    ) -> bool {
        if self.flow.in_bottom_margin(cursor) {
            return true;
        }
        let mut needed = self.flow.block_height(heading);
        if let Some(body) = body.filter(|b| !b.is_empty()) {
            needed += body.style.space_before + body.style.line_height;
        }
        !self.flow.fits(cursor, needed)
    }
}

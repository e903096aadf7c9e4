//! Assembler output: styled, sanitized page blocks.

use crate::config::{Rgb, Theme};
use crate::fonts::sanitize;
use crate::writer::FontWeight;
use serde::{Deserialize, Serialize};

/// What a block represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Upper-cased report title on the cover
    CoverTitle,
    /// Subtitle, date or status line on the cover
    CoverMeta,
    /// One table-of-contents line
    TocEntry,
    /// Numbered section heading
    Heading,
    /// Section or summary text
    Body,
}

/// Horizontal alignment of a block's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Align {
    /// Flush with the left margin
    #[default]
    Left,
    /// Centered within the content width
    Center,
}

/// Visual and layout attributes of a block. Lengths are in millimetres,
/// font size in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockStyle {
    /// Font weight
    pub font_weight: FontWeight,
    /// Font size in points
    pub size: f32,
    /// Text color
    pub color: Rgb,
    /// Height of one line
    pub line_height: f32,
    /// Horizontal alignment
    pub align: Align,
    /// Vertical gap above the block
    pub space_before: f32,
}

impl BlockStyle {
    /// The style for a block kind under a theme.
    pub fn for_kind(kind: BlockKind, theme: &Theme) -> Self {
        match kind {
            BlockKind::CoverTitle => Self {
                font_weight: FontWeight::Bold,
                size: 30.0,
                color: theme.title_color,
                line_height: 15.0,
                align: Align::Center,
                space_before: 50.0,
            },
            BlockKind::CoverMeta => Self {
                font_weight: FontWeight::Normal,
                size: 14.0,
                color: theme.meta_color,
                line_height: 10.0,
                align: Align::Center,
                space_before: 6.0,
            },
            BlockKind::TocEntry => Self {
                font_weight: FontWeight::Normal,
                size: 12.0,
                color: theme.body_color,
                line_height: 8.0,
                align: Align::Left,
                space_before: 0.0,
            },
            BlockKind::Heading => Self {
                font_weight: FontWeight::Bold,
                size: 16.0,
                color: theme.accent_color,
                line_height: 10.0,
                align: Align::Left,
                space_before: 5.0,
            },
            BlockKind::Body => Self {
                font_weight: FontWeight::Normal,
                size: 11.0,
                color: theme.body_color,
                line_height: 7.0,
                align: Align::Left,
                space_before: 2.0,
            },
        }
    }
}

/// One drawable unit of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBlock {
    /// Block kind
    pub kind: BlockKind,
    /// Sanitized text
    pub text: String,
    /// Style derived from kind and theme
    pub style: BlockStyle,
    /// Start a new page before this block
    pub break_before: bool,
}

impl PageBlock {
    /// Create a block, sanitizing the text and deriving the style.
    pub fn new(kind: BlockKind, text: &str, theme: &Theme) -> Self {
        Self {
            kind,
            text: sanitize(text).into_owned(),
            style: BlockStyle::for_kind(kind, theme),
            break_before: false,
        }
    }

    /// Force a page break before this block.
    pub fn with_break_before(mut self) -> Self {
        self.break_before = true;
        self
    }

    /// Whether the block has no visible text and therefore takes no height.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

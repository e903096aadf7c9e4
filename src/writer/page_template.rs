//! Running headers and footers.
//!
//! A running line is filled in per page after layout, once the page total is
//! known, so `"Page {page} of {pages}"` costs no second layout pass.
//!
//! ```ignore
//! use report_oxide::writer::{Anchor, PageContext, RunningLine, RunningTemplate};
//!
//! let template = RunningTemplate::default()
//!     .with_footer(RunningLine::new("Page {page} of {pages}", Anchor::Center));
//! let page = PageContext::new(2, 7);
//! assert_eq!(template.footer.unwrap().fill(&page), "Page 2 of 7");
//! ```

use super::font_manager::FontWeight;
use crate::config::{ReportConfig, Rgb};
use chrono::NaiveDate;

/// A per-page value that can appear in running text as `{name}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `{page}`, 1-based
    Page,
    /// `{pages}`
    Pages,
    /// `{date}`, long form ("March 05, 2024")
    Date,
    /// `{title}`
    Title,
}

impl Field {
    /// Look up a field by the name between the braces.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "page" => Some(Field::Page),
            "pages" => Some(Field::Pages),
            "date" => Some(Field::Date),
            "title" => Some(Field::Title),
            _ => None,
        }
    }
}

/// Where a running line sits within the content width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Anchor {
    /// Left margin
    Left,
    /// Centered
    #[default]
    Center,
    /// Right margin
    Right,
}

/// Font and color of a running line.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningStyle {
    /// Points
    pub size: f32,
    /// Regular or bold
    pub weight: FontWeight,
    /// Oblique face
    pub italic: bool,
    /// Fill color
    pub color: Rgb,
}

impl RunningStyle {
    /// Bold text at `size` pt.
    pub fn bold(size: f32, color: Rgb) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
            italic: false,
            color,
        }
    }

    /// Italic text at `size` pt.
    pub fn italic(size: f32, color: Rgb) -> Self {
        Self {
            size,
            weight: FontWeight::Normal,
            italic: true,
            color,
        }
    }
}

impl Default for RunningStyle {
    fn default() -> Self {
        Self {
            size: 10.0,
            weight: FontWeight::Normal,
            italic: false,
            color: Rgb::BLACK,
        }
    }
}

/// A header or footer line repeated on every page.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningLine {
    /// Text with `{field}` markers
    pub text: String,
    /// Horizontal placement
    pub anchor: Anchor,
    /// Font and color
    pub style: RunningStyle,
    /// Rule drawn this many mm below the top of the line box
    pub rule_below: Option<f32>,
}

impl RunningLine {
    /// Plain line in the default style.
    pub fn new(text: impl Into<String>, anchor: Anchor) -> Self {
        Self {
            text: text.into(),
            anchor,
            style: RunningStyle::default(),
            rule_below: None,
        }
    }

    /// Replace the style.
    pub fn styled(mut self, style: RunningStyle) -> Self {
        self.style = style;
        self
    }

    /// Underline the line with a rule.
    pub fn ruled(mut self, offset_mm: f32) -> Self {
        self.rule_below = Some(offset_mm);
        self
    }

    /// Text for one page. Unknown or unclosed `{...}` is kept literally.
    pub fn fill(&self, page: &PageContext) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open..];
            let field = tail
                .find('}')
                .and_then(|close| Field::from_name(&tail[1..close]).map(|f| (f, close)));
            match field {
                Some((field, close)) => {
                    out.push_str(&page.value(field));
                    rest = &tail[close + 1..];
                },
                None => {
                    out.push('{');
                    rest = &tail[1..];
                },
            }
        }
        out.push_str(rest);
        out
    }
}

/// Values for one page's running lines.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContext {
    /// 1-based page number
    pub number: usize,
    /// Page total
    pub total: usize,
    /// Long-form date, empty until set
    pub date: String,
    /// Report title, empty until set
    pub title: String,
}

impl PageContext {
    /// Page `number` of `total`.
    pub fn new(number: usize, total: usize) -> Self {
        Self {
            number,
            total,
            date: String::new(),
            title: String::new(),
        }
    }

    /// Set the date shown by `{date}`.
    pub fn dated(mut self, date: NaiveDate) -> Self {
        self.date = date.format("%B %d, %Y").to_string();
        self
    }

    /// Set the title shown by `{title}`.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn value(&self, field: Field) -> String {
        match field {
            Field::Page => self.number.to_string(),
            Field::Pages => self.total.to_string(),
            Field::Date => self.date.clone(),
            Field::Title => self.title.clone(),
        }
    }
}

/// Optional header and footer drawn on every page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningTemplate {
    /// Top line
    pub header: Option<RunningLine>,
    /// Bottom line
    pub footer: Option<RunningLine>,
}

impl RunningTemplate {
    /// Header and footer for a report configuration.
    ///
    /// The header is bold 10 pt, right-aligned and ruled 8 mm below its top.
    /// The footer is italic 8 pt and centered. Both take the theme's header
    /// color.
    pub fn from_config(config: &ReportConfig) -> Self {
        let color = config.theme.header_color;
        Self {
            header: config.header.as_ref().map(|text| {
                RunningLine::new(text.clone(), Anchor::Right)
                    .styled(RunningStyle::bold(10.0, color))
                    .ruled(8.0)
            }),
            footer: config.footer.as_ref().map(|text| {
                RunningLine::new(text.clone(), Anchor::Center)
                    .styled(RunningStyle::italic(8.0, color))
            }),
        }
    }

    /// Replace the header.
    pub fn with_header(mut self, line: RunningLine) -> Self {
        self.header = Some(line);
        self
    }

    /// Replace the footer.
    pub fn with_footer(mut self, line: RunningLine) -> Self {
        self.footer = Some(line);
        self
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.footer.is_none()
    }
}

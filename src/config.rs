//! Configuration for report generation.
//!
//! A [`ReportConfig`] is normally created from a [`Preset`] and then adjusted
//! with the `with_*` setters. It can also be loaded from JSON; missing fields
//! fall back to the classic preset.

use crate::error::{Error, Result};
use crate::geometry::PageGeometry;
use crate::writer::FontFamily;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An RGB color with 0-255 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure black.
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// A gray with equal components.
    pub const fn gray(level: u8) -> Self {
        Rgb(level, level, level)
    }

    /// Components scaled to 0.0-1.0 for PDF color operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (self.0 as f32 / 255.0, self.1 as f32 / 255.0, self.2 as f32 / 255.0)
    }
}

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Official academic report: running header, no table of contents
    #[default]
    Classic,
    /// Research assignment with subtitle, status line and table of contents
    Comprehensive,
    /// Bare page-numbered layout
    Minimal,
}

impl Preset {
    /// Parse a preset name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "comprehensive" => Some(Preset::Comprehensive),
            "minimal" => Some(Preset::Minimal),
            _ => None,
        }
    }
}

/// Visual parameters. Only colors and the font family vary between presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Cover title color
    pub title_color: Rgb,
    /// Heading color
    pub accent_color: Rgb,
    /// Body text color
    pub body_color: Rgb,
    /// Cover meta and table-of-contents color
    pub meta_color: Rgb,
    /// Running header/footer color
    pub header_color: Rgb,
    /// Base-14 font family
    pub font_family: FontFamily,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title_color: Rgb(26, 54, 104),
            accent_color: Rgb(26, 54, 104),
            body_color: Rgb(20, 20, 20),
            meta_color: Rgb::gray(80),
            header_color: Rgb::gray(100),
            font_family: FontFamily::Helvetica,
        }
    }
}

/// Optional lines on the cover page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverOptions {
    /// Label under the title
    pub subtitle: Option<String>,
    /// Static status line under the date
    pub status_line: Option<String>,
}

/// Report generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Preset this configuration was derived from
    pub preset: Preset,
    /// Colors and font family
    pub theme: Theme,
    /// Cover page options
    pub cover: CoverOptions,
    /// Emit a table-of-contents page
    pub toc: bool,
    /// Label of the executive summary heading (numbered "1.")
    pub summary_label: String,
    /// Upper-case the summary label
    pub uppercase_summary_label: bool,
    /// Running header text (right-aligned); supports `{title}`, `{date}`
    pub header: Option<String>,
    /// Running footer text (centered); supports `{page}`, `{pages}`
    pub footer: Option<String>,
    /// Page geometry in millimetres
    pub geometry: PageGeometry,
    /// Flate-compress PDF content streams
    pub compress: bool,
    /// Document author for the PDF Info dictionary
    pub author: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::preset(Preset::Classic)
    }
}

impl ReportConfig {
    /// Create a configuration from a preset.
    pub fn preset(preset: Preset) -> Self {
        let base = Self {
            preset,
            theme: Theme::default(),
            cover: CoverOptions::default(),
            toc: false,
            summary_label: "Executive Summary".to_string(),
            uppercase_summary_label: false,
            header: None,
            footer: None,
            geometry: PageGeometry::a4(),
            compress: false,
            author: None,
        };

        match preset {
            Preset::Classic => Self {
                uppercase_summary_label: true,
                header: Some("OFFICIAL ACADEMIC REPORT".to_string()),
                footer: Some("Page {page} | AI Academic Engine".to_string()),
                ..base
            },
            Preset::Comprehensive => Self {
                theme: Theme {
                    title_color: Rgb(31, 41, 55),
                    accent_color: Rgb(37, 99, 235),
                    ..Theme::default()
                },
                cover: CoverOptions {
                    subtitle: Some("COMPREHENSIVE RESEARCH ASSIGNMENT".to_string()),
                    status_line: Some("Status: Final Submission".to_string()),
                },
                toc: true,
                header: Some("{title}".to_string()),
                footer: Some("Page {page} of {pages}".to_string()),
                ..base
            },
            Preset::Minimal => Self {
                footer: Some("Page {page}".to_string()),
                ..base
            },
        }
    }

    /// Load a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ReportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that the configuration can produce a document.
    pub fn validate(&self) -> Result<()> {
        if !self.geometry.is_usable() {
            return Err(Error::Config(format!(
                "page geometry leaves no content area ({}x{} mm)",
                self.geometry.width, self.geometry.height
            )));
        }
        Ok(())
    }

    /// The summary heading label after casing rules.
    pub fn summary_heading_label(&self) -> String {
        if self.uppercase_summary_label {
            self.summary_label.to_uppercase()
        } else {
            self.summary_label.clone()
        }
    }

    /// Enable or disable the table of contents.
    pub fn with_toc(mut self, enable: bool) -> Self {
        self.toc = enable;
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the cover subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.cover.subtitle = Some(subtitle.into());
        self
    }

    /// Set the cover status line.
    pub fn with_status_line(mut self, status: impl Into<String>) -> Self {
        self.cover.status_line = Some(status.into());
        self
    }

    /// Set or clear the running header.
    pub fn with_header(mut self, header: Option<String>) -> Self {
        self.header = header;
        self
    }

    /// Set or clear the running footer.
    pub fn with_footer(mut self, footer: Option<String>) -> Self {
        self.footer = footer;
        self
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_preset() {
        let config = ReportConfig::preset(Preset::Classic);
        assert!(!config.toc);
        assert!(config.cover.subtitle.is_none());
        assert_eq!(config.summary_heading_label(), "EXECUTIVE SUMMARY");
        assert_eq!(config.header.as_deref(), Some("OFFICIAL ACADEMIC REPORT"));
    }

    #[test]
    fn test_comprehensive_preset() {
        let config = ReportConfig::preset(Preset::Comprehensive);
        assert!(config.toc);
        assert_eq!(
            config.cover.subtitle.as_deref(),
            Some("COMPREHENSIVE RESEARCH ASSIGNMENT")
        );
        assert_eq!(config.summary_heading_label(), "Executive Summary");
    }

    #[test]
    fn test_presets_share_structure_defaults() {
        let classic = ReportConfig::preset(Preset::Classic);
        let minimal = ReportConfig::preset(Preset::Minimal);
        assert_eq!(classic.geometry, minimal.geometry);
        assert!(minimal.header.is_none());
    }

    #[test]
    fn test_preset_from_name() {
        assert_eq!(Preset::from_name("Comprehensive"), Some(Preset::Comprehensive));
        assert_eq!(Preset::from_name("MINIMAL"), Some(Preset::Minimal));
        assert_eq!(Preset::from_name("fancy"), None);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ReportConfig::from_json_str(r#"{"toc": true, "compress": true}"#).unwrap();
        assert!(config.toc);
        assert!(config.compress);
        // Untouched fields come from the classic preset
        assert_eq!(config.summary_heading_label(), "EXECUTIVE SUMMARY");
    }

    #[test]
    fn test_from_json_rejects_unusable_geometry() {
        let json = r#"{"geometry": {"width": 10.0, "margin_left": 10.0, "margin_right": 10.0}}"#;
        let err = ReportConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builder_setters() {
        let config = ReportConfig::default()
            .with_toc(true)
            .with_subtitle("Term Paper")
            .with_footer(None)
            .with_author("Student");

        assert!(config.toc);
        assert_eq!(config.cover.subtitle.as_deref(), Some("Term Paper"));
        assert!(config.footer.is_none());
        assert_eq!(config.author.as_deref(), Some("Student"));
    }

    #[test]
    fn test_rgb_to_unit() {
        let (r, g, b) = Rgb(255, 0, 51).to_unit();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-6);
    }
}

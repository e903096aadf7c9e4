//! Packaging a rendered report for download.

use crate::fonts::sanitize;
use crate::render::RenderOutput;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// PDF document
    #[default]
    Pdf,
    /// Plain text, one form feed between pages
    Text,
}

impl OutputFormat {
    /// MIME type.
    pub fn mime(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Text => "text/plain",
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Text => "txt",
        }
    }

    /// Parse a format name or extension.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pdf" => Some(OutputFormat::Pdf),
            "txt" | "text" => Some(OutputFormat::Text),
            _ => None,
        }
    }
}

/// A finished report ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested file name, e.g. `Assignment_Quantum_Computing.pdf`
    pub file_name: String,
    /// MIME type of `bytes`
    pub mime: &'static str,
    /// File contents
    pub bytes: Vec<u8>,
    /// Number of pages in the document
    pub page_count: usize,
}

impl Download {
    /// Wrap render output under the file name derived from `topic`.
    pub fn new(topic: &str, format: OutputFormat, output: RenderOutput) -> Self {
        Self {
            file_name: file_name(topic, format),
            mime: format.mime(),
            bytes: output.bytes,
            page_count: output.page_count,
        }
    }

    /// Write the file into `dir`, returning the full path.
    pub fn save_in(&self, dir: impl AsRef<Path>) -> crate::Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        log::info!("Saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// `Assignment_<topic>.<ext>` with the topic sanitized to Latin-1, trimmed,
/// spaces turned into underscores and path separators removed.
pub fn file_name(topic: &str, format: OutputFormat) -> String {
    let topic: String = sanitize(topic)
        .trim()
        .chars()
        .filter(|c| !matches!(*c, '/' | '\\') && !c.is_control())
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("Assignment_{}.{}", topic, format.extension())
}

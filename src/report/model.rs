//! Assembler input: the report request and its sections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One titled section of report content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text; flattened subsections use a `"Parent - Child"` label
    pub title: String,
    /// Free text of any length, not yet sanitized
    #[serde(default)]
    pub body: String,
}

impl Section {
    /// Create a section.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Whether the title was produced by flattening a nested subsection.
    pub fn is_subsection(&self) -> bool {
        self.title.contains(" - ")
    }
}

/// Everything needed to assemble one report.
///
/// Section order is display order. Section numbers are derived from position
/// (the summary is 1, the first section 2) and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Report subject
    pub title: String,
    /// Executive summary paragraph; may be empty
    #[serde(default)]
    pub summary: String,
    /// Sections in display order
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default = "today")]
    generated_at: NaiveDate,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl ReportRequest {
    /// Create a request dated today (local time).
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            sections: Vec::new(),
            generated_at: today(),
        }
    }

    /// Pin the generation date.
    pub fn generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_at = date;
        self
    }

    /// Append a section.
    pub fn with_section(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.sections.push(Section::new(title, body));
        self
    }

    /// Append several sections.
    pub fn with_sections(mut self, sections: impl IntoIterator<Item = Section>) -> Self {
        self.sections.extend(sections);
        self
    }

    /// The date the report was generated.
    pub fn generated_at(&self) -> NaiveDate {
        self.generated_at
    }

    /// Display number of the section at `index` (0-based).
    pub fn section_number(index: usize) -> usize {
        index + 2
    }

    /// Load a request from JSON. A missing date means today.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let request = ReportRequest::new("Topic", "Summary")
            .with_section("B", "second")
            .with_section("A", "first");
        let titles: Vec<&str> = request.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_section_numbering() {
        assert_eq!(ReportRequest::section_number(0), 2);
        assert_eq!(ReportRequest::section_number(4), 6);
    }

    #[test]
    fn test_subsection_label() {
        assert!(Section::new("History - Early years", "").is_subsection());
        assert!(!Section::new("Self-reference", "").is_subsection());
    }

    #[test]
    fn test_from_json_with_date() {
        let json = r#"{
            "title": "Quantum Computing",
            "summary": "A field of study.",
            "sections": [{"title": "History", "body": "Text"}],
            "generated_at": "2024-03-05"
        }"#;
        let request = ReportRequest::from_json_str(json).unwrap();
        assert_eq!(request.sections.len(), 1);
        assert_eq!(request.generated_at(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_from_json_defaults() {
        let request = ReportRequest::from_json_str(r#"{"title": "X"}"#).unwrap();
        assert!(request.summary.is_empty());
        assert!(request.sections.is_empty());
    }
}

//! Content retrieval boundary.
//!
//! A [`ContentSource`] looks a topic up and returns an [`Article`] tree.
//! [`build_request`] flattens that tree, applies size limits and folds in the
//! user's own reference documents to produce a [`ReportRequest`].

use crate::error::{Error, Result};
use crate::report::{ReportRequest, Section};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Looks up source material for a topic.
pub trait ContentSource {
    /// Fetch the article for `topic`, or `None` when nothing matches.
    fn fetch(&self, topic: &str) -> Result<Option<Article>>;
}

/// A retrieved encyclopedia-style article.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Article {
    /// Article title
    pub title: String,
    /// Lead summary
    #[serde(default)]
    pub summary: String,
    /// Top-level sections in article order
    #[serde(default)]
    pub sections: Vec<ArticleSection>,
}

/// One node of an article's section tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArticleSection {
    /// Section title
    pub title: String,
    /// Section text, excluding subsections
    #[serde(default)]
    pub text: String,
    /// Nested sections
    #[serde(default)]
    pub subsections: Vec<ArticleSection>,
}

impl ArticleSection {
    /// Create a leaf section.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            subsections: Vec::new(),
        }
    }

    /// Add a nested section.
    pub fn with_subsection(mut self, subsection: ArticleSection) -> Self {
        self.subsections.push(subsection);
        self
    }
}

/// In-memory source keyed by case-insensitive topic.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    articles: HashMap<String, Article>,
}

impl StaticSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an article under its own title.
    pub fn with_article(mut self, article: Article) -> Self {
        self.insert(article);
        self
    }

    /// Register an article under its own title.
    pub fn insert(&mut self, article: Article) {
        self.articles.insert(topic_key(&article.title), article);
    }

    /// Number of articles held.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether the source holds no articles.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl ContentSource for StaticSource {
    fn fetch(&self, topic: &str) -> Result<Option<Article>> {
        Ok(self.articles.get(&topic_key(topic)).cloned())
    }
}

fn topic_key(topic: &str) -> String {
    topic.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// A document the user attached, with its text already extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDocument {
    /// File or display name
    pub name: String,
    /// Extracted text
    pub text: String,
}

impl ReferenceDocument {
    /// Create a reference document.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Material the user supplied alongside the topic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserContext {
    /// Attached documents in upload order
    pub documents: Vec<ReferenceDocument>,
}

impl UserContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a document.
    pub fn with_document(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.push(ReferenceDocument::new(name, text));
        self
    }

    /// Whether any attached document has non-blank text.
    pub fn has_text(&self) -> bool {
        self.documents.iter().any(|d| !d.text.trim().is_empty())
    }
}

/// Size limits applied while building a request. Lengths count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum summary length
    pub summary_chars: usize,
    /// Maximum number of top-level article sections
    pub max_sections: usize,
    /// Total budget for article section text, and the cap on each
    /// reference document
    pub content_budget: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            summary_chars: 2000,
            max_sections: 6,
            content_budget: 10000,
        }
    }
}

/// Fetch `topic` from `source` and build the request.
pub fn retrieve(
    source: &dyn ContentSource,
    topic: &str,
    context: &UserContext,
    limits: &Limits,
) -> Result<ReportRequest> {
    let article = source.fetch(topic.trim())?;
    if article.is_none() {
        log::info!("No article found for '{}'", topic.trim());
    }
    build_request(topic, article, context, limits)
}

/// Combine a retrieved article and the user's documents into a request.
///
/// With no article the topic becomes the title and the first non-blank
/// reference document supplies the summary; that document is not repeated
/// as a reference section. With neither, the result is
/// [`Error::RetrievalEmpty`].
pub fn build_request(
    topic: &str,
    article: Option<Article>,
    context: &UserContext,
    limits: &Limits,
) -> Result<ReportRequest> {
    let topic = topic.trim();

    let mut lead_index = None;
    let mut request = match article {
        Some(article) => {
            let title = if article.title.trim().is_empty() {
                topic.to_string()
            } else {
                article.title
            };
            let summary = truncate_chars(&article.summary, limits.summary_chars);
            let sections = flatten_sections(&article.sections, limits);
            ReportRequest::new(title, summary).with_sections(sections)
        },
        None => {
            let (index, lead) = context
                .documents
                .iter()
                .enumerate()
                .find(|(_, d)| !d.text.trim().is_empty())
                .ok_or_else(|| Error::RetrievalEmpty(topic.to_string()))?;
            lead_index = Some(index);
            let summary = truncate_chars(lead.text.trim(), limits.summary_chars);
            ReportRequest::new(topic, summary)
        },
    };

    let references = context
        .documents
        .iter()
        .enumerate()
        .filter(|(i, d)| Some(*i) != lead_index && !d.text.trim().is_empty());
    for (_, document) in references {
        request.sections.push(Section::new(
            format!("Reference Material - {}", document.name),
            truncate_chars(document.text.trim(), limits.content_budget),
        ));
    }

    log::debug!(
        "Built request '{}' with {} sections",
        request.title,
        request.sections.len()
    );
    Ok(request)
}

/// Flatten the section tree depth-first into `"Parent - Child"` sections.
///
/// Only the first `max_sections` top-level sections are used. Section text
/// draws from a shared budget; once it is spent, later sections are dropped.
fn flatten_sections(sections: &[ArticleSection], limits: &Limits) -> Vec<Section> {
    let mut out = Vec::new();
    let mut budget = limits.content_budget;
    for section in sections.iter().take(limits.max_sections) {
        flatten_into(section, None, &mut budget, &mut out);
    }
    out
}

fn flatten_into(
    section: &ArticleSection,
    parent: Option<&str>,
    budget: &mut usize,
    out: &mut Vec<Section>,
) {
    if *budget == 0 {
        log::debug!("Content budget spent, dropping section '{}'", section.title);
        return;
    }

    let title = match parent {
        Some(parent) => format!("{} - {}", parent, section.title),
        None => section.title.clone(),
    };

    let text = section.text.trim();
    if !text.is_empty() || section.subsections.is_empty() {
        let body = truncate_chars(text, *budget);
        *budget -= body.chars().count();
        out.push(Section::new(title.clone(), body));
    }

    for subsection in &section.subsections {
        flatten_into(subsection, Some(&title), budget, out);
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

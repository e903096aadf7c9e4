//! Chat-style conversation around report generation.

use crate::config::ReportConfig;
use crate::delivery::{Download, OutputFormat};
use crate::error::{Error, Result};
use crate::render::generate;
use crate::source::{retrieve, ContentSource, Limits, UserContext};
use serde::{Deserialize, Serialize};

/// Reply shown when neither the source nor the user supplied material.
pub const NO_MATCH_MESSAGE: &str =
    "Could not find academic matches for this topic. Please try a standard academic term.";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person asking for a report
    User,
    /// The generator
    Assistant,
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author
    pub role: Role,
    /// Message text
    pub content: String,
}

/// Append-only message history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Start an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            content: content.into(),
        });
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recent message.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether nothing has been said yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Handle one prompt: record it, generate the report and record the reply.
///
/// Failures are answered in the conversation and also returned, so the
/// caller can decide whether to offer a download.
pub fn handle_prompt(
    conversation: &mut Conversation,
    topic: &str,
    source: &dyn ContentSource,
    context: &UserContext,
    config: &ReportConfig,
    format: OutputFormat,
) -> Result<Download> {
    conversation.push(Role::User, topic);

    let outcome = retrieve(source, topic, context, &Limits::default())
        .and_then(|request| generate(&request, config, format).map(|output| (request, output)));

    match outcome {
        Ok((request, output)) => {
            let download = Download::new(topic.trim(), format, output);
            conversation.push(
                Role::Assistant,
                format!(
                    "Your report on '{}' is ready: {} ({} pages).",
                    request.title, download.file_name, download.page_count
                ),
            );
            Ok(download)
        },
        Err(err) => {
            let reply = match &err {
                Error::RetrievalEmpty(_) => NO_MATCH_MESSAGE.to_string(),
                other => format!("Generation Error: {}", other),
            };
            log::warn!("Prompt '{}' failed: {}", topic, err);
            conversation.push(Role::Assistant, reply);
            Err(err)
        },
    }
}

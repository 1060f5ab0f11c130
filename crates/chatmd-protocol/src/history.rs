//! Stored conversation history.

use chatmd_renderer::ChatRenderer;
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::reply::{BotReply, ReplyKind, escape_user_message};

/// One stored question and answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntry {
    /// Raw user text.
    pub message: String,
    /// Raw markdown answer.
    pub response: String,
    /// Time of the exchange, see [`TIMESTAMP_FORMAT`](crate::TIMESTAMP_FORMAT).
    #[serde(default)]
    pub created_at: String,
}

/// A stored exchange ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryExchange {
    /// Escaped user message.
    pub user_html: String,
    pub reply: BotReply,
}

/// Conversation history of one user, stored as a JSON array of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatHistory {
    entries: Vec<HistoryEntry>,
}

impl ChatHistory {
    /// Build a history from `entries`, ordered oldest first.
    ///
    /// Timestamps in [`TIMESTAMP_FORMAT`](crate::TIMESTAMP_FORMAT) sort
    /// chronologically as strings; entries with equal timestamps keep their
    /// input order.
    #[must_use]
    pub fn new(mut entries: Vec<HistoryEntry>) -> Self {
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Self { entries }
    }

    /// Decode a JSON array of entries.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Json`] for malformed bodies.
    pub fn from_json(body: &str) -> Result<Self, ProtocolError> {
        let entries: Vec<HistoryEntry> = serde_json::from_str(body)?;
        Ok(Self::new(entries))
    }

    /// Keep only the `limit` most recent entries.
    #[must_use]
    pub fn recent(mut self, limit: usize) -> Self {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.drain(..skip);
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render every exchange, oldest first.
    ///
    /// User text is escaped verbatim; bot responses go through `renderer`.
    #[must_use]
    pub fn render(&self, renderer: &ChatRenderer) -> Vec<HistoryExchange> {
        tracing::debug!(entries = self.entries.len(), "Rendering chat history");
        self.entries
            .iter()
            .map(|entry| HistoryExchange {
                user_html: escape_user_message(&entry.message),
                reply: BotReply {
                    kind: ReplyKind::Answer,
                    html: renderer.render(&entry.response),
                    timestamp: entry.created_at.clone(),
                },
            })
            .collect()
    }
}

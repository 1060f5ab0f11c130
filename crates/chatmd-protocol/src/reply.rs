//! Bot replies as shown to the user.

use chatmd_renderer::{ChatRenderer, escape_html};
use serde::Deserialize;

use crate::message::{SendMessageResponse, current_timestamp};

/// Strings shown in place of an answer when something goes wrong.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReplyMessages {
    /// Prefix for failures reported by the backend.
    pub error_prefix: String,
    /// Shown when the backend cannot be reached.
    pub connection_error: String,
}

impl Default for ReplyMessages {
    fn default() -> Self {
        Self {
            error_prefix: "Sorry, there was an error: ".to_owned(),
            connection_error: "Connection error. Please try again.".to_owned(),
        }
    }
}

/// Whether a reply carries an answer or a synthetic error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Answer,
    Error,
}

/// A bot message ready for insertion into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    pub kind: ReplyKind,
    /// HTML fragment for the message body.
    pub html: String,
    /// Display time, see [`TIMESTAMP_FORMAT`](crate::TIMESTAMP_FORMAT).
    pub timestamp: String,
}

impl BotReply {
    /// Build the reply for a backend response.
    ///
    /// Pre-rendered `response_html` wins over the raw `response`, which is
    /// rendered locally as a fallback. A reported failure becomes an error
    /// reply stamped with the current time.
    pub fn from_response(
        response: &SendMessageResponse,
        renderer: &ChatRenderer,
        messages: &ReplyMessages,
    ) -> Self {
        if !response.success {
            let error = response.error.as_deref().unwrap_or_default();
            tracing::warn!(error, "Chat backend reported a failure");
            return Self::error(renderer, &format!("{}{error}", messages.error_prefix));
        }

        let html = match (&response.response_html, &response.response) {
            (Some(html), _) => html.clone(),
            (None, Some(text)) => {
                tracing::debug!("No pre-rendered HTML in response, rendering locally");
                renderer.render(text)
            }
            (None, None) => String::new(),
        };
        Self {
            kind: ReplyKind::Answer,
            html,
            timestamp: response
                .timestamp
                .clone()
                .unwrap_or_else(current_timestamp),
        }
    }

    /// Reply shown when the backend could not be reached.
    pub fn connection_error(renderer: &ChatRenderer, messages: &ReplyMessages) -> Self {
        Self::error(renderer, &messages.connection_error)
    }

    fn error(renderer: &ChatRenderer, text: &str) -> Self {
        Self {
            kind: ReplyKind::Error,
            html: renderer.render(text),
            timestamp: current_timestamp(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == ReplyKind::Error
    }
}

/// Escape user-authored text for display.
///
/// User messages are shown verbatim and never interpreted as markdown.
#[must_use]
pub fn escape_user_message(text: &str) -> String {
    escape_html(text)
}

//! Request and response envelopes.

use std::fmt::Display;

use chatmd_renderer::ChatRenderer;
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Format of the `timestamp` field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn current_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// Format `time` as [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn format_timestamp<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Message sent by the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SendMessageRequest {
    /// Raw user text. A missing field decodes as empty.
    #[serde(default)]
    pub message: String,
}

impl SendMessageRequest {
    /// Create a request for `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Decode and validate a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Json`] for malformed bodies and
    /// [`ProtocolError::EmptyMessage`] when the message is blank.
    pub fn from_json(body: &str) -> Result<Self, ProtocolError> {
        let request: Self = serde_json::from_str(body)?;
        request.validate()?;
        Ok(request)
    }

    /// Reject blank messages.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::EmptyMessage`] when the message is empty after
    /// trimming.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.text().is_empty() {
            return Err(ProtocolError::EmptyMessage);
        }
        Ok(())
    }

    /// Message text without surrounding whitespace.
    #[must_use]
    pub fn text(&self) -> &str {
        self.message.trim()
    }
}

/// Backend answer to a [`SendMessageRequest`].
///
/// Optional fields are omitted from the JSON when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SendMessageResponse {
    /// Whether the backend produced an answer.
    pub success: bool,
    /// Echo of the user message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Raw markdown answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Answer already rendered to HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_html: Option<String>,
    /// Failure description when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Time of the answer, see [`TIMESTAMP_FORMAT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SendMessageResponse {
    /// Successful answer.
    pub fn success(
        message: impl Into<String>,
        response: impl Into<String>,
        response_html: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            response: Some(response.into()),
            response_html: Some(response_html.into()),
            error: None,
            timestamp: Some(timestamp.into()),
        }
    }

    /// Failed answer.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Successful answer pre-rendered by `renderer` and stamped with the
    /// current time.
    #[must_use]
    pub fn answer(response: &str, renderer: &ChatRenderer) -> Self {
        Self {
            success: true,
            response: Some(response.to_owned()),
            response_html: Some(renderer.render(response)),
            timestamp: Some(current_timestamp()),
            ..Self::default()
        }
    }

    /// Echo the text of `request` in the `message` field.
    #[must_use]
    pub fn for_request(mut self, request: &SendMessageRequest) -> Self {
        self.message = Some(request.text().to_owned());
        self
    }

    /// Decode a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Json`] for malformed bodies.
    pub fn from_json(body: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Encode as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

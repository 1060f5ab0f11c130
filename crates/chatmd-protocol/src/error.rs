//! Protocol error types.

/// Error raised while decoding or validating chat messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The user message is empty or whitespace only.
    #[error("Message cannot be empty")]
    EmptyMessage,
    /// The payload is not valid JSON for the expected shape.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

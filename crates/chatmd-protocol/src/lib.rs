//! Message exchange types for chatmd.
//!
//! Models the JSON contract between a chat page and its backend:
//!
//! - request: `{"message": "..."}`
//! - response: `{"success": true, "response": "...", "response_html": "...", "timestamp": "..."}`
//!   or `{"success": false, "error": "..."}`
//!
//! [`BotReply`] turns a response (or a transport failure) into the HTML shown
//! to the user, [`ChatHistory`] renders stored conversations, and
//! [`parse_suggestions`] cleans model-produced suggestion lists.

mod error;
mod history;
mod message;
mod reply;
mod suggestions;

pub use error::ProtocolError;
pub use history::{ChatHistory, HistoryEntry, HistoryExchange};
pub use message::{
    SendMessageRequest, SendMessageResponse, TIMESTAMP_FORMAT, current_timestamp,
    format_timestamp,
};
pub use reply::{BotReply, ReplyKind, ReplyMessages, escape_user_message};
pub use suggestions::parse_suggestions;

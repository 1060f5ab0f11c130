//! `chatmd history` command implementation.

use std::fmt::Write;
use std::path::PathBuf;

use chatmd_protocol::{ChatHistory, HistoryExchange};
use chatmd_renderer::{ChatRenderer, escape_html};
use clap::Args;

use super::{RendererArgs, read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the history command.
#[derive(Args)]
pub(crate) struct HistoryArgs {
    /// File with the JSON history array (default: stdin).
    file: Option<PathBuf>,

    /// Show only the most recent exchanges.
    #[arg(long, default_value_t = 20)]
    limit: usize,

    #[command(flatten)]
    renderer: RendererArgs,
}

impl HistoryArgs {
    /// Execute the history command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read or
    /// the history is not valid JSON.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.renderer.load_config()?;
        let renderer = ChatRenderer::new(config.render_options());
        let body = read_input(self.file.as_deref())?;
        let history = ChatHistory::from_json(&body)?.recent(self.limit);

        if history.is_empty() {
            Output::new().warning("No messages in history");
            return Ok(());
        }
        write_output(&format_exchanges(&history.render(&renderer)))
    }
}

/// One user and one bot message block per exchange, oldest first.
fn format_exchanges(exchanges: &[HistoryExchange]) -> String {
    let mut out = String::new();
    for exchange in exchanges {
        let time = escape_html(&exchange.reply.timestamp);
        writeln!(
            out,
            r#"<div class="message user-message"><div class="message-text">{}</div><div class="message-time">{time}</div></div>"#,
            exchange.user_html
        )
        .unwrap();
        writeln!(
            out,
            r#"<div class="message bot-message"><div class="message-text">{}</div><div class="message-time">{time}</div></div>"#,
            exchange.reply.html
        )
        .unwrap();
    }
    out.pop();
    out
}

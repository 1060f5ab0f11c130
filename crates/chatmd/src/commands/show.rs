//! `chatmd show` command implementation.

use std::path::PathBuf;

use chatmd_protocol::{BotReply, SendMessageResponse};
use chatmd_renderer::ChatRenderer;
use clap::Args;

use super::{RendererArgs, read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// File with the JSON response envelope (default: stdin).
    file: Option<PathBuf>,

    #[command(flatten)]
    renderer: RendererArgs,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// An envelope that cannot be decoded is treated like a failed request
    /// and shown as the connection error message.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.renderer.load_config()?;
        let renderer = ChatRenderer::new(config.render_options());
        let body = read_input(self.file.as_deref())?;

        let reply = match SendMessageResponse::from_json(&body) {
            Ok(response) => BotReply::from_response(&response, &renderer, &config.messages),
            Err(e) => {
                tracing::warn!("Unreadable response envelope: {e}");
                BotReply::connection_error(&renderer, &config.messages)
            }
        };
        if reply.is_error() {
            Output::new().warning(&format!("Error reply at {}", reply.timestamp));
        }

        write_output(&reply.html)
    }
}

//! `chatmd reply` command implementation.

use std::path::PathBuf;

use chatmd_protocol::{SendMessageRequest, SendMessageResponse};
use chatmd_renderer::ChatRenderer;
use clap::Args;

use super::{RendererArgs, read_input, write_output};
use crate::error::CliError;

/// Arguments for the reply command.
#[derive(Args)]
pub(crate) struct ReplyArgs {
    /// File with the bot answer in markdown (default: stdin).
    file: Option<PathBuf>,

    /// User message to echo in the envelope.
    #[arg(short, long)]
    message: Option<String>,

    #[command(flatten)]
    renderer: RendererArgs,
}

impl ReplyArgs {
    /// Execute the reply command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read or
    /// the user message is blank.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let request = self.message.map(SendMessageRequest::new);
        if let Some(request) = &request {
            request.validate()?;
        }

        let config = self.renderer.load_config()?;
        let renderer = ChatRenderer::new(config.render_options());
        let answer = read_input(self.file.as_deref())?;

        let mut response = SendMessageResponse::answer(&answer, &renderer);
        if let Some(request) = &request {
            response = response.for_request(request);
        }

        write_output(&response.to_json()?)
    }
}

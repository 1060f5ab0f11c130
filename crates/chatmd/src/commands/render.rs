//! `chatmd render` command implementation.

use std::path::PathBuf;

use chatmd_renderer::ChatRenderer;
use clap::Args;

use super::{RendererArgs, read_input, write_output};
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin).
    file: Option<PathBuf>,

    #[command(flatten)]
    renderer: RendererArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.renderer.load_config()?;
        let renderer = ChatRenderer::new(config.render_options());
        let input = read_input(self.file.as_deref())?;

        let result = renderer.render_result(&input);
        tracing::info!(
            diagrams = result.diagrams,
            code_blocks = result.code_blocks,
            tables = result.tables,
            "Rendered message"
        );

        write_output(&result.html)
    }
}

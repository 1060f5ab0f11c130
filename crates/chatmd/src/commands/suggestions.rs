//! `chatmd suggestions` command implementation.

use std::path::PathBuf;

use chatmd_protocol::parse_suggestions;
use clap::Args;

use super::{read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the suggestions command.
#[derive(Args)]
pub(crate) struct SuggestionsArgs {
    /// File with one suggested question per line (default: stdin).
    file: Option<PathBuf>,
}

impl SuggestionsArgs {
    /// Execute the suggestions command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let input = read_input(self.file.as_deref())?;
        let suggestions = parse_suggestions(&input);

        if suggestions.is_empty() {
            Output::new().warning("No suggestions found");
            return Ok(());
        }
        write_output(&suggestions.join("\n"))
    }
}

//! CLI error types.

use chatmd_config::ConfigError;
use chatmd_protocol::ProtocolError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Protocol(#[from] ProtocolError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

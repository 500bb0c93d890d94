use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] plum_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No note text provided")]
    EmptyContent,
    #[error("Invalid note id: {0}")]
    InvalidNoteId(String),
    #[error("Unknown setting '{0}' (expected one of: author, syncserver)")]
    UnknownSetting(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "No sync server configured. Pass an address or run `plum settings syncserver <host:port>`."
    )]
    SyncNotConfigured,
}

//! Error types for plum-core

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::NoteId;

/// Result type alias using plum-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in plum-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Store location could not be created, read, or written
    #[error("Store unavailable at {}: {source}", .path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Store document exists but cannot be decoded
    #[error("Corrupt store at {}: {source}", .path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// OS refused access to the store location
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// No space left while writing the store
    #[error("Disk full while writing {}", .0.display())]
    DiskFull(PathBuf),

    /// Bad filter mode, bad value, or malformed clause list
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Bad or oversized sync payload
    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),

    /// Transport failure while talking to the sync peer
    #[error("Sync peer unreachable: {0}")]
    SyncUnreachable(String),

    /// Sync peer answered with a non-success status
    #[error("Sync peer rejected the exchange: {0}")]
    PeerRejected(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    /// Note belongs to another author
    #[error("Can't update other's notes: {0} is not yours")]
    NotOwner(NoteId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Classify an IO failure against the store path.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            io::ErrorKind::StorageFull => Self::DiskFull(path),
            _ => Self::StoreUnavailable { path, source },
        }
    }

    /// Whether this error comes from the persistence layer.
    pub const fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable { .. }
                | Self::CorruptStore { .. }
                | Self::PermissionDenied(_)
                | Self::DiskFull(_)
                | Self::Serialization(_)
        )
    }
}

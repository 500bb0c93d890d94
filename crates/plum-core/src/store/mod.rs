//! Single-document note store
//!
//! The whole collection lives in one JSON file. Loading a missing file yields
//! an empty collection; saving always replaces the file atomically.

mod atomic;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Collection;

pub use atomic::{read_json, write_json_atomic};

/// Default file name of the note document
pub const NOTES_FILE_NAME: &str = "notes.json";

/// File-backed store for one installation's notes
#[derive(Debug, Clone)]
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    /// Create a store backed by the document at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full collection, creating the parent directory if needed
    pub fn load(&self) -> Result<Collection> {
        let collection = read_json::<Collection>(&self.path)?.unwrap_or_default();
        tracing::debug!(
            path = %self.path.display(),
            notes = collection.len(),
            "Loaded note store"
        );
        Ok(collection)
    }

    /// Replace the document with `collection`
    pub fn save(&self, collection: &Collection) -> Result<()> {
        write_json_atomic(&self.path, collection)?;
        tracing::debug!(
            path = %self.path.display(),
            notes = collection.len(),
            "Saved note store"
        );
        Ok(())
    }
}

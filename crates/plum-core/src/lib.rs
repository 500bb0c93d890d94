//! plum-core - Core library for plum
//!
//! This crate contains the note model, the single-document note store, the
//! query engine, and the two-way sync engine shared by the CLI and the sync
//! daemon.

pub mod error;
pub mod models;
pub mod query;
pub mod services;
pub mod store;
pub mod sync;

pub use error::{Error, Result};
pub use models::{Collection, Note, NoteId, Settings, TransferNote};

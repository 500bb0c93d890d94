//! Service layer shared by the CLI and the sync daemon

mod notes;

pub use notes::NoteService;

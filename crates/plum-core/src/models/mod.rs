//! Data models for plum

mod collection;
mod note;
mod settings;

pub use collection::Collection;
pub use note::{parse_tag_list, Note, NoteChanges, NoteDraft, NoteId, TransferNote};
pub use settings::Settings;

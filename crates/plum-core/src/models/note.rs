//! Note model

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A note identifier, derived from seconds since the Unix epoch at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw identifier
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The identifier a note created at `instant` starts from
    #[must_use]
    pub fn from_timestamp(instant: &DateTime<FixedOffset>) -> Self {
        Self(instant.timestamp())
    }

    /// Get the raw integer value
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// The next identifier in sequence
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A note as stored locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Short category, e.g. "journal" or "todo"
    pub kind: String,
    /// Labels in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Note body
    pub text: String,
    /// Creation or last modification time
    pub date: DateTime<FixedOffset>,
    /// Free-text identity of the writer, empty when unconfigured
    #[serde(default)]
    pub author: String,
    /// Whether the peer holds this exact version
    #[serde(default)]
    pub synced: bool,
}

impl Note {
    /// Build an unsynced note from a draft
    #[must_use]
    pub fn from_draft(
        id: NoteId,
        draft: NoteDraft,
        author: impl Into<String>,
        date: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id,
            kind: draft.kind,
            tags: draft.tags,
            text: draft.text,
            date,
            author: author.into(),
            synced: false,
        }
    }

    /// Check whether the note carries `tag`
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|candidate| candidate == tag)
    }

    /// Replace the given fields, reset the dirty bit, and stamp the update time
    pub fn apply_changes(&mut self, changes: NoteChanges, now: DateTime<FixedOffset>) {
        if let Some(kind) = changes.kind {
            self.kind = kind;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        if let Some(text) = changes.text {
            self.text = text;
        }
        self.synced = false;
        self.date = now;
    }
}

/// The fields of a note that cross the wire; `synced` stays local
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferNote {
    pub id: NoteId,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub text: String,
    pub date: DateTime<FixedOffset>,
    #[serde(default)]
    pub author: String,
}

impl TransferNote {
    /// Turn a received note into a local record the peer already has
    #[must_use]
    pub fn into_synced_note(self) -> Note {
        Note {
            id: self.id,
            kind: self.kind,
            tags: self.tags,
            text: self.text,
            date: self.date,
            author: self.author,
            synced: true,
        }
    }
}

impl From<&Note> for TransferNote {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            kind: note.kind.clone(),
            tags: note.tags.clone(),
            text: note.text.clone(),
            date: note.date,
            author: note.author.clone(),
        }
    }
}

/// User-supplied fields for a new note
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub kind: String,
    pub tags: Vec<String>,
    pub text: String,
}

impl NoteDraft {
    #[must_use]
    pub fn new(kind: impl Into<String>, tags: Vec<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            tags,
            text: text.into(),
        }
    }
}

/// Fields to replace on an existing note; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub kind: Option<String>,
    pub tags: Option<Vec<String>>,
    pub text: Option<String>,
}

impl NoteChanges {
    /// True when no field would change
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.kind.is_none() && self.tags.is_none() && self.text.is_none()
    }
}

/// Split a comma-separated tag list, trimming entries and dropping empties.
///
/// # Examples
///
/// ```
/// use plum_core::models::parse_tag_list;
///
/// assert_eq!(parse_tag_list("work, ideas,,rust"), vec!["work", "ideas", "rust"]);
/// ```
#[must_use]
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

//! The full set of notes held by one installation

use std::collections::btree_map::{self, BTreeMap};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::note::{Note, NoteId};

/// Notes keyed by id, iterated in ascending id order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    notes: BTreeMap<NoteId, Note>,
}

impl Collection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: NoteId) -> bool {
        self.notes.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    pub fn get_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.get_mut(&id)
    }

    /// Insert under the note's own id, returning whatever it replaced
    pub fn insert(&mut self, note: Note) -> Option<Note> {
        self.notes.insert(note.id, note)
    }

    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        self.notes.remove(&id)
    }

    pub fn iter(&self) -> btree_map::Values<'_, NoteId, Note> {
        self.notes.values()
    }

    pub fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, NoteId, Note> {
        self.notes.values_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = NoteId> + '_ {
        self.notes.keys().copied()
    }

    /// A new collection with the notes matching `predicate`
    #[must_use]
    pub fn filtered(&self, mut predicate: impl FnMut(&Note) -> bool) -> Self {
        self.iter().filter(|note| predicate(note)).cloned().collect()
    }

    /// Merge every note of `other` into this collection, `other` winning on collisions
    pub fn extend_from(&mut self, other: Self) {
        self.notes.extend(other.notes);
    }

    /// Pick an id for a note created at `now`.
    ///
    /// Starts from the creation second and advances past ids already in use.
    #[must_use]
    pub fn next_id(&self, now: &DateTime<FixedOffset>) -> NoteId {
        let mut id = NoteId::from_timestamp(now);
        while self.contains(id) {
            id = id.next();
        }
        id
    }
}

impl FromIterator<Note> for Collection {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        Self {
            notes: iter.into_iter().map(|note| (note.id, note)).collect(),
        }
    }
}

impl IntoIterator for Collection {
    type Item = Note;
    type IntoIter = btree_map::IntoValues<NoteId, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.into_values()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Note;
    type IntoIter = btree_map::Values<'a, NoteId, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.values()
    }
}

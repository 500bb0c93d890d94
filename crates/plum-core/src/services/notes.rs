//! Serialized access to one note store.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use tokio::sync::Mutex;
use tokio::task;

use crate::error::{Error, Result};
use crate::models::{Collection, Note, NoteChanges, NoteDraft, NoteId, TransferNote};
use crate::query::Query;
use crate::store::NoteStore;
use crate::sync::{
    collect_out, decode_batch, encode_batch, merge_in, ExchangeSummary, SyncTransport,
    DEFAULT_MAX_PAYLOAD_BYTES,
};

/// Thread-safe service for note and sync operations on one store.
///
/// Every operation runs load, compute, save under a single lock, so
/// concurrent sync exchanges against the same store never interleave.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<Mutex<NoteStore>>,
    author: String,
    max_payload_bytes: usize,
}

impl NoteService {
    /// Create a service over `store`, stamping new notes with `author`
    pub fn new(store: NoteStore, author: impl Into<String>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            author: author.into(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }

    /// Open a service for the document at `path`
    pub fn open_path(path: impl Into<PathBuf>, author: impl Into<String>) -> Self {
        Self::new(NoteStore::new(path), author)
    }

    #[must_use]
    pub const fn with_max_payload_bytes(mut self, max_payload_bytes: usize) -> Self {
        self.max_payload_bytes = max_payload_bytes;
        self
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub const fn max_payload_bytes(&self) -> usize {
        self.max_payload_bytes
    }

    pub async fn store_path(&self) -> PathBuf {
        self.store.lock().await.path().to_path_buf()
    }

    pub async fn list_notes(&self) -> Result<Collection> {
        let store = self.store.lock().await;
        load(&store).await
    }

    pub async fn query_notes(&self, query: &Query) -> Result<Collection> {
        let store = self.store.lock().await;
        let notes = load(&store).await?;
        Ok(query.apply(&notes))
    }

    pub async fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        let store = self.store.lock().await;
        let notes = load(&store).await?;
        Ok(notes.get(id).cloned())
    }

    /// Create an unsynced note with a wall-clock derived id
    pub async fn add_note(&self, draft: NoteDraft) -> Result<Note> {
        let draft = NoteDraft {
            kind: required_field(draft.kind, "kind")?,
            tags: draft.tags,
            text: required_field(draft.text, "note text")?,
        };

        let store = self.store.lock().await;
        let mut notes = load(&store).await?;
        let now = now();
        let id = notes.next_id(&now);
        let note = Note::from_draft(id, draft, self.author.clone(), now);
        notes.insert(note.clone());
        save(&store, notes).await?;

        tracing::debug!(note = %id, "Added note");
        Ok(note)
    }

    /// Replace fields of one of this author's notes, marking it unsynced
    pub async fn update_note(&self, id: NoteId, changes: NoteChanges) -> Result<Note> {
        if changes.is_empty() {
            return Err(Error::InvalidInput(
                "nothing to update: give a new kind, tags, or text".to_string(),
            ));
        }
        let changes = NoteChanges {
            kind: changes
                .kind
                .map(|kind| required_field(kind, "kind"))
                .transpose()?,
            tags: changes.tags,
            text: changes
                .text
                .map(|text| required_field(text, "note text"))
                .transpose()?,
        };

        let store = self.store.lock().await;
        let mut notes = load(&store).await?;
        let note = notes.get_mut(id).ok_or(Error::NoteNotFound(id))?;
        if note.author != self.author {
            return Err(Error::NotOwner(id));
        }
        note.apply_changes(changes, now());
        let updated = note.clone();
        save(&store, notes).await?;

        tracing::debug!(note = %id, "Updated note");
        Ok(updated)
    }

    /// Hard-delete a note
    pub async fn remove_note(&self, id: NoteId) -> Result<Note> {
        let store = self.store.lock().await;
        let mut notes = load(&store).await?;
        let removed = notes.remove(id).ok_or(Error::NoteNotFound(id))?;
        save(&store, notes).await?;

        tracing::debug!(note = %id, "Removed note");
        Ok(removed)
    }

    /// Responder side of an exchange: merge the peer's batch, then hand back
    /// everything still dirty locally.
    pub async fn respond_to_exchange(
        &self,
        incoming: Vec<TransferNote>,
    ) -> Result<Vec<TransferNote>> {
        let store = self.store.lock().await;
        let mut notes = load(&store).await?;

        let received = incoming.len();
        merge_in(&mut notes, incoming);
        let mut notes = save(&store, notes).await?;

        let outgoing = collect_out(&mut notes);
        save(&store, notes).await?;

        tracing::info!(received, sent = outgoing.len(), "Answered sync exchange");
        Ok(outgoing)
    }

    /// Initiator side of an exchange.
    ///
    /// Local dirty notes are marked synced and persisted before the batch is
    /// sent. If the transport fails they stay marked synced.
    pub async fn initiate_exchange<T: SyncTransport>(
        &self,
        transport: &T,
    ) -> Result<ExchangeSummary> {
        let store = self.store.lock().await;
        let mut notes = load(&store).await?;

        let outgoing = collect_out(&mut notes);
        let mut notes = save(&store, notes).await?;
        let sent = outgoing.len();

        let reply = transport.exchange(encode_batch(&outgoing)?).await?;
        let incoming = decode_batch(&reply, self.max_payload_bytes)?;
        let received = incoming.len();

        merge_in(&mut notes, incoming);
        save(&store, notes).await?;

        tracing::info!(sent, received, "Sync exchange completed");
        Ok(ExchangeSummary { sent, received })
    }
}

/// Document I/O runs on the blocking pool while the caller holds the store lock
async fn on_blocking_pool<T, F>(store: &NoteStore, op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&NoteStore) -> Result<T> + Send + 'static,
{
    let owned = store.clone();
    task::spawn_blocking(move || op(&owned))
        .await
        .map_err(|error| Error::StoreUnavailable {
            path: store.path().to_path_buf(),
            source: io::Error::other(error),
        })?
}

async fn load(store: &NoteStore) -> Result<Collection> {
    on_blocking_pool(store, NoteStore::load).await
}

/// Persist `notes`, handing the collection back for further changes
async fn save(store: &NoteStore, notes: Collection) -> Result<Collection> {
    on_blocking_pool(store, move |store| store.save(&notes).map(|()| notes)).await
}

fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

fn required_field(value: String, name: &str) -> Result<String> {
    if value.trim().is_empty() {
        Err(Error::InvalidInput(format!("{name} must not be empty")))
    } else {
        Ok(value)
    }
}

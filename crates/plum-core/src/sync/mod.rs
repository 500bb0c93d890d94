//! Two-way sync engine
//!
//! An exchange moves [`TransferNote`] batches in both directions. Merge-in
//! overwrites local entries with whatever the peer sent (last writer wins);
//! collect-out hands over every locally dirty note and marks it synced.

mod client;

use std::future::Future;

use crate::error::{Error, Result};
use crate::models::{Collection, TransferNote};

pub use client::HttpSyncClient;

/// Largest payload accepted in either direction unless configured otherwise
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Path of the sync endpoint on the responder
pub const SYNC_PATH: &str = "/sync";

/// Delivers an encoded batch to the peer and returns the peer's encoded reply
pub trait SyncTransport {
    fn exchange(&self, payload: Vec<u8>) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Counts of notes moved by one exchange
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExchangeSummary {
    pub sent: usize,
    pub received: usize,
}

/// Overwrite or insert every transferred note, marking it synced
pub fn merge_in(notes: &mut Collection, incoming: Vec<TransferNote>) {
    for transferred in incoming {
        notes.insert(transferred.into_synced_note());
    }
}

/// Take every unsynced note for transfer and mark it synced locally
pub fn collect_out(notes: &mut Collection) -> Vec<TransferNote> {
    notes
        .iter_mut()
        .filter(|note| !note.synced)
        .map(|note| {
            note.synced = true;
            TransferNote::from(&*note)
        })
        .collect()
}

pub fn encode_batch(batch: &[TransferNote]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(batch)?)
}

/// Decode a JSON array of transfer notes no longer than `max_len` bytes
pub fn decode_batch(payload: &[u8], max_len: usize) -> Result<Vec<TransferNote>> {
    if payload.len() > max_len {
        return Err(Error::InvalidTransfer(format!(
            "payload of {} bytes exceeds the {max_len} byte limit",
            payload.len()
        )));
    }
    serde_json::from_slice(payload)
        .map_err(|error| Error::InvalidTransfer(format!("malformed note batch: {error}")))
}

//! Per-user lookup history backed by a flat JSON document.
//!
//! The document maps user IDs to newest-first record lists:
//! `{ "<user_id>": [ {"number", "summary", "time"}, ... ] }`.
//! The authoritative copy lives in memory behind a mutex; every append
//! rewrites the document wholesale. Serializing all mutations through one
//! lock keeps concurrent lookups from losing each other's writes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::warn;

/// Maximum records retained per user; older entries fall off on append.
pub const RETENTION_CAP: usize = 50;

/// Maximum records shown by [`HistoryStore::list`], independent of
/// [`RETENTION_CAP`].
pub const DISPLAY_LIMIT: usize = 20;

/// One historical lookup. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    /// Queried digits.
    pub number: String,
    /// Short derived text describing the outcome.
    pub summary: String,
    /// When the lookup happened (UTC).
    pub time: DateTime<Utc>,
}

/// Errors surfaced by history persistence.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The document could not be written.
    #[error("failed to write history file: {0}")]
    Write(#[from] std::io::Error),

    /// The in-memory map could not be serialized.
    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Append-only, size-capped lookup log.
pub struct HistoryStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, Vec<LookupRecord>>>,
}

impl HistoryStore {
    /// Open the store at `path`, loading any existing document.
    ///
    /// A missing or unparseable file is a recoverable condition: the store
    /// starts empty (with a warning for the unparseable case) and the next
    /// append rewrites the document.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_document(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Record a lookup for `user_id`, stamped with the current time.
    ///
    /// The record goes to the front of the user's list, which is then
    /// truncated to [`RETENTION_CAP`] and checkpointed to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized or written;
    /// the in-memory record is kept either way.
    pub async fn append(
        &self,
        user_id: &str,
        number: &str,
        summary: &str,
    ) -> Result<(), HistoryError> {
        let record = LookupRecord {
            number: number.to_owned(),
            summary: summary.to_owned(),
            time: Utc::now(),
        };

        let mut entries = self.entries.lock().await;
        let user_records = entries.entry(user_id.to_owned()).or_default();
        user_records.insert(0, record);
        user_records.truncate(RETENTION_CAP);

        let serialized = serde_json::to_string_pretty(&*entries)?;
        tokio::fs::write(&self.path, serialized).await?;
        Ok(())
    }

    /// The user's most recent lookups, newest first, at most
    /// [`DISPLAY_LIMIT`] entries.
    pub async fn list(&self, user_id: &str) -> Vec<LookupRecord> {
        let entries = self.entries.lock().await;
        entries
            .get(user_id)
            .map(|records| records.iter().take(DISPLAY_LIMIT).cloned().collect())
            .unwrap_or_default()
    }

    /// Total records retained for `user_id`, up to [`RETENTION_CAP`].
    pub async fn retained_count(&self, user_id: &str) -> usize {
        let entries = self.entries.lock().await;
        entries.get(user_id).map(Vec::len).unwrap_or(0)
    }
}

/// Read and parse the history document, treating absence or corruption
/// as an empty store.
fn load_document(path: &Path) -> HashMap<String, Vec<LookupRecord>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "history file unreadable, starting empty");
            return HashMap::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "history file unparseable, starting empty");
            HashMap::new()
        }
    }
}

//! The persisted history of generated QR payloads.

use dioxus_logger::tracing::{error, warn};
use serde::{Deserialize, Serialize};

use crate::storage::{StoragePort, StorageError};

/// Fixed storage key. The value is a bare JSON array of strings, e.g.
/// `["hello","https://example.com"]`. Earlier sessions wrote exactly this
/// shape, so neither the key nor the encoding may change.
pub const STORAGE_KEY: &str = "qrCodes";

/// An insertion-ordered sequence of distinct payload strings.
///
/// Order reflects first-seen time and is never rewritten; duplicates are
/// rejected by exact string equality.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedCodeHistory {
    codes: Vec<String>,
}

impl SavedCodeHistory {
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn contains(&self, payload: &str) -> bool {
        self.codes.iter().any(|code| code == payload)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Returns a new sequence with `payload` appended. The caller is
    /// responsible for the uniqueness check.
    fn appended(&self, payload: &str) -> Self {
        let mut codes = self.codes.clone();
        codes.push(payload.to_string());
        Self { codes }
    }
}

/// Owns the in-memory history and mirrors it to the durable store,
/// write-through on every append.
pub struct HistoryStore<S: StoragePort> {
    store: S,
    history: SavedCodeHistory,
}

impl<S: StoragePort> HistoryStore<S> {
    /// Loads the history once at session start.
    ///
    /// A missing value is a normal first run and yields an empty history.
    /// A malformed value also falls back to empty, with a logged warning;
    /// the next successful append re-establishes a well-formed encoding.
    pub fn hydrate(store: S) -> Self {
        let history = match store.get(STORAGE_KEY) {
            Ok(None) => SavedCodeHistory::default(),
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(history) => history,
                Err(e) => {
                    warn!("stored history under {STORAGE_KEY:?} is malformed, starting empty: {e}");
                    SavedCodeHistory::default()
                }
            },
            Err(e) => {
                warn!("could not read stored history, starting empty: {e}");
                SavedCodeHistory::default()
            }
        };
        Self { store, history }
    }

    pub fn history(&self) -> &SavedCodeHistory {
        &self.history
    }

    pub fn contains(&self, payload: &str) -> bool {
        self.history.contains(payload)
    }

    /// Appends `payload` if it is not already present and mirrors the full
    /// sequence to the durable store. Returns whether the history grew.
    ///
    /// A failed write leaves the in-memory history authoritative for the
    /// rest of the session; the divergence is only visible in the log.
    pub fn record(&mut self, payload: &str) -> bool {
        if self.history.contains(payload) {
            return false;
        }
        self.history = self.history.appended(payload);
        if let Err(e) = self.flush() {
            error!("failed to mirror history to the durable store, in-memory history is ahead: {e}");
        }
        true
    }

    fn flush(&self) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.history)
            .map_err(|e| StorageError::WriteRejected(e.to_string()))?;
        self.store.set(STORAGE_KEY, &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    /// Store that accepts reads but refuses every write.
    struct ReadOnlyStorage;

    impl StoragePort for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteRejected("quota exceeded".into()))
        }
    }

    #[test]
    fn hydrate_without_prior_value_yields_empty_history() {
        let store = HistoryStore::hydrate(MemoryStorage::new());
        assert!(store.history().is_empty());
    }

    #[test]
    fn record_keeps_payloads_distinct_in_first_seen_order() {
        let mut store = HistoryStore::hydrate(MemoryStorage::new());
        for payload in ["a", "b", "a", "c", "b", "a"] {
            store.record(payload);
        }
        assert_eq!(store.history().codes(), ["a", "b", "c"]);
    }

    #[test]
    fn record_reports_whether_the_history_grew() {
        let mut store = HistoryStore::hydrate(MemoryStorage::new());
        assert!(store.record("hello"));
        assert!(!store.record("hello"));
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn recorded_payloads_survive_rehydration() {
        let backend = MemoryStorage::new();
        let mut store = HistoryStore::hydrate(backend.clone());
        store.record("foo");
        store.record("bar");

        let next_session = HistoryStore::hydrate(backend);
        assert_eq!(next_session.history().codes(), ["foo", "bar"]);
    }

    #[test]
    fn stored_encoding_is_a_bare_json_array_of_strings() {
        let backend = MemoryStorage::new();
        let mut store = HistoryStore::hydrate(backend.clone());
        store.record("hello");
        store.record("https://example.com");

        let raw = backend.get(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"["hello","https://example.com"]"#);
    }

    #[test]
    fn hydrate_adopts_a_prior_sessions_encoding_verbatim() {
        let backend = MemoryStorage::new();
        backend
            .set(STORAGE_KEY, r#"["hello","https://example.com"]"#)
            .unwrap();

        let store = HistoryStore::hydrate(backend);
        assert_eq!(store.history().codes(), ["hello", "https://example.com"]);
    }

    #[test]
    fn malformed_stored_value_falls_back_to_empty_and_heals_on_next_write() {
        let backend = MemoryStorage::new();
        backend.set(STORAGE_KEY, "{not json").unwrap();

        let mut store = HistoryStore::hydrate(backend.clone());
        assert!(store.history().is_empty());

        store.record("fresh");
        let raw = backend.get(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"["fresh"]"#);
    }

    #[test]
    fn write_failure_keeps_the_in_memory_history_authoritative() {
        let mut store = HistoryStore::hydrate(ReadOnlyStorage);
        assert!(store.record("kept despite the failed write"));
        assert!(store.contains("kept despite the failed write"));
    }
}

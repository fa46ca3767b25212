//! Key-value blob storage.
//!
//! The session persists cross-session durables (best score, power-up
//! counts, streak bests, ghost snapshot) through a string-keyed store of
//! JSON blobs. The store is value-opaque, so a host can keep unrelated
//! keys (a language preference, say) in the same backing storage.
//!
//! Reads are forgiving by contract: a missing blob and a corrupt blob
//! both decode to the caller's default, never to an error.

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Durable string-keyed blob storage.
pub trait StateStore {
    /// Write a blob under a key, replacing any previous value.
    fn persist(&mut self, key: &str, blob: &str);

    /// Read the blob under a key, if present.
    fn load(&self, key: &str) -> Option<String>;

    /// Drop the blob under a key.
    fn remove(&mut self, key: &str);
}

/// In-memory store. The default backing for sessions whose host does not
/// supply durable storage, and the store tests run against.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    blobs: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn persist(&mut self, key: &str, blob: &str) {
        self.blobs.insert(key.to_owned(), blob.to_owned());
    }

    fn load(&self, key: &str) -> Option<String> {
        self.blobs.get(key).cloned()
    }

    fn remove(&mut self, key: &str) {
        self.blobs.remove(key);
    }
}

/// Load and decode a persisted value, falling back to `default` when the
/// blob is missing or corrupt.
pub fn load_json<T: DeserializeOwned>(store: &dyn StateStore, key: &str, default: T) -> T {
    let Some(blob) = store.load(key) else {
        return default;
    };
    match serde_json::from_str(&blob) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, %err, "corrupt persisted blob, using default");
            default
        }
    }
}

/// Encode and persist a value as JSON.
pub fn save_json<T: Serialize>(store: &mut dyn StateStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(blob) => store.persist(key, &blob),
        Err(err) => tracing::warn!(key, %err, "failed to encode persisted value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        store.persist("best_score", "1200");
        assert_eq!(store.load("best_score").as_deref(), Some("1200"));

        store.remove("best_score");
        assert_eq!(store.load("best_score"), None);
    }

    #[test]
    fn test_load_json_missing_falls_back() {
        let store = MemoryStore::new();
        assert_eq!(load_json(&store, "best_score", 0u32), 0);
    }

    #[test]
    fn test_load_json_corrupt_falls_back() {
        let mut store = MemoryStore::new();
        store.persist("best_score", "{not json");
        assert_eq!(load_json(&store, "best_score", 7u32), 7);
    }

    #[test]
    fn test_load_json_wrong_shape_falls_back() {
        let mut store = MemoryStore::new();
        store.persist("best_score", "\"a string\"");
        assert_eq!(load_json(&store, "best_score", 3u32), 3);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "streak_bests", &vec![4u32, 2]);
        assert_eq!(
            load_json(&store, "streak_bests", Vec::<u32>::new()),
            vec![4, 2]
        );
    }

    #[test]
    fn test_unrelated_keys_untouched() {
        let mut store = MemoryStore::new();
        store.persist("language", "\"de\"");
        save_json(&mut store, "best_score", &99u32);
        assert_eq!(store.load("language").as_deref(), Some("\"de\""));
    }
}

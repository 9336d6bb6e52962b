//! JSON encoding of store collections into a storage slot.
//!
//! Loading never fails: a missing, unreadable or malformed value hydrates an
//! empty collection. Saving is fire-and-forget; failures are logged and the
//! in-memory collection stays authoritative.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::StorageSlot;

/// Read the collection stored under `key`.
pub(crate) fn load<T: DeserializeOwned>(storage: &dyn StorageSlot, key: &str) -> Vec<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored collection, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed stored collection");
            Vec::new()
        }
    }
}

/// Write `items` under `key` as a JSON array.
pub(crate) fn save<T: Serialize>(storage: &dyn StorageSlot, key: &str, items: &[T]) {
    let encoded = match serde_json::to_string(items) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::error!(key, error = %e, "Failed to encode collection");
            return;
        }
    };

    if let Err(e) = storage.set(key, &encoded) {
        tracing::error!(key, error = %e, "Failed to persist collection");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_load_missing_is_empty() {
        let storage = MemoryStorage::new();
        assert!(load::<u32>(&storage, "cart").is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let storage = MemoryStorage::new();
        for raw in ["", "not json", "{\"id\":1}", "[1, \"two\"]", "null"] {
            storage.set("cart", raw).unwrap();
            assert!(load::<u32>(&storage, "cart").is_empty(), "{raw:?}");
        }
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStorage::new();
        save(&storage, "cart", &[3_u32, 1, 2]);
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[3,1,2]"));
        assert_eq!(load::<u32>(&storage, "cart"), vec![3, 1, 2]);
    }

    #[test]
    fn test_save_with_invalid_key_does_not_panic() {
        let storage = MemoryStorage::new();
        save(&storage, "bad key", &[1_u32]);
        assert!(storage.is_empty());
    }
}

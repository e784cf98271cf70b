//! Persistence of the cart document.
//!
//! [`KeyValueStore`] is the port a host implements over its storage medium
//! (a browser-like session, a directory of files, memory). [`CartRepository`]
//! sits on top of it and owns the failure policy: loading never fails and
//! saving never propagates an error. Both log what went wrong instead.

use std::collections::HashMap;

use super::document::CartDocument;

/// Namespace key the cart document is stored under.
pub const CART_STORAGE_KEY: &str = "bellaCart_v1";

/// Errors raised by a storage medium.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The write would exceed the medium's capacity.
    #[error("storage quota exceeded: {attempted} bytes requested, limit is {limit}")]
    QuotaExceeded {
        /// Capacity in bytes.
        limit: usize,
        /// Bytes the store would hold after the write.
        attempted: usize,
    },
    /// The medium could not be read or written.
    #[error("storage unavailable: {0}")]
    Backend(String),
}

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium rejects the write.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// In-memory store with an optional byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses writes once keys and values exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Seed a raw value, bypassing the quota.
    #[must_use]
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// The raw stored value for `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn used_bytes_with(&self, key: &str, value: &str) -> usize {
        let others: usize = self
            .entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        others + key.len() + value.len()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            let attempted = self.used_bytes_with(key, value);
            if attempted > limit {
                return Err(StorageError::QuotaExceeded { limit, attempted });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable owner of the cart document.
#[derive(Debug)]
pub struct CartRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartRepository<S> {
    /// A repository using [`CART_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// A repository using a custom namespace key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The namespace key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the repository, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Load the current document.
    ///
    /// A missing value, an unreadable medium and a corrupted payload all
    /// yield an empty document; the last two are logged.
    pub fn load(&self) -> CartDocument {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CartDocument::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read cart from storage");
                return CartDocument::new();
            }
        };

        CartDocument::from_json(&raw).unwrap_or_else(|e| {
            tracing::warn!(key = %self.key, error = %e, "discarding corrupted cart document");
            CartDocument::new()
        })
    }

    /// Persist `document`.
    ///
    /// Serialization and storage failures are logged and dropped; the
    /// previously stored value stays in place.
    pub fn save(&mut self, document: &CartDocument) {
        let raw = match document.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.store.set_item(&self.key, &raw) {
            tracing::error!(key = %self.key, error = %e, "failed to save cart to storage");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Price;

    struct UnavailableStore;

    impl KeyValueStore for UnavailableStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Backend("disabled".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("disabled".to_string()))
        }
    }

    #[test]
    fn test_load_missing_is_empty() {
        let repository = CartRepository::new(MemoryStore::new());
        assert!(repository.load().is_empty());
    }

    #[test]
    fn test_load_corrupted_is_empty() {
        for payload in ["{not json", r#"{"items": "oops"}"#, "null", "42"] {
            let store = MemoryStore::new().with_item(CART_STORAGE_KEY, payload);
            let repository = CartRepository::new(store);
            assert_eq!(repository.load(), CartDocument::new(), "payload {payload}");
        }
    }

    #[test]
    fn test_unavailable_storage_degrades() {
        let mut repository = CartRepository::new(UnavailableStore);
        assert!(repository.load().is_empty());

        let mut document = CartDocument::new();
        document.merge("A", Price::new(1), 1);
        repository.save(&document);
    }

    #[test]
    fn test_save_then_load() {
        let mut repository = CartRepository::new(MemoryStore::new());
        let mut document = CartDocument::new();
        document.merge("Tas A", Price::new(150_000), 2);

        repository.save(&document);
        assert_eq!(repository.load(), document);
        assert_eq!(
            repository.store().raw(CART_STORAGE_KEY),
            Some(r#"{"items":[{"name":"Tas A","price":150000,"qty":2}]}"#)
        );
    }

    #[test]
    fn test_save_of_load_keeps_bytes() {
        let raw = r#"{"items":[{"name":"A","price":10,"qty":1},{"name":"B","price":20,"qty":3}]}"#;
        let mut repository =
            CartRepository::new(MemoryStore::new().with_item(CART_STORAGE_KEY, raw));

        let document = repository.load();
        repository.save(&document);
        assert_eq!(repository.store().raw(CART_STORAGE_KEY), Some(raw));
    }

    #[test]
    fn test_quota_exceeded_keeps_previous_value() {
        let raw = r#"{"items":[{"name":"A","price":10,"qty":1}]}"#;
        let store = MemoryStore::with_quota(CART_STORAGE_KEY.len() + raw.len())
            .with_item(CART_STORAGE_KEY, raw);
        let mut repository = CartRepository::new(store);

        let mut document = repository.load();
        document.merge("A much longer product name", Price::new(1), 1);
        repository.save(&document);

        assert_eq!(repository.store().raw(CART_STORAGE_KEY), Some(raw));
    }

    #[test]
    fn test_memory_store_quota_error() {
        let mut store = MemoryStore::with_quota(4);
        assert_eq!(
            store.set_item("key", "value"),
            Err(StorageError::QuotaExceeded {
                limit: 4,
                attempted: 8
            })
        );
        assert!(store.set_item("k", "v").is_ok());
    }
}

//! Session-backed cart storage.
//!
//! A visitor's session plays the role of the browser's local storage: the
//! serialized cart document lives under [`CART_STORAGE_KEY`] and every
//! request reads it afresh. Two tabs sharing a session race exactly like two
//! tabs sharing local storage, and the last flush wins.
//!
//! Session access is async while the cart engine is synchronous, so a
//! request works on a [`SessionStorage`] snapshot taken at the start and
//! flushed back at the end.

use bella_mode_core::cart::{CART_STORAGE_KEY, KeyValueStore, StorageError};
use tower_sessions::Session;

/// Snapshot of the cart's storage slot in a session.
pub struct SessionStorage {
    session: Session,
    value: Option<String>,
    dirty: bool,
}

impl SessionStorage {
    /// Read the cart slot from the session.
    ///
    /// An unreadable session behaves like an empty one.
    pub async fn open(session: Session) -> Self {
        let value = match session.get::<String>(CART_STORAGE_KEY).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read cart from session");
                None
            }
        };

        Self {
            session,
            value,
            dirty: false,
        }
    }

    /// Write the slot back if it changed. Failures are logged and dropped.
    pub async fn flush(self) {
        if !self.dirty {
            return;
        }
        let Some(value) = self.value else {
            return;
        };

        if let Err(e) = self.session.insert(CART_STORAGE_KEY, value).await {
            tracing::error!(error = %e, "failed to save cart to session");
        }
    }
}

impl KeyValueStore for SessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if key == CART_STORAGE_KEY {
            Ok(self.value.clone())
        } else {
            Err(StorageError::Backend(format!("no session slot for key {key}")))
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if key != CART_STORAGE_KEY {
            return Err(StorageError::Backend(format!("no session slot for key {key}")));
        }
        self.value = Some(value.to_string());
        self.dirty = true;
        Ok(())
    }
}

//! `sessionStorage` as a [`SessionStore`].

use web_sys::Storage;

use crate::error::{describe_js, Result, TableError};
use crate::storage::SessionStore;

/// Browser session storage; a no-op when the page has none (e.g. storage
/// disabled by privacy settings).
pub struct WebSessionStore {
    storage: Option<Storage>,
}

impl WebSessionStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.session_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("session storage unavailable, state will not persist");
        }
        Self { storage }
    }
}

impl Default for WebSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for WebSessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let Some(storage) = self.storage.as_ref() else {
            return Ok(());
        };
        storage
            .set_item(key, value)
            .map_err(|e| TableError::Storage(describe_js(&e)))
    }

    fn remove_item(&mut self, key: &str) {
        if let Some(storage) = self.storage.as_ref() {
            let _ = storage.remove_item(key);
        }
    }
}

//! LocalStorage-backed score store (WASM only)

use super::{ScoreStore, StoreError, decode_value, encode_value};

/// Scores in `window.localStorage`
pub struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageStore {
    /// Open LocalStorage; a private-mode browser may refuse, which leaves
    /// the store in a read-nothing / write-fails state.
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, high scores will not persist");
        }
        Self { storage }
    }
}

impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<i64> {
        let storage = self.storage.as_ref()?;
        let raw = storage.get_item(key).ok()??;
        decode_value(&raw)
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        let raw = encode_value(value)?;
        storage
            .set_item(key, &raw)
            .map_err(|e| StoreError::Write(format!("{:?}", e)))
    }
}

//! Score persistence
//!
//! A tiny key-value interface: one integer per key. The browser build uses
//! LocalStorage; tests and the native build use an in-memory map. Values are
//! stored as JSON numbers so a hand-edited or corrupted entry reads as absent.

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage key for the grid game's high score
pub const SNAKE_HIGH_SCORE_KEY: &str = "snakeHighScore";
/// Storage key for the slicer game's high score
pub const SLICER_HIGH_SCORE_KEY: &str = "fruitNinjaHighScore";

/// Storage failure. Never fatal to a running game.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write rejected: {0}")]
    Write(String),
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Integer key-value store
pub trait ScoreStore {
    /// Read a value; absent or unparsable entries read as `None`
    fn get(&self, key: &str) -> Option<i64>;
    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
}

/// Parse a stored value
pub fn decode_value(raw: &str) -> Option<i64> {
    serde_json::from_str::<i64>(raw.trim()).ok()
}

/// Encode a value for storage
pub fn encode_value(value: i64) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&value)?)
}

/// In-memory store (native build, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw string, bypassing encoding
    pub fn insert_raw(&mut self, key: &str, raw: &str) {
        self.values.insert(key.to_string(), raw.to_string());
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(|raw| decode_value(raw))
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), encode_value(value)?);
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self, key: &str) -> Option<i64> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

//! Per-game best score
//!
//! Read once when a game screen opens, written whenever a run beats it.
//! Storage failures are logged and otherwise ignored: the in-memory best
//! still updates, it just won't survive a reload.

use crate::persistence::ScoreStore;

/// Best score for one game, mirrored to a `ScoreStore` key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    key: &'static str,
    best: i64,
}

impl HighScore {
    /// Load from the store; a missing or negative entry starts at zero
    pub fn load(store: &dyn ScoreStore, key: &'static str) -> Self {
        let best = store.get(key).unwrap_or(0).max(0);
        log::info!("Loaded high score {} = {}", key, best);
        Self { key, best }
    }

    pub fn best(&self) -> i64 {
        self.best
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: i64) -> bool {
        score > self.best
    }

    /// Record a score. Returns true if it was a new best (whether or not the
    /// write succeeded).
    pub fn record(&mut self, score: i64, store: &mut dyn ScoreStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match store.set(self.key, score) {
            Ok(()) => log::info!("New high score {} = {}", self.key, score),
            Err(e) => log::warn!("Could not save high score {}: {}", self.key, e),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<i64> {
            None
        }

        fn set(&mut self, _key: &str, _value: i64) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_load_defaults_to_zero() {
        let store = MemoryStore::new();
        let high = HighScore::load(&store, "a");
        assert_eq!(high.best(), 0);

        let mut store = MemoryStore::new();
        store.set("a", -4).unwrap();
        assert_eq!(HighScore::load(&store, "a").best(), 0);
    }

    #[test]
    fn test_record_only_improvements() {
        let mut store = MemoryStore::new();
        store.set("a", 10).unwrap();
        let mut high = HighScore::load(&store, "a");
        assert!(!high.record(10, &mut store));
        assert!(!high.record(3, &mut store));
        assert!(high.record(11, &mut store));
        assert_eq!(high.best(), 11);
        assert_eq!(store.get("a"), Some(11));
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let mut store = BrokenStore;
        let mut high = HighScore::load(&store, "a");
        assert!(high.record(5, &mut store));
        assert_eq!(high.best(), 5);
    }
}

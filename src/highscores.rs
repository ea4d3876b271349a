//! Per-game high score
//!
//! One integer per game, stored as a base-10 string under a game-specific key.

use crate::persistence::{KeyValueStore, StorageError};

/// The best score seen for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    key: &'static str,
    best: u64,
}

impl HighScore {
    /// Read the stored value. Absent, unreadable or malformed data counts as 0.
    pub fn load(store: &dyn KeyValueStore, key: &'static str) -> Self {
        let best = match store.get_item(key) {
            Ok(Some(raw)) => parse_score(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring malformed high score for {}: {:?}", key, raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Could not read high score for {}: {}", key, e);
                0
            }
        };
        log::info!("High score for {}: {}", key, best);
        Self { key, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Whether a score would set a new record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run. Writes only when the score beats the best.
    ///
    /// Returns whether a new record was set. The in-memory best advances even
    /// if the write fails.
    pub fn record(&mut self, score: u64, store: &mut dyn KeyValueStore) -> Result<bool, StorageError> {
        if !self.qualifies(score) {
            return Ok(false);
        }
        self.best = score;
        store.set_item(self.key, &score.to_string())?;
        log::info!("High score saved for {}: {}", self.key, score);
        Ok(true)
    }
}

/// Parse a stored score, accepting the loose formats a browser may leave behind
/// (`"120"`, `" 120 "`, `"120.7"`).
fn parse_score(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v.floor() as u64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_absent_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(HighScore::load(&store, "game").best(), 0);
    }

    #[test]
    fn test_malformed_is_zero() {
        let store = MemoryStore::with_item("game", "lots");
        assert_eq!(HighScore::load(&store, "game").best(), 0);
        let store = MemoryStore::with_item("game", "-5");
        assert_eq!(HighScore::load(&store, "game").best(), 0);
    }

    #[test]
    fn test_loose_formats() {
        assert_eq!(parse_score(" 120 "), Some(120));
        assert_eq!(parse_score("120.7"), Some(120));
        assert_eq!(parse_score("NaN"), None);
    }

    #[test]
    fn test_record_only_when_beaten() {
        let mut store = MemoryStore::with_item("game", "100");
        let mut hs = HighScore::load(&store, "game");

        assert!(!hs.record(50, &mut store).unwrap());
        assert!(!hs.record(100, &mut store).unwrap());
        assert_eq!(store.get_item("game").unwrap().as_deref(), Some("100"));

        assert!(hs.record(150, &mut store).unwrap());
        assert_eq!(hs.best(), 150);
        assert_eq!(store.get_item("game").unwrap().as_deref(), Some("150"));
    }

    #[test]
    fn test_write_failure_still_advances_best() {
        struct ReadOnly;
        impl KeyValueStore for ReadOnly {
            fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Ok(None)
            }
            fn set_item(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Write {
                    key: key.to_string(),
                    reason: "quota".to_string(),
                })
            }
        }

        let mut store = ReadOnly;
        let mut hs = HighScore::load(&store, "game");
        assert!(hs.record(10, &mut store).is_err());
        assert_eq!(hs.best(), 10);
    }
}

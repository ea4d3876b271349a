//! Hub settings and preferences
//!
//! Persisted as JSON next to the high scores.

use serde::{Deserialize, Serialize};

use crate::consts::STALL_THRESHOLD_MS;
use crate::persistence::{KeyValueStore, StorageError};

/// Hub settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frames slower than this skip the update step
    pub stall_threshold_ms: f64,
    /// Cosmetic particle bursts
    pub particles: bool,
    /// Blink the player while invulnerable
    pub flicker: bool,
    /// Show an FPS readout in the HUD
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stall_threshold_ms: STALL_THRESHOLD_MS,
            particles: true,
            flicker: true,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "arcade_hub_settings";

    /// Load settings, falling back to defaults on absent or malformed data
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Replace out-of-range values with defaults
    fn sanitized(mut self) -> Self {
        if !self.stall_threshold_ms.is_finite() || self.stall_threshold_ms <= 0.0 {
            self.stall_threshold_ms = STALL_THRESHOLD_MS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(Settings::load(&MemoryStore::new()), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let store = MemoryStore::with_item(Settings::STORAGE_KEY, r#"{"flicker":false}"#);
        let settings = Settings::load(&store);
        assert!(!settings.flicker);
        assert!(settings.particles);
        assert_eq!(settings.stall_threshold_ms, STALL_THRESHOLD_MS);
    }

    #[test]
    fn test_bad_threshold_replaced() {
        let store = MemoryStore::with_item(Settings::STORAGE_KEY, r#"{"stall_threshold_ms":-3}"#);
        assert_eq!(Settings::load(&store).stall_threshold_ms, STALL_THRESHOLD_MS);
    }

    #[test]
    fn test_malformed_json_uses_defaults() {
        let store = MemoryStore::with_item(Settings::STORAGE_KEY, "{not json");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}

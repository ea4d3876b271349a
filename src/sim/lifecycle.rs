//! Game lifecycle: idle -> playing -> game over -> playing

use serde::{Deserialize, Serialize};

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start overlay shown, nothing simulated
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended, final score shown
    GameOver,
}

impl GamePhase {
    /// Whether the world advances this tick
    pub fn is_active(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }

    /// Whether a start/restart action is accepted
    pub fn accepts_start(&self) -> bool {
        !self.is_active()
    }
}

/// Notable transitions reported by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new run began (from idle or game over)
    Started,
    /// The run ended
    GameOver { score: u64, new_record: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_playing_is_active() {
        assert!(!GamePhase::Idle.is_active());
        assert!(GamePhase::Playing.is_active());
        assert!(!GamePhase::GameOver.is_active());
    }

    #[test]
    fn test_start_accepted_outside_play() {
        assert!(GamePhase::Idle.accepts_start());
        assert!(GamePhase::GameOver.accepts_start());
        assert!(!GamePhase::Playing.accepts_start());
    }
}

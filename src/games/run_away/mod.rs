//! RunAway - endless side-scrolling jumper
//!
//! Jump over ground obstacles; any hit ends the run.

pub mod state;
pub mod tick;
pub mod view;

pub use state::RunAwayState;

use crate::input::InputSnapshot;
use crate::renderer::{AssetProbe, Frame};
use crate::sim::{Game, GameEvent, GamePhase, Surface};

/// RunAway game instance
#[derive(Debug, Clone)]
pub struct RunAway {
    pub state: RunAwayState,
}

impl Game for RunAway {
    const TITLE: &'static str = "RunAway";
    const STORAGE_KEY: &'static str = "runawayHighScore";

    fn new(surface: Surface, high_score: u64, seed: u64) -> Self {
        Self {
            state: RunAwayState::new(surface, high_score, seed),
        }
    }

    fn fit_surface(viewport_width: f32, _viewport_height: f32) -> Surface {
        Surface::new(
            (viewport_width * 0.9).min(state::SURFACE_MAX_WIDTH),
            state::SURFACE_HEIGHT,
        )
    }

    fn phase(&self) -> GamePhase {
        self.state.phase
    }

    fn tick(&mut self, input: &InputSnapshot) -> Vec<GameEvent> {
        tick::tick(&mut self.state, input)
    }

    fn render(&self, _assets: &dyn AssetProbe) -> Frame {
        view::render(&self.state)
    }

    fn resize(&mut self, surface: Surface) {
        self.state.resize(surface);
    }

    fn surface(&self) -> Surface {
        self.state.surface
    }

    fn score(&self) -> u64 {
        self.state.score
    }

    fn high_score(&self) -> u64 {
        self.state.high_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_capped() {
        assert_eq!(RunAway::fit_surface(2000.0, 900.0), Surface::new(1000.0, 500.0));
        assert_eq!(RunAway::fit_surface(500.0, 900.0), Surface::new(450.0, 500.0));
    }
}

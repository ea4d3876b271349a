//! GoHigh - vertical space climber
//!
//! Steer left and right to dodge falling asteroids; shields absorb hits and
//! boosts speed up the climb.

pub mod state;
pub mod tick;
pub mod view;

pub use state::GoHighState;

use crate::input::InputSnapshot;
use crate::renderer::{AssetProbe, Frame};
use crate::settings::Settings;
use crate::sim::{Game, GameEvent, GamePhase, Surface};

#[derive(Debug, Clone)]
pub struct GoHigh {
    pub state: GoHighState,
}

impl Game for GoHigh {
    const TITLE: &'static str = "GoHigh";
    const STORAGE_KEY: &'static str = "goHighHighScore";

    fn new(surface: Surface, high_score: u64, seed: u64) -> Self {
        Self {
            state: GoHighState::new(surface, high_score, seed),
        }
    }

    fn fit_surface(viewport_width: f32, viewport_height: f32) -> Surface {
        Surface::new(
            (viewport_width * 0.9).min(state::SURFACE_MAX_WIDTH),
            (viewport_height * 0.9).min(state::SURFACE_MAX_HEIGHT),
        )
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.state.particles_enabled = settings.particles;
    }

    fn phase(&self) -> GamePhase {
        self.state.phase
    }

    fn tick(&mut self, input: &InputSnapshot) -> Vec<GameEvent> {
        tick::tick(&mut self.state, input)
    }

    fn render(&self, assets: &dyn AssetProbe) -> Frame {
        view::render(&self.state, assets)
    }

    fn resize(&mut self, surface: Surface) {
        self.state.resize(surface);
    }

    fn surface(&self) -> Surface {
        self.state.surface
    }

    fn score(&self) -> u64 {
        self.state.altitude()
    }

    fn high_score(&self) -> u64 {
        self.state.high_score
    }
}

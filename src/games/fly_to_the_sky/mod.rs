//! FlyToTheSky - steer a plane through pillar gaps
//!
//! Three hit points, a short invulnerability window after each hit, and
//! heal/speed items drifting in from the right.

pub mod state;
pub mod tick;
pub mod view;

pub use state::FlyState;

use crate::input::InputSnapshot;
use crate::renderer::{AssetProbe, Frame};
use crate::settings::Settings;
use crate::sim::{Game, GameEvent, GamePhase, Surface};

#[derive(Debug, Clone)]
pub struct FlyToTheSky {
    pub state: FlyState,
}

impl Game for FlyToTheSky {
    const TITLE: &'static str = "FlyToTheSky";
    const STORAGE_KEY: &'static str = "flyToTheSkyHighScore";

    fn new(surface: Surface, high_score: u64, seed: u64) -> Self {
        Self {
            state: FlyState::new(surface, high_score, seed),
        }
    }

    fn fit_surface(viewport_width: f32, _viewport_height: f32) -> Surface {
        Surface::new(viewport_width.min(state::SURFACE_MAX_WIDTH), state::SURFACE_HEIGHT)
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.state.flicker = settings.flicker;
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
    fn test_surface_follows_container() {
        assert_eq!(FlyToTheSky::fit_surface(1200.0, 800.0), Surface::new(896.0, 400.0));
        assert_eq!(FlyToTheSky::fit_surface(600.0, 800.0), Surface::new(600.0, 400.0));
    }

    #[test]
    fn test_settings_disable_flicker() {
        let mut game = FlyToTheSky::new(Surface::new(800.0, 400.0), 0, 1);
        game.apply_settings(&Settings {
            flicker: false,
            ..Default::default()
        });
        assert!(!game.state.flicker);
    }
}

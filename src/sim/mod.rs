//! Shared simulation module
//!
//! Every game follows the same contract:
//! - One world value per game instance, owned by its controller
//! - `tick` is the only writer of world state
//! - `render` reads world state and produces a `Frame`
//! - Seeded RNG only, so runs are reproducible in tests

pub mod collision;
pub mod lifecycle;

pub use collision::{Rect, circles_overlap};
pub use lifecycle::{GameEvent, GamePhase};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::input::InputSnapshot;
use crate::renderer::{AssetProbe, Frame};
use crate::settings::Settings;

/// Pixel extent of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Horizontal center of the surface
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Vertical center of the surface
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}

/// A self-contained arcade game driven by the session loop
pub trait Game {
    /// Display name used on overlays and in logs
    const TITLE: &'static str;
    /// Key of the persisted high score
    const STORAGE_KEY: &'static str;

    /// Build a game in the idle phase
    fn new(surface: Surface, high_score: u64, seed: u64) -> Self;

    /// Size the surface for a viewport of the given size
    fn fit_surface(viewport_width: f32, viewport_height: f32) -> Surface;

    /// Apply presentation preferences
    fn apply_settings(&mut self, _settings: &Settings) {}

    fn phase(&self) -> GamePhase;

    /// Advance one update step
    fn tick(&mut self, input: &InputSnapshot) -> Vec<GameEvent>;

    /// Produce drawing commands for the current state
    fn render(&self, assets: &dyn AssetProbe) -> Frame;

    fn resize(&mut self, surface: Surface);

    fn surface(&self) -> Surface;

    fn score(&self) -> u64;

    fn high_score(&self) -> u64;
}

/// Uniform draw between `min` and `max`; returns `min` for an empty range
#[inline]
pub fn random_between(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    min + rng.random::<f32>() * (max - min)
}

/// Bernoulli draw with the probability clamped into `[0, 1]`
#[inline]
pub fn chance(rng: &mut impl Rng, p: f32) -> bool {
    rng.random::<f32>() < p.clamp(0.0, 1.0)
}

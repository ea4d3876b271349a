//! Arcade Hub - a small browser arcade of canvas mini-games
//!
//! Core modules:
//! - `sim`: Shared simulation plumbing (lifecycle, collision, the `Game` trait)
//! - `games`: The three games (RunAway, FlyToTheSky, GoHigh)
//! - `input`: Input sampler turning raw events into per-tick signals
//! - `renderer`: Draw-command frames produced by the render step
//! - `platform`: Loop driver and the browser host
//! - `persistence`: Key-value stores backing the high score and settings

pub mod catalog;
pub mod games;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use catalog::Route;
pub use highscores::HighScore;
pub use session::Session;
pub use settings::Settings;

/// Crate-wide constants
pub mod consts {
    /// Update steps per second the games are tuned for (one per display refresh)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Frames slower than this skip their update step (backgrounded tab)
    pub const STALL_THRESHOLD_MS: f64 = 160.0;

    /// Start/restart button size shared by every overlay
    pub const BUTTON_WIDTH: f32 = 120.0;
    pub const BUTTON_HEIGHT: f32 = 40.0;
}

/// Convert a tick count into whole seconds for HUD timers (rounded up)
pub fn ticks_to_seconds(ticks: u32) -> u32 {
    ticks.div_ceil(consts::TICKS_PER_SECOND)
}

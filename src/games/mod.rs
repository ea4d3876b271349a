//! The arcade's games

pub mod fly_to_the_sky;
pub mod go_high;
pub mod run_away;

pub use fly_to_the_sky::FlyToTheSky;
pub use go_high::GoHigh;
pub use run_away::RunAway;

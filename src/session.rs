//! Game session controller
//!
//! Owns one game together with its input sampler, loop driver and storage.
//! Hosts feed it raw events and refresh timestamps and get frames back.

use crate::highscores::HighScore;
use crate::input::{InputEvent, InputSampler};
use crate::persistence::KeyValueStore;
use crate::platform::LoopDriver;
use crate::renderer::{AssetProbe, Color, Frame, TextAlign};
use crate::settings::Settings;
use crate::sim::{Game, GameEvent, Surface};

use glam::Vec2;

pub struct Session<G: Game> {
    game: G,
    input: InputSampler,
    driver: LoopDriver,
    store: Box<dyn KeyValueStore>,
    high_score: HighScore,
    settings: Settings,
}

impl<G: Game> Session<G> {
    /// Load the stored high score and build the game in its idle phase
    pub fn new(surface: Surface, store: Box<dyn KeyValueStore>, settings: Settings, seed: u64) -> Self {
        let high_score = HighScore::load(store.as_ref(), G::STORAGE_KEY);
        let mut game = G::new(surface, high_score.best(), seed);
        game.apply_settings(&settings);
        log::info!("{} session ready ({}x{})", G::TITLE, surface.width, surface.height);
        Self {
            game,
            input: InputSampler::new(),
            driver: LoopDriver::new(settings.stall_threshold_ms),
            store,
            high_score,
            settings,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high_score
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Record a raw input event for the next update step
    pub fn handle_event(&mut self, event: InputEvent) {
        self.input.handle(event);
    }

    pub fn resize(&mut self, surface: Surface) {
        log::debug!("{} resized to {}x{}", G::TITLE, surface.width, surface.height);
        self.game.resize(surface);
    }

    /// Drop pending input and timing, e.g. when the page loses focus
    pub fn suspend(&mut self) {
        self.input.reset();
        self.driver.reset();
    }

    /// Run one update step and persist a finished run
    pub fn step(&mut self) -> Vec<GameEvent> {
        let snapshot = self.input.drain();
        let events = self.game.tick(&snapshot);
        for event in &events {
            if let GameEvent::GameOver { score, .. } = *event {
                self.persist(score);
            }
        }
        events
    }

    /// Handle one display refresh at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64, assets: &dyn AssetProbe) -> Frame {
        let step = self.driver.advance(now_ms);
        if step.update {
            self.step();
        }

        let mut frame = self.game.render(assets);
        if self.settings.show_fps {
            frame.text(
                format!("{} FPS", self.driver.fps()),
                Vec2::new(frame.surface.width - 70.0, frame.surface.height - 10.0),
                12.0,
                TextAlign::Left,
                Color::WHITE.with_alpha(0.8),
            );
        }
        frame
    }

    fn persist(&mut self, score: u64) {
        match self.high_score.record(score, self.store.as_mut()) {
            Ok(true) => log::info!("{}: new record {}", G::TITLE, score),
            Ok(false) => {}
            Err(e) => log::warn!("{}: could not save high score: {}", G::TITLE, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{FlyToTheSky, GoHigh, RunAway};
    use crate::input::Key;
    use crate::persistence::{MemoryStore, StorageError};
    use crate::renderer::NoAssets;
    use crate::sim::GamePhase;

    /// Reads succeed, writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set_item(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "quota exceeded".into(),
            })
        }
    }

    fn run_away_session(store: MemoryStore) -> Session<RunAway> {
        Session::new(Surface::new(1000.0, 500.0), Box::new(store), Settings::default(), 7)
    }

    /// Start a run and drive it until it ends
    fn play_until_over<G: Game>(session: &mut Session<G>) {
        session.handle_event(InputEvent::KeyDown(Key::Enter));
        session.handle_event(InputEvent::KeyDown(Key::Space));
        session.step();
        session.handle_event(InputEvent::KeyUp(Key::Enter));
        session.handle_event(InputEvent::KeyUp(Key::Space));
        assert_eq!(session.game().phase(), GamePhase::Playing);
        for _ in 0..100_000 {
            session.step();
            if session.game().phase() == GamePhase::GameOver {
                return;
            }
        }
        panic!("run never ended");
    }

    #[test]
    fn test_loads_stored_high_score() {
        let session = run_away_session(MemoryStore::with_item("runawayHighScore", "250"));
        assert_eq!(session.high_score().best(), 250);
        assert_eq!(session.game().high_score(), 250);
    }

    #[test]
    fn test_game_over_persists_record() {
        let mut session = run_away_session(MemoryStore::new());
        play_until_over(&mut session);
        let score = session.game().score();
        assert!(score > 0);
        assert_eq!(session.high_score().best(), score);
        assert_eq!(
            session.store().get_item("runawayHighScore").ok().flatten(),
            Some(score.to_string())
        );
    }

    #[test]
    fn test_lower_score_not_written() {
        let mut session = run_away_session(MemoryStore::with_item("runawayHighScore", "999999"));
        play_until_over(&mut session);
        assert_eq!(
            session.store().get_item("runawayHighScore").ok().flatten().as_deref(),
            Some("999999")
        );
        assert_eq!(HighScore::load(session.store(), "runawayHighScore").best(), 999_999);
    }

    #[test]
    fn test_write_failure_is_not_fatal() {
        let mut session: Session<RunAway> =
            Session::new(Surface::new(1000.0, 500.0), Box::new(ReadOnlyStore), Settings::default(), 7);
        play_until_over(&mut session);
        assert_eq!(session.high_score().best(), session.game().score());
    }

    #[test]
    fn test_stalled_frame_skips_update_but_renders() {
        let mut session = run_away_session(MemoryStore::new());
        session.frame(0.0, &NoAssets);
        session.handle_event(InputEvent::KeyDown(Key::Space));

        // Stalled refresh: input is held for the next update
        let frame = session.frame(500.0, &NoAssets);
        assert!(!frame.commands.is_empty());
        assert_eq!(session.game().phase(), GamePhase::Idle);

        session.frame(516.0, &NoAssets);
        assert_eq!(session.game().phase(), GamePhase::Playing);
    }

    #[test]
    fn test_settings_flow_into_games() {
        let settings = Settings {
            particles: false,
            flicker: false,
            ..Default::default()
        };
        let go_high: Session<GoHigh> =
            Session::new(Surface::new(500.0, 700.0), Box::new(MemoryStore::new()), settings.clone(), 1);
        assert!(!go_high.game().state.particles_enabled);
        let fly: Session<FlyToTheSky> =
            Session::new(Surface::new(800.0, 400.0), Box::new(MemoryStore::new()), settings, 1);
        assert!(!fly.game().state.flicker);
    }

    #[test]
    fn test_fps_overlay() {
        let settings = Settings {
            show_fps: true,
            ..Default::default()
        };
        let mut session: Session<RunAway> =
            Session::new(Surface::new(1000.0, 500.0), Box::new(MemoryStore::new()), settings, 1);
        let frame = session.frame(0.0, &NoAssets);
        assert!(frame.has_text("FPS"));
    }
}

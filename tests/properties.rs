use arcade_hub::games::fly_to_the_sky::state::{BOOST_TICKS, MAX_HP, MAX_ITEMS, START_HP};
use arcade_hub::games::go_high::state::{ASTEROID_PRUNE_MARGIN, POWER_UP_PRUNE_MARGIN};
use arcade_hub::games::{FlyToTheSky, GoHigh, RunAway};
use arcade_hub::highscores::HighScore;
use arcade_hub::input::{InputEvent, InputSampler, InputSnapshot, Key};
use arcade_hub::persistence::{KeyValueStore, MemoryStore};
use arcade_hub::platform::LoopDriver;
use arcade_hub::renderer::NoAssets;
use arcade_hub::sim::{Game, GameEvent, GamePhase};
use arcade_hub::{Session, Settings};

use proptest::prelude::*;

/// Decode one byte of fuzz input into a tick's worth of signals
fn snapshot(bits: u8) -> InputSnapshot {
    let held: Vec<Key> = Key::ALL
        .iter()
        .enumerate()
        .filter(|(i, _)| bits & (1 << i) != 0)
        .map(|(_, &k)| k)
        .collect();
    let mut snapshot = InputSnapshot::holding(&held);
    // Presses only on a quarter of the ticks so runs get going
    if bits % 4 == 0 {
        snapshot.pressed = held;
    }
    snapshot
}

fn start<G: Game>(seed: u64) -> G {
    let mut game = G::new(G::fit_surface(1000.0, 800.0), 0, seed);
    game.tick(&InputSnapshot::pressing(Key::Space));
    assert_eq!(game.phase(), GamePhase::Playing, "{} did not start", G::TITLE);
    game
}

/// Score never drops within a run
fn check_monotonic<G: Game>(seed: u64, inputs: &[u8]) -> Result<(), TestCaseError> {
    let mut game = start::<G>(seed);
    let mut prev = game.score();
    for &bits in inputs {
        let events = game.tick(&snapshot(bits));
        if events.contains(&GameEvent::Started) {
            prev = 0;
        }
        prop_assert!(game.score() >= prev, "{} score dropped {} -> {}", G::TITLE, prev, game.score());
        prev = game.score();
    }
    Ok(())
}

proptest! {
    #[test]
    fn run_away_score_is_monotonic(seed in any::<u64>(), inputs in prop::collection::vec(any::<u8>(), 1..600)) {
        check_monotonic::<RunAway>(seed, &inputs)?;
    }

    #[test]
    fn fly_score_is_monotonic(seed in any::<u64>(), inputs in prop::collection::vec(any::<u8>(), 1..600)) {
        check_monotonic::<FlyToTheSky>(seed, &inputs)?;
    }

    #[test]
    fn go_high_score_is_monotonic(seed in any::<u64>(), inputs in prop::collection::vec(any::<u8>(), 1..600)) {
        check_monotonic::<GoHigh>(seed, &inputs)?;
    }

    #[test]
    fn run_away_obstacles_stay_bounded(seed in any::<u64>(), inputs in prop::collection::vec(any::<u8>(), 1..800)) {
        let mut game = start::<RunAway>(seed);
        for &bits in &inputs {
            game.tick(&snapshot(bits));
            let state = &game.state;
            prop_assert!(state.obstacles.len() <= 3);
            prop_assert!(state.obstacles.iter().all(|o| o.x + o.width >= 0.0));
            prop_assert!(state.player.y <= state.ground_y());
        }
    }

    #[test]
    fn fly_hp_stays_in_range(seed in any::<u64>(), inputs in prop::collection::vec(any::<u8>(), 1..800)) {
        let mut game = start::<FlyToTheSky>(seed);
        for &bits in &inputs {
            let was_hit = game.state.player.is_hit && game.state.player.hit_timer < 30;
            let hp_before = game.state.hp;
            let playing = game.phase() == GamePhase::Playing;
            let events = game.tick(&snapshot(bits));

            prop_assert!(game.state.hp <= MAX_HP);
            if events.contains(&GameEvent::Started) {
                prop_assert_eq!(game.state.hp, START_HP);
            } else if playing && was_hit {
                // Nothing lands while invulnerable, heals included
                prop_assert_eq!(game.state.hp, hp_before);
            }
            if game.phase() == GamePhase::GameOver {
                prop_assert_eq!(game.state.hp, 0);
            }
        }
    }

    #[test]
    fn fly_entities_pruned(seed in any::<u64>(), inputs in prop::collection::vec(any::<u8>(), 1..800)) {
        let mut game = start::<FlyToTheSky>(seed);
        for &bits in &inputs {
            game.tick(&snapshot(bits));
            let state = &game.state;
            let d = state.distance;
            prop_assert!(state.pillars.iter().all(|p| p.x - d + p.width >= 0.0));
            prop_assert!(state.items.iter().all(|i| i.x - d + i.width >= 0.0));
            prop_assert!(state.items.len() <= MAX_ITEMS);
        }
    }

    #[test]
    fn fly_boosts_expire_symmetrically(
        seed in any::<u64>(),
        pickups in prop::collection::vec(0u32..400, 1..6),
    ) {
        let mut game = start::<FlyToTheSky>(seed);
        let base = game.state.speed;
        let last = pickups.iter().copied().max().unwrap_or(0);
        for t in 0..=last + BOOST_TICKS {
            game.state.pillars.clear();
            game.state.items.clear();
            for _ in pickups.iter().filter(|&&p| p == t) {
                game.state.boosts.push(BOOST_TICKS);
            }
            game.tick(&InputSnapshot::default());
            prop_assert!(game.state.world_speed() >= base);
        }
        prop_assert!(!game.state.speed_boosted());
        prop_assert_eq!(game.state.world_speed(), base);
    }

    #[test]
    fn go_high_entities_pruned(seed in any::<u64>(), inputs in prop::collection::vec(any::<u8>(), 1..800)) {
        let mut game = start::<GoHigh>(seed);
        for &bits in &inputs {
            game.tick(&snapshot(bits));
            let state = &game.state;
            let h = state.surface.height;
            prop_assert!(state.asteroids.iter().all(|a| a.pos.y <= h + ASTEROID_PRUNE_MARGIN));
            prop_assert!(state.power_ups.iter().all(|p| p.pos.y <= h + POWER_UP_PRUNE_MARGIN));
            prop_assert!(state.particles.iter().all(|p| p.life > 0));
            let half = state.craft.width / 2.0;
            prop_assert!(state.craft.x >= half && state.craft.x <= state.surface.width - half);
        }
    }

    #[test]
    fn high_score_is_max_of_runs(scores in prop::collection::vec(0u64..100_000, 1..20)) {
        let mut store = MemoryStore::new();
        let mut best = HighScore::load(&store, "runawayHighScore");
        for &score in &scores {
            best.record(score, &mut store).map_err(|e| TestCaseError::fail(e.to_string()))?;
        }
        let max = scores.iter().copied().max().unwrap_or(0);
        prop_assert_eq!(best.best(), max);
        let reloaded = HighScore::load(&store, "runawayHighScore");
        prop_assert_eq!(reloaded.best(), max);
        prop_assert_eq!(store.is_empty(), max == 0);
    }

    #[test]
    fn stalled_frames_never_update(gaps in prop::collection::vec(0.0f64..400.0, 1..100)) {
        let mut driver = LoopDriver::default();
        let mut now = 1000.0;
        driver.advance(now);
        for gap in gaps {
            let before = now;
            now += gap;
            let step = driver.advance(now);
            prop_assert_eq!(step.update, now - before < 160.0);
        }
    }

    #[test]
    fn sampler_presses_are_reported_once(keys in prop::collection::vec(0usize..8, 1..20)) {
        let mut sampler = InputSampler::new();
        for &k in &keys {
            sampler.handle(InputEvent::KeyDown(Key::ALL[k]));
        }
        let first = sampler.drain();
        let second = sampler.drain();
        for &k in &keys {
            prop_assert!(first.was_pressed(Key::ALL[k]));
            prop_assert!(second.is_held(Key::ALL[k]));
        }
        prop_assert!(second.pressed.is_empty());
    }
}

#[test]
fn session_keeps_best_across_runs() {
    let mut session: Session<RunAway> = Session::new(
        RunAway::fit_surface(1200.0, 800.0),
        Box::new(MemoryStore::new()),
        Settings::default(),
        99,
    );
    let mut scores = Vec::new();

    for _ in 0..3 {
        session.handle_event(InputEvent::KeyDown(Key::Space));
        session.handle_event(InputEvent::KeyUp(Key::Space));
        session.step();
        assert_eq!(session.game().phase(), GamePhase::Playing);
        loop {
            let events = session.step();
            if let Some(GameEvent::GameOver { score, .. }) = events.first().copied() {
                scores.push(score);
                break;
            }
        }
    }

    let max = scores.iter().copied().max().unwrap_or(0);
    assert_eq!(session.high_score().best(), max);
    assert_eq!(
        session.store().get_item("runawayHighScore").ok().flatten(),
        Some(max.to_string())
    );

    // Frames keep rendering after game over
    let frame = session.frame(0.0, &NoAssets);
    assert!(frame.has_text("Game Over"));
}

//! GoHigh update step

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::*;
use crate::consts::{BUTTON_HEIGHT, BUTTON_WIDTH};
use crate::input::{InputSnapshot, Key};
use crate::sim::{GameEvent, GamePhase, Rect, Surface, chance, circles_overlap, random_between};

/// Start/restart button on both overlays
pub fn overlay_button(surface: Surface) -> Rect {
    Rect::centered_button(surface, 40.0, BUTTON_WIDTH, BUTTON_HEIGHT)
}

/// Advance the world by one update step
pub fn tick(state: &mut GoHighState, input: &InputSnapshot) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase.accepts_start() {
        let start = input.was_pressed(Key::Enter)
            || input.was_pressed(Key::Space)
            || input.pointer_hits(&overlay_button(state.surface));
        if start {
            state.restart();
            events.push(GameEvent::Started);
        }
        return events;
    }

    steer(state, input);

    state.time_ticks += 1;
    let climb = state.effective_speed();
    state.score += climb;
    state.background_offset += climb;

    state.shield_ticks = state.shield_ticks.saturating_sub(1);
    state.boost_ticks = state.boost_ticks.saturating_sub(1);

    spawn(state);
    update_asteroids(state);
    update_power_ups(state);
    update_particles(state);

    if let Some(event) = detect_collisions(state) {
        events.push(event);
        return events;
    }

    while state.score >= state.next_checkpoint {
        state.speed += DIFFICULTY_STEP;
        state.next_checkpoint += DIFFICULTY_CHECKPOINT;
    }

    recycle_planets(state);

    events
}

fn steer(state: &mut GoHighState, input: &InputSnapshot) {
    let center_x = state.surface.center_x();
    let craft = &mut state.craft;

    if input.any_held(&[Key::Left, Key::A]) {
        craft.x -= CRAFT_STEP;
    }
    if input.any_held(&[Key::Right, Key::D]) {
        craft.x += CRAFT_STEP;
    }

    // Pointer input nudges toward the tapped half of the surface
    for click in &input.clicks {
        craft.x += if click.x < center_x { -CLICK_STEP } else { CLICK_STEP };
    }
    for (_, touch) in &input.touches {
        craft.x += if touch.x < center_x { -TOUCH_STEP } else { TOUCH_STEP };
    }

    craft.clamp_to(state.surface);
}

fn spawn(state: &mut GoHighState) {
    let surface = state.surface;

    let asteroid_chance = state.asteroid_chance();
    if chance(&mut state.rng, asteroid_chance) {
        let rng = &mut state.rng;
        let radius = random_between(rng, 15.0, 35.0);
        let asteroid = Asteroid {
            id: state.next_asteroid_id,
            pos: Vec2::new(random_between(rng, 0.0, surface.width), ASTEROID_SPAWN_Y),
            radius,
            speed: random_between(rng, 1.0, 3.0),
            rotation: random_between(rng, 0.0, TAU),
            spin: (rng.random::<f32>() - 0.5) * 0.05,
        };
        state.next_asteroid_id = state.next_asteroid_id.wrapping_add(1);
        state.asteroids.push(asteroid);
    }

    if chance(&mut state.rng, POWER_UP_CHANCE) {
        let kind = if state.rng.random_bool(0.5) {
            PowerUpKind::Shield
        } else {
            PowerUpKind::Boost
        };
        let x = random_between(&mut state.rng, 20.0, surface.width - 20.0);
        state.power_ups.push(PowerUp {
            pos: Vec2::new(x, POWER_UP_SPAWN_Y),
            kind,
            radius: POWER_UP_RADIUS,
            collected: false,
        });
    }
}

fn update_asteroids(state: &mut GoHighState) {
    for asteroid in &mut state.asteroids {
        asteroid.pos.y += asteroid.speed;
        asteroid.rotation += asteroid.spin;
    }
    let limit = state.surface.height + ASTEROID_PRUNE_MARGIN;
    state.asteroids.retain(|a| a.pos.y <= limit);
}

fn update_power_ups(state: &mut GoHighState) {
    // Last tick's pickups are swept before anything moves
    state.power_ups.retain(|p| !p.collected);
    for power_up in &mut state.power_ups {
        power_up.pos.y += POWER_UP_FALL;
    }
    let limit = state.surface.height + POWER_UP_PRUNE_MARGIN;
    state.power_ups.retain(|p| p.pos.y <= limit);

    let craft = state.craft.pos();
    let craft_radius = state.craft.radius();
    let mut picked = Vec::new();
    for power_up in &mut state.power_ups {
        if circles_overlap(power_up.pos, power_up.radius, craft, craft_radius) {
            power_up.collected = true;
            picked.push((power_up.kind, power_up.pos));
        }
    }

    for (kind, at) in picked {
        match kind {
            PowerUpKind::Shield => state.shield_ticks = SHIELD_TICKS,
            // A second pickup refreshes the countdown; the multiplier never stacks
            PowerUpKind::Boost => state.boost_ticks = BOOST_TICKS,
        }
        log::debug!("GoHigh: picked up {:?}", kind);
        state.burst(at, kind.color());
    }
}

fn update_particles(state: &mut GoHighState) {
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

fn detect_collisions(state: &mut GoHighState) -> Option<GameEvent> {
    let craft = state.craft.pos();
    let craft_radius = state.craft.radius();

    let hit = |a: &Asteroid| circles_overlap(a.pos, a.radius, craft, craft_radius);

    if state.shield_active() {
        let destroyed: Vec<Vec2> = state.asteroids.iter().filter(|&a| hit(a)).map(|a| a.pos).collect();
        if !destroyed.is_empty() {
            state.asteroids.retain(|a| !hit(a));
            for at in destroyed {
                state.burst(at, ASTEROID_COLOR);
            }
        }
        return None;
    }

    if !state.asteroids.iter().any(hit) {
        return None;
    }

    state.phase = GamePhase::GameOver;
    let altitude = state.altitude();
    state.new_record = altitude > state.high_score;
    if state.new_record {
        state.high_score = altitude;
    }
    state.burst(craft, CRAFT_COLOR);
    log::info!("GoHigh: game over, altitude {} (record: {})", altitude, state.new_record);

    Some(GameEvent::GameOver {
        score: altitude,
        new_record: state.new_record,
    })
}

fn recycle_planets(state: &mut GoHighState) {
    let surface = state.surface;
    let offset = state.background_offset;
    for i in 0..state.planets.len() {
        let planet = &state.planets[i];
        if planet.screen_y(offset) > surface.height + planet.radius * 2.0 {
            state.planets[i] = Planet::random(&mut state.rng, surface, offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TouchPhase;

    fn surface() -> Surface {
        Surface::new(SURFACE_MAX_WIDTH, SURFACE_MAX_HEIGHT)
    }

    fn playing() -> GoHighState {
        let mut state = GoHighState::new(surface(), 0, 11);
        tick(&mut state, &InputSnapshot::pressing(Key::Enter));
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    fn asteroid_on_craft(state: &GoHighState, id: u32) -> Asteroid {
        Asteroid {
            id,
            // Falls onto the craft during the tick
            pos: state.craft.pos() - Vec2::new(0.0, 1.0),
            radius: 20.0,
            speed: 1.0,
            rotation: 0.0,
            spin: 0.0,
        }
    }

    #[test]
    fn test_start_from_button() {
        let mut state = GoHighState::new(surface(), 0, 11);
        let events = tick(&mut state, &InputSnapshot::clicking(overlay_button(surface()).center()));
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_score_grows_by_speed() {
        let mut state = playing();
        state.asteroids.clear();
        tick(&mut state, &InputSnapshot::default());
        assert_eq!(state.score, BASE_SPEED);
        assert_eq!(state.background_offset, BASE_SPEED);
    }

    #[test]
    fn test_keys_steer_and_clamp() {
        let mut state = playing();
        let start = state.craft.x;
        state.asteroids.clear();
        tick(&mut state, &InputSnapshot::holding(&[Key::Left]));
        assert_eq!(state.craft.x, start - CRAFT_STEP);
        tick(&mut state, &InputSnapshot::holding(&[Key::D]));
        assert_eq!(state.craft.x, start);

        for _ in 0..200 {
            state.asteroids.clear();
            tick(&mut state, &InputSnapshot::holding(&[Key::A]));
        }
        assert_eq!(state.craft.x, CRAFT_WIDTH / 2.0);
    }

    #[test]
    fn test_pointer_steps() {
        let mut state = playing();
        let start = state.craft.x;
        state.asteroids.clear();
        tick(&mut state, &InputSnapshot::clicking(Vec2::new(10.0, 10.0)));
        assert_eq!(state.craft.x, start - CLICK_STEP);
        state.asteroids.clear();
        tick(&mut state, &InputSnapshot::touching(TouchPhase::Move, Vec2::new(490.0, 10.0)));
        assert_eq!(state.craft.x, start - CLICK_STEP + TOUCH_STEP);
    }

    #[test]
    fn test_asteroid_hit_ends_run() {
        let mut state = playing();
        state.score = 1234.7;
        state.asteroids = vec![asteroid_on_craft(&state, 0)];
        let events = tick(&mut state, &InputSnapshot::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                score: 1236,
                new_record: true
            }]
        );
        assert_eq!(state.high_score, 1236);
        assert_eq!(state.particles.len(), PARTICLES_PER_BURST);
    }

    #[test]
    fn test_shield_destroys_asteroid() {
        let mut state = playing();
        state.shield_ticks = SHIELD_TICKS;
        state.asteroids = vec![asteroid_on_craft(&state, 0)];
        let events = tick(&mut state, &InputSnapshot::default());
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.asteroids.iter().all(|a| a.id != 0));
        assert!(state.particles.len() >= PARTICLES_PER_BURST);
    }

    #[test]
    fn test_shield_expires() {
        let mut state = playing();
        state.shield_ticks = 2;
        state.asteroids.clear();
        tick(&mut state, &InputSnapshot::default());
        assert!(state.shield_active());
        state.asteroids.clear();
        tick(&mut state, &InputSnapshot::default());
        assert!(!state.shield_active());
    }

    #[test]
    fn test_boost_pickup_refreshes_without_stacking() {
        let mut state = playing();
        let boost_at = |state: &GoHighState| PowerUp {
            pos: state.craft.pos(),
            kind: PowerUpKind::Boost,
            radius: POWER_UP_RADIUS,
            collected: false,
        };

        state.asteroids.clear();
        state.power_ups = vec![boost_at(&state)];
        tick(&mut state, &InputSnapshot::default());
        assert_eq!(state.boost_ticks, BOOST_TICKS);
        assert_eq!(state.effective_speed(), BASE_SPEED * BOOST_MULTIPLIER);

        for _ in 0..100 {
            state.asteroids.clear();
            tick(&mut state, &InputSnapshot::default());
        }
        state.asteroids.clear();
        state.power_ups = vec![boost_at(&state)];
        tick(&mut state, &InputSnapshot::default());
        assert_eq!(state.boost_ticks, BOOST_TICKS);
        assert_eq!(state.effective_speed(), state.speed * BOOST_MULTIPLIER);

        for _ in 0..BOOST_TICKS {
            state.asteroids.clear();
            state.power_ups.clear();
            tick(&mut state, &InputSnapshot::default());
        }
        assert!(!state.boost_active());
        assert_eq!(state.effective_speed(), state.speed);
        assert!(state.speed >= BASE_SPEED);
    }

    #[test]
    fn test_collected_power_up_swept_next_tick() {
        let mut state = playing();
        state.asteroids.clear();
        state.power_ups = vec![PowerUp {
            pos: state.craft.pos(),
            kind: PowerUpKind::Shield,
            radius: POWER_UP_RADIUS,
            collected: false,
        }];
        tick(&mut state, &InputSnapshot::default());
        assert!(state.shield_active());
        assert!(state.power_ups.iter().any(|p| p.collected));
        state.asteroids.clear();
        tick(&mut state, &InputSnapshot::default());
        assert!(!state.power_ups.iter().any(|p| p.collected));
    }

    #[test]
    fn test_power_up_past_limit_pruned_same_tick() {
        let mut state = playing();
        state.asteroids.clear();
        let h = state.surface.height;
        state.power_ups = vec![PowerUp {
            pos: Vec2::new(20.0, h + POWER_UP_PRUNE_MARGIN),
            kind: PowerUpKind::Shield,
            radius: POWER_UP_RADIUS,
            collected: false,
        }];
        tick(&mut state, &InputSnapshot::default());
        assert!(state.power_ups.iter().all(|p| p.pos.y <= h + POWER_UP_PRUNE_MARGIN));
        assert!(!state.shield_active());
    }

    #[test]
    fn test_difficulty_checkpoint() {
        let mut state = playing();
        state.asteroids.clear();
        state.score = DIFFICULTY_CHECKPOINT - 1.0;
        tick(&mut state, &InputSnapshot::default());
        assert!((state.speed - (BASE_SPEED + DIFFICULTY_STEP)).abs() < 1e-6);
        assert_eq!(state.next_checkpoint, 2.0 * DIFFICULTY_CHECKPOINT);
    }

    #[test]
    fn test_entities_pruned_below_surface() {
        let mut state = playing();
        for _ in 0..3000 {
            // Keep the lane above the craft clear so the run survives
            let craft = state.craft.pos();
            state.asteroids.retain(|a| (a.pos.x - craft.x).abs() > 80.0);
            tick(&mut state, &InputSnapshot::default());
            let h = state.surface.height;
            assert!(state.asteroids.iter().all(|a| a.pos.y <= h + ASTEROID_PRUNE_MARGIN));
            assert!(state.power_ups.iter().all(|p| p.pos.y <= h + POWER_UP_PRUNE_MARGIN));
            assert!(state.particles.iter().all(|p| p.life > 0));
        }
        assert_eq!(state.phase, GamePhase::Playing);
        let h = state.surface.height;
        assert!(
            state
                .planets
                .iter()
                .all(|p| p.screen_y(state.background_offset) <= h + p.radius * 2.0)
        );
    }
}

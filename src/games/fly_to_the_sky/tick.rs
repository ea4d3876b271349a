//! FlyToTheSky update step

use rand::Rng;

use super::state::*;
use crate::consts::{BUTTON_HEIGHT, BUTTON_WIDTH};
use crate::input::{InputSnapshot, Key};
use crate::sim::{GameEvent, GamePhase, Rect, Surface, chance, random_between};

/// Start/restart button on both overlays
pub fn overlay_button(surface: Surface) -> Rect {
    Rect::centered_button(surface, 40.0, BUTTON_WIDTH, BUTTON_HEIGHT)
}

/// Advance the world by one update step
pub fn tick(state: &mut FlyState, input: &InputSnapshot) -> Vec<GameEvent> {
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

    state.time_ticks += 1;

    update_player(state, input);
    update_pillars(state);
    update_items(state);
    update_boosts(state);

    if let Some(event) = detect_collisions(state) {
        events.push(event);
        return events;
    }

    state.distance += state.world_speed();
    prune_off_screen(state);
    update_difficulty(state);

    events
}

fn update_player(state: &mut FlyState, input: &InputSnapshot) {
    let player = &mut state.player;
    player.velocity_y = if input.is_held(Key::Up) {
        -PLAYER_STEP
    } else if input.is_held(Key::Down) {
        PLAYER_STEP
    } else {
        0.0
    };
    player.y += player.velocity_y;

    let max_y = (state.surface.height - player.height).max(0.0);
    player.y = player.y.clamp(0.0, max_y);

    player.update_hit_timer();
}

fn update_pillars(state: &mut FlyState) {
    let surface = state.surface;
    let due = match state.last_obstacle_x {
        None => true,
        Some(last_x) => surface.width - (last_x - state.distance) > OBSTACLE_INTERVAL,
    };
    if due {
        let (top_height, bottom_height) = pillar_heights(&mut state.rng, surface.height);
        let x = surface.width + state.distance;
        state.pillars.push(Pillar {
            x,
            top_height,
            bottom_height,
            width: PILLAR_WIDTH,
            passed: false,
        });
        state.last_obstacle_x = Some(x);
    }

    // Score each pillar once, as its trailing edge clears the plane
    let distance = state.distance;
    let player_x = state.player.x;
    for pillar in &mut state.pillars {
        if !pillar.passed && pillar.screen_x(distance) + pillar.width < player_x {
            pillar.passed = true;
            state.score += PASS_SCORE;
        }
    }
}

/// Top and bottom pillar heights around a fixed gap, kept non-negative on small surfaces
pub fn pillar_heights(rng: &mut impl Rng, surface_height: f32) -> (f32, f32) {
    let max_top = surface_height - PILLAR_GAP - MIN_PILLAR_HEIGHT;
    let top = if max_top > MIN_PILLAR_HEIGHT {
        (rng.random::<f32>() * (max_top - MIN_PILLAR_HEIGHT)).floor() + MIN_PILLAR_HEIGHT
    } else {
        MIN_PILLAR_HEIGHT.min(surface_height)
    };
    let bottom = (surface_height - top - PILLAR_GAP).max(0.0);
    (top, bottom)
}

fn update_items(state: &mut FlyState) {
    if state.items.len() < MAX_ITEMS && chance(&mut state.rng, ITEM_CHANCE) {
        let kind = if state.rng.random_bool(0.5) {
            ItemKind::Heal
        } else {
            ItemKind::Speed
        };
        let y = random_between(&mut state.rng, 0.0, state.surface.height - 40.0);
        state.items.push(Item {
            x: state.surface.width + state.distance,
            y,
            kind,
            width: ITEM_SIZE,
            height: ITEM_SIZE,
            collected: false,
        });
    }

    state.items.retain(|i| !i.collected);
}

/// Drop pillars and items whose trailing edge has scrolled past the left edge
fn prune_off_screen(state: &mut FlyState) {
    let distance = state.distance;
    state.pillars.retain(|p| !p.is_off_screen(distance));
    state.items.retain(|i| !i.is_off_screen(distance));
}

fn update_boosts(state: &mut FlyState) {
    for remaining in &mut state.boosts {
        *remaining = remaining.saturating_sub(1);
    }
    state.boosts.retain(|&r| r > 0);
}

fn detect_collisions(state: &mut FlyState) -> Option<GameEvent> {
    // Nothing registers while invulnerable, pickups included
    if state.player.is_hit {
        return None;
    }

    let player = state.player.rect();
    let distance = state.distance;
    let surface = state.surface;

    for item in &mut state.items {
        if item.collected || !player.overlaps(&item.rect(distance)) {
            continue;
        }
        item.collected = true;
        match item.kind {
            ItemKind::Heal => state.hp = (state.hp + 1).min(MAX_HP),
            ItemKind::Speed => state.boosts.push(BOOST_TICKS),
        }
    }

    let hit = state.pillars.iter().any(|p| {
        player.overlaps(&p.top_rect(distance)) || player.overlaps(&p.bottom_rect(distance, surface))
    });
    if !hit {
        return None;
    }

    state.player.is_hit = true;
    state.player.hit_timer = 0;
    state.hp = state.hp.saturating_sub(1);
    log::debug!("FlyToTheSky: hit, {} hp left", state.hp);

    if state.hp == 0 {
        return Some(game_over(state));
    }
    None
}

fn update_difficulty(state: &mut FlyState) {
    // Each 100-point checkpoint raises the speed exactly once
    while state.score >= state.next_speed_checkpoint {
        state.speed += SPEED_STEP;
        state.next_speed_checkpoint += SPEED_CHECKPOINT;
    }
}

fn game_over(state: &mut FlyState) -> GameEvent {
    state.phase = GamePhase::GameOver;
    state.new_record = state.score > state.high_score;
    if state.new_record {
        state.high_score = state.score;
    }
    log::info!("FlyToTheSky: game over, score {} (record: {})", state.score, state.new_record);
    GameEvent::GameOver {
        score: state.score,
        new_record: state.new_record,
    }
}

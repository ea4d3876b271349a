//! RunAway update step

use super::state::*;
use crate::consts::{BUTTON_HEIGHT, BUTTON_WIDTH};
use crate::input::{InputSnapshot, Key, TouchPhase};
use crate::sim::{GameEvent, GamePhase, Rect, Surface, chance, random_between};

/// Start button on the idle overlay
pub fn start_button(surface: Surface) -> Rect {
    Rect::centered_button(surface, 60.0, BUTTON_WIDTH, BUTTON_HEIGHT)
}

/// Restart button on the game-over overlay
pub fn restart_button(surface: Surface) -> Rect {
    Rect::centered_button(surface, 40.0, BUTTON_WIDTH, BUTTON_HEIGHT)
}

/// Advance the world by one update step
pub fn tick(state: &mut RunAwayState, input: &InputSnapshot) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Idle | GamePhase::GameOver => {
            let button = match state.phase {
                GamePhase::Idle => start_button(state.surface),
                _ => restart_button(state.surface),
            };
            if input.was_pressed(Key::Space) || input.pointer_hits(&button) {
                state.restart();
                events.push(GameEvent::Started);
            }
            return events;
        }
        GamePhase::Playing => {}
    }

    // Any click, tap or Space press while running is a jump
    let jump = input.was_pressed(Key::Space)
        || !input.clicks.is_empty()
        || input.touches.iter().any(|&(phase, _)| phase == TouchPhase::Start);
    if jump {
        state.player.jump();
    }

    state.time_ticks += 1;
    state.score += 1;
    if state.score % SPEED_STEP_INTERVAL == 0 {
        state.speed += SPEED_STEP;
    }

    let ground_y = state.ground_y();
    state.player.integrate(ground_y);

    // Scroll and prune obstacles
    let speed = state.speed;
    for obstacle in &mut state.obstacles {
        obstacle.x -= speed;
    }
    state.obstacles.retain(|o| !o.is_off_screen());

    spawn_obstacle(state);
    scroll_scenery(state);

    // Terminal collision
    let player = state.player.rect();
    let surface = state.surface;
    if state.obstacles.iter().any(|o| player.overlaps(&o.rect(surface))) {
        events.push(game_over(state));
    }

    events
}

fn spawn_obstacle(state: &mut RunAwayState) {
    if state.obstacles.len() >= MAX_OBSTACLES {
        return;
    }
    let gap_ok = state
        .obstacles
        .last()
        .map(|last| state.surface.width - last.x > state.min_obstacle_gap())
        .unwrap_or(true);
    if !gap_ok {
        return;
    }
    let p = state.obstacle_chance();
    if !chance(&mut state.rng, p) {
        return;
    }

    // Taller obstacles as the score grows
    let extra = (state.score as f32 / 1000.0 * 10.0).min(50.0);
    let max_height = state.surface.height - GROUND_HEIGHT;
    let height = random_between(&mut state.rng, 30.0, 100.0 + extra).min(max_height);
    let width = random_between(&mut state.rng, 20.0, 50.0);
    state.obstacles.push(Obstacle {
        x: state.surface.width,
        width,
        height,
    });
}

fn scroll_scenery(state: &mut RunAwayState) {
    let building_step = state.speed * BUILDING_PARALLAX;
    for i in 0..state.buildings.len() {
        state.buildings[i].x -= building_step;
        if state.buildings[i].right() < 0.0 {
            // Recycle behind the rightmost building
            let max_x = state.buildings.iter().map(|b| b.right()).fold(0.0, f32::max);
            state.buildings[i] = Building::random(&mut state.rng, max_x);
        }
    }

    let cloud_step = state.speed * CLOUD_PARALLAX;
    let width = state.surface.width;
    for cloud in &mut state.clouds {
        cloud.x -= cloud_step;
        if cloud.x + cloud.radius < 0.0 {
            cloud.x = width + cloud.radius;
            cloud.y = random_between(&mut state.rng, 50.0, 150.0);
        }
    }
}

fn game_over(state: &mut RunAwayState) -> GameEvent {
    state.phase = GamePhase::GameOver;
    state.new_record = state.score > state.high_score;
    if state.new_record {
        state.high_score = state.score;
    }
    log::info!("RunAway: game over, score {} (record: {})", state.score, state.new_record);
    GameEvent::GameOver {
        score: state.score,
        new_record: state.new_record,
    }
}

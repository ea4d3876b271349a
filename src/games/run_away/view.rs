//! RunAway render step

use glam::Vec2;

use super::state::*;
use super::tick::{restart_button, start_button};
use crate::renderer::{Color, DrawCommand, Frame, TextAlign};
use crate::sim::{GamePhase, Rect};

const SKY_TOP: Color = Color::hex(0x87CEEB);
const SKY_BOTTOM: Color = Color::hex(0x1E90FF);
const GROUND: Color = Color::hex(0x4CAF50);
const PLAYER: Color = Color::hex(0xff4d4d);
const OBSTACLE: Color = Color::hex(0x8B4513);
const OBSTACLE_GRAIN: Color = Color::hex(0x6B2F0D);
const RECORD: Color = Color::hex(0xFFD700);

const WINDOW_SIZE: f32 = 10.0;
const WINDOW_GAP: f32 = 15.0;

pub fn render(state: &RunAwayState) -> Frame {
    let mut frame = Frame::new(state.surface);
    let surface = state.surface;

    frame.push(DrawCommand::VerticalGradient {
        top: SKY_TOP,
        bottom: SKY_BOTTOM,
    });

    for cloud in &state.clouds {
        let r = cloud.radius;
        let c = Vec2::new(cloud.x, cloud.y);
        frame.circle(c, r, Color::WHITE);
        frame.circle(c + Vec2::new(r * 0.5, -r * 0.2), r * 0.7, Color::WHITE);
        frame.circle(c + Vec2::new(-r * 0.5, 0.0), r * 0.6, Color::WHITE);
    }

    for building in &state.buildings {
        draw_building(&mut frame, building, surface.height);
    }

    frame.rect(
        Rect::new(0.0, surface.height - GROUND_HEIGHT, surface.width, GROUND_HEIGHT),
        GROUND,
    );

    draw_player(&mut frame, &state.player);

    for obstacle in &state.obstacles {
        let rect = obstacle.rect(surface);
        frame.round_rect(rect, 5.0, OBSTACLE);
        let mut segments = Vec::new();
        let mut y = rect.top() + 10.0;
        while y < rect.bottom() {
            segments.push((Vec2::new(rect.left(), y), Vec2::new(rect.right(), y)));
            y += 15.0;
        }
        if !segments.is_empty() {
            frame.push(DrawCommand::StrokeLines {
                segments,
                width: 2.0,
                color: OBSTACLE_GRAIN,
            });
        }
    }

    // HUD
    frame.text(format!("Score: {}", state.score), Vec2::new(20.0, 30.0), 20.0, TextAlign::Left, Color::WHITE);
    frame.text(format!("Best: {}", state.high_score), Vec2::new(20.0, 60.0), 20.0, TextAlign::Left, Color::WHITE);

    match state.phase {
        GamePhase::Idle => draw_start_overlay(&mut frame, state),
        GamePhase::GameOver => draw_game_over_overlay(&mut frame, state),
        GamePhase::Playing => {}
    }

    frame
}

fn draw_building(frame: &mut Frame, building: &Building, surface_height: f32) {
    let top = surface_height - building.height;
    frame.rect(Rect::new(building.x, top, building.width, building.height), building.color);

    let window = Color::WHITE.with_alpha(0.3);
    let mut y = top + 20.0;
    while y < surface_height - 20.0 {
        let mut x = building.x + 15.0;
        while x < building.right() - 15.0 {
            frame.rect(Rect::new(x, y, WINDOW_SIZE, WINDOW_SIZE), window);
            x += WINDOW_GAP;
        }
        y += WINDOW_GAP;
    }
}

fn draw_player(frame: &mut Frame, player: &Player) {
    frame.round_rect(player.rect(), 5.0, PLAYER);
    for dx in [10.0, 20.0] {
        let eye = Vec2::new(player.x + player.width - dx, player.y + 10.0);
        frame.circle(eye, 4.0, Color::WHITE);
        frame.circle(eye, 2.0, Color::BLACK);
    }
}

fn draw_start_overlay(frame: &mut Frame, state: &RunAwayState) {
    let surface = state.surface;
    let cx = surface.center_x();
    let cy = surface.center_y();
    frame.dim();
    frame.text("RunAway", Vec2::new(cx, cy - 60.0), 36.0, TextAlign::Center, Color::WHITE);
    frame.text(
        "Click or press Space to jump!",
        Vec2::new(cx, cy),
        16.0,
        TextAlign::Center,
        Color::WHITE,
    );
    if state.high_score > 0 {
        frame.text(
            format!("Best: {}", state.high_score),
            Vec2::new(cx, cy + 30.0),
            16.0,
            TextAlign::Center,
            Color::WHITE,
        );
    }
    let button = start_button(surface);
    frame.round_rect(button, 8.0, Color::BLACK);
    frame.text("Start", Vec2::new(cx, button.y + 25.0), 18.0, TextAlign::Center, Color::WHITE);
}

fn draw_game_over_overlay(frame: &mut Frame, state: &RunAwayState) {
    let surface = state.surface;
    let cx = surface.center_x();
    let cy = surface.center_y();
    frame.dim();
    frame.text("Game Over", Vec2::new(cx, cy - 60.0), 30.0, TextAlign::Center, Color::WHITE);
    frame.text(
        format!("Score: {}", state.score),
        Vec2::new(cx, cy - 20.0),
        20.0,
        TextAlign::Center,
        Color::WHITE,
    );
    if state.new_record {
        frame.text("New record!", Vec2::new(cx, cy + 10.0), 24.0, TextAlign::Center, RECORD);
    } else {
        frame.text(
            format!("Best: {}", state.high_score),
            Vec2::new(cx, cy + 10.0),
            20.0,
            TextAlign::Center,
            Color::WHITE,
        );
    }
    let button = restart_button(surface);
    frame.round_rect(button, 8.0, Color::BLACK);
    frame.text("Restart", Vec2::new(cx, button.y + 25.0), 16.0, TextAlign::Center, Color::WHITE);
    frame.text(
        "Press Space to restart",
        Vec2::new(cx, cy + 100.0),
        14.0,
        TextAlign::Center,
        Color::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Surface;

    #[test]
    fn test_idle_overlay_content() {
        let state = RunAwayState::new(Surface::new(1000.0, SURFACE_HEIGHT), 0, 3);
        let frame = render(&state);
        assert!(frame.has_text("RunAway"));
        assert!(frame.has_text("Start"));
        // No best score line on the idle overlay before any record exists
        assert_eq!(frame.texts().iter().filter(|t| t.starts_with("Best")).count(), 1);
    }

    #[test]
    fn test_game_over_shows_record() {
        let mut state = RunAwayState::new(Surface::new(1000.0, SURFACE_HEIGHT), 0, 3);
        state.phase = GamePhase::GameOver;
        state.score = 321;
        state.high_score = 321;
        state.new_record = true;
        let frame = render(&state);
        assert!(frame.has_text("Game Over"));
        assert!(frame.has_text("Score: 321"));
        assert!(frame.has_text("New record!"));
    }

    #[test]
    fn test_game_over_without_record_shows_best() {
        let mut state = RunAwayState::new(Surface::new(1000.0, SURFACE_HEIGHT), 900, 3);
        state.phase = GamePhase::GameOver;
        state.score = 10;
        let frame = render(&state);
        assert!(!frame.has_text("New record!"));
        assert!(frame.has_text("Best: 900"));
    }

    #[test]
    fn test_playing_has_hud_only() {
        let mut state = RunAwayState::new(Surface::new(1000.0, SURFACE_HEIGHT), 0, 3);
        state.phase = GamePhase::Playing;
        state.score = 5;
        let frame = render(&state);
        assert_eq!(frame.texts(), vec!["Score: 5", "Best: 0"]);
    }
}

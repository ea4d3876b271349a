//! FlyToTheSky render step

use glam::Vec2;

use super::state::*;
use super::tick::overlay_button;
use crate::renderer::shapes;
use crate::renderer::{Color, DrawCommand, Frame, TextAlign};
use crate::sim::{GamePhase, Rect};

const SKY_TOP: Color = Color::hex(0x87CEEB);
const SKY_BOTTOM: Color = Color::hex(0xE0F7FF);
const PLANE: Color = Color::hex(0x3B82F6);
const PLANE_WING: Color = Color::hex(0x1D4ED8);
const FLAME: Color = Color::hex(0xF97316);
const PILLAR: Color = Color::hex(0x16A34A);
const PILLAR_CAP: Color = Color::hex(0x15803D);
const HEART: Color = Color::hex(0xEF4444);
const HEART_EMPTY: Color = Color::hex(0x9CA3AF);
const BOLT: Color = Color::hex(0xFACC15);
const HUD: Color = Color::hex(0x1F2937);
const RECORD: Color = Color::hex(0xFFD700);

/// (x, y, radius, parallax)
const CLOUDS: [(f32, f32, f32, f32); 3] = [
    (100.0, 50.0, 30.0, 0.1),
    (300.0, 80.0, 40.0, 0.05),
    (600.0, 60.0, 35.0, 0.08),
];
const CLOUD_MARGIN: f32 = 80.0;

const CAP_HEIGHT: f32 = 12.0;
const CAP_OVERHANG: f32 = 5.0;

/// Whether the plane is drawn this tick
pub fn player_visible(state: &FlyState) -> bool {
    !(state.flicker && state.player.is_hit && state.player.hit_timer % 6 < 3)
}

pub fn render(state: &FlyState) -> Frame {
    let mut frame = Frame::new(state.surface);
    let surface = state.surface;

    frame.push(DrawCommand::VerticalGradient {
        top: SKY_TOP,
        bottom: SKY_BOTTOM,
    });

    for (x, y, r, parallax) in CLOUDS {
        let span = surface.width + 2.0 * CLOUD_MARGIN;
        let cx = (x - state.distance * parallax + CLOUD_MARGIN).rem_euclid(span) - CLOUD_MARGIN;
        let c = Vec2::new(cx, y);
        let white = Color::WHITE.with_alpha(0.8);
        frame.circle(c, r, white);
        frame.circle(c + Vec2::new(r * 0.6, 5.0), r * 0.8, white);
        frame.circle(c - Vec2::new(r * 0.6, -5.0), r * 0.7, white);
    }

    for pillar in &state.pillars {
        draw_pillar(&mut frame, pillar, state);
    }

    for item in state.items.iter().filter(|i| !i.collected) {
        let center = item.rect(state.distance).center();
        match item.kind {
            ItemKind::Heal => frame.polygon(shapes::heart(center, item.width), HEART),
            ItemKind::Speed => frame.polygon(shapes::lightning(center, item.height / 2.0), BOLT),
        }
    }

    if player_visible(state) {
        draw_plane(&mut frame, state);
    }

    draw_hud(&mut frame, state);

    match state.phase {
        GamePhase::Idle => draw_start_overlay(&mut frame, state),
        GamePhase::GameOver => draw_game_over_overlay(&mut frame, state),
        GamePhase::Playing => {}
    }

    frame
}

fn draw_pillar(frame: &mut Frame, pillar: &Pillar, state: &FlyState) {
    let top = pillar.top_rect(state.distance);
    let bottom = pillar.bottom_rect(state.distance, state.surface);
    frame.rect(top, PILLAR);
    frame.rect(bottom, PILLAR);

    let cap_w = pillar.width + 2.0 * CAP_OVERHANG;
    if top.h > 0.0 {
        frame.rect(Rect::new(top.x - CAP_OVERHANG, top.bottom() - CAP_HEIGHT, cap_w, CAP_HEIGHT), PILLAR_CAP);
    }
    if bottom.h > 0.0 {
        frame.rect(Rect::new(bottom.x - CAP_OVERHANG, bottom.top(), cap_w, CAP_HEIGHT), PILLAR_CAP);
    }
}

fn draw_plane(frame: &mut Frame, state: &FlyState) {
    let p = &state.player;
    if state.speed_boosted() {
        let mid = p.y + p.height / 2.0;
        frame.polygon(
            vec![
                Vec2::new(p.x, mid - 6.0),
                Vec2::new(p.x - 20.0, mid),
                Vec2::new(p.x, mid + 6.0),
            ],
            FLAME,
        );
    }
    frame.polygon(shapes::plane_body(p.x, p.y, p.width, p.height), PLANE);
    frame.polygon(
        vec![
            Vec2::new(p.x + p.width * 0.3, p.y + p.height / 2.0),
            Vec2::new(p.x + p.width * 0.5, p.y + p.height / 2.0),
            Vec2::new(p.x + p.width * 0.35, p.y + p.height + 6.0),
        ],
        PLANE_WING,
    );
}

fn draw_hud(frame: &mut Frame, state: &FlyState) {
    frame.text(format!("Score: {}", state.score), Vec2::new(10.0, 25.0), 18.0, TextAlign::Left, HUD);
    frame.text(format!("Best: {}", state.high_score), Vec2::new(10.0, 48.0), 16.0, TextAlign::Left, HUD);

    for slot in 0..MAX_HP {
        let center = Vec2::new(state.surface.width - 20.0 - f32::from(slot) * 26.0, 22.0);
        // Filled hearts fill from the right
        let color = if MAX_HP - slot <= state.hp { HEART } else { HEART_EMPTY };
        frame.polygon(shapes::heart(center, 20.0), color);
    }

    frame.text(
        format!("Speed: {:.1}", state.world_speed()),
        Vec2::new(10.0, 70.0),
        14.0,
        TextAlign::Left,
        HUD,
    );
    if state.speed_boosted() {
        frame.text("Speed boost!", Vec2::new(10.0, 90.0), 14.0, TextAlign::Left, FLAME);
    }
}

fn draw_button(frame: &mut Frame, state: &FlyState, label: &str) {
    let button = overlay_button(state.surface);
    frame.round_rect(button, 8.0, PLANE);
    frame.text(label, Vec2::new(button.center().x, button.y + 26.0), 18.0, TextAlign::Center, Color::WHITE);
}

fn draw_start_overlay(frame: &mut Frame, state: &FlyState) {
    let cx = state.surface.center_x();
    let cy = state.surface.center_y();
    frame.dim();
    frame.text("FlyToTheSky", Vec2::new(cx, cy - 90.0), 32.0, TextAlign::Center, Color::WHITE);
    frame.text(
        "Use the Up/Down arrow keys to fly",
        Vec2::new(cx, cy - 50.0),
        16.0,
        TextAlign::Center,
        Color::WHITE,
    );
    frame.text(
        "Dodge the pillars and collect items to survive!",
        Vec2::new(cx, cy - 25.0),
        16.0,
        TextAlign::Center,
        Color::WHITE,
    );

    frame.polygon(shapes::heart(Vec2::new(cx - 90.0, cy + 6.0), 18.0), HEART);
    frame.text("Heal", Vec2::new(cx - 75.0, cy + 12.0), 14.0, TextAlign::Left, Color::WHITE);
    frame.polygon(shapes::lightning(Vec2::new(cx + 5.0, cy + 6.0), 9.0), BOLT);
    frame.text("Speed boost", Vec2::new(cx + 18.0, cy + 12.0), 14.0, TextAlign::Left, Color::WHITE);

    draw_button(frame, state, "Start");
}

fn draw_game_over_overlay(frame: &mut Frame, state: &FlyState) {
    let cx = state.surface.center_x();
    let cy = state.surface.center_y();
    frame.dim();
    frame.text("Game over!", Vec2::new(cx, cy - 60.0), 32.0, TextAlign::Center, Color::WHITE);
    frame.text(
        format!("Final score: {}", state.score),
        Vec2::new(cx, cy - 20.0),
        20.0,
        TextAlign::Center,
        Color::WHITE,
    );
    if state.new_record {
        frame.text("New record!", Vec2::new(cx, cy + 10.0), 22.0, TextAlign::Center, RECORD);
    }
    draw_button(frame, state, "Restart");
}

//! GoHigh render step

use glam::Vec2;

use super::state::*;
use super::tick::overlay_button;
use crate::renderer::shapes;
use crate::renderer::{AssetId, AssetProbe, Color, DrawCommand, Frame, TextAlign};
use crate::sim::{GamePhase, Rect};
use crate::ticks_to_seconds;

const SPACE: Color = Color::BLACK;
const CRATER: Color = Color::hex(0x808080);
const COCKPIT: Color = Color::hex(0x60a5fa);
const FLAME_INNER: Color = Color::hex(0xfbbf24);
const RECORD: Color = Color::hex(0xfbbf24);

/// Altitude with thousands separators
pub fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn render(state: &GoHighState, assets: &dyn AssetProbe) -> Frame {
    let mut frame = Frame::new(state.surface);

    frame.fill(SPACE);
    draw_stars(&mut frame, state);
    draw_planets(&mut frame, state);

    for power_up in state.power_ups.iter().filter(|p| !p.collected) {
        frame.circle(power_up.pos, power_up.radius, power_up.kind.color());
        let size = power_up.radius * 1.5;
        let rect = Rect::new(power_up.pos.x - size / 2.0, power_up.pos.y - size / 2.0, size, size);
        let (asset, glyph) = match power_up.kind {
            PowerUpKind::Shield => (AssetId::Shield, "S"),
            PowerUpKind::Boost => (AssetId::Boost, "B"),
        };
        frame.image_or_placeholder(assets, asset, rect, glyph);
    }

    for asteroid in &state.asteroids {
        let outline = shapes::transform(&shapes::asteroid_outline(asteroid.radius), asteroid.pos, asteroid.rotation);
        frame.polygon(outline, ASTEROID_COLOR);
        let craters = shapes::transform(
            &shapes::crater_offsets(asteroid.id, asteroid.radius),
            asteroid.pos,
            asteroid.rotation,
        );
        for crater in craters {
            frame.circle(crater, asteroid.radius * 0.2, CRATER);
        }
    }

    draw_craft(&mut frame, state);

    for particle in &state.particles {
        let alpha = particle.life as f32 / PARTICLE_LIFE as f32;
        frame.circle(particle.pos, particle.radius, particle.color.with_alpha(alpha));
    }

    draw_hud(&mut frame, state);

    match state.phase {
        GamePhase::Idle => draw_start_overlay(&mut frame, state),
        GamePhase::GameOver => draw_game_over_overlay(&mut frame, state),
        GamePhase::Playing => {}
    }

    frame
}

fn draw_stars(frame: &mut Frame, state: &GoHighState) {
    let h = state.surface.height;
    let band = h * 3.0;
    let t = state.time_ticks as f32;
    for star in &state.stars {
        let y = (star.y + h + state.background_offset).rem_euclid(band) - h;
        if y < -star.radius || y > h + star.radius {
            continue;
        }
        let twinkle = (t * star.twinkle_speed).sin() * 0.2 + 0.8;
        frame.circle(
            Vec2::new(star.x, y),
            star.radius,
            Color::WHITE.with_alpha(star.brightness * twinkle),
        );
    }
}

fn draw_planets(frame: &mut Frame, state: &GoHighState) {
    let h = state.surface.height;
    for planet in &state.planets {
        let y = planet.screen_y(state.background_offset);
        if y <= -planet.radius * 2.0 || y >= h + planet.radius * 2.0 {
            continue;
        }
        let center = Vec2::new(planet.x, y);
        frame.circle(center, planet.radius, planet.color);
        if let Some(ring) = &planet.ring {
            frame.push(DrawCommand::StrokeEllipse {
                center,
                radii: Vec2::new(planet.radius * 1.5, planet.radius * 0.5),
                rotation: std::f32::consts::FRAC_PI_6,
                width: ring.width,
                color: ring.color,
            });
        }
        frame.circle(
            center - Vec2::splat(planet.radius * 0.3),
            planet.radius * 0.4,
            Color::BLACK.with_alpha(0.2),
        );
    }
}

fn draw_craft(frame: &mut Frame, state: &GoHighState) {
    let craft = &state.craft;
    let origin = craft.pos();

    if state.shield_active() {
        frame.circle(origin, craft.width, SHIELD_COLOR.with_alpha(0.3));
        frame.push(DrawCommand::StrokeCircle {
            center: origin,
            radius: craft.width,
            width: 2.0,
            color: SHIELD_COLOR.with_alpha(0.8),
        });
    }

    frame.polygon(shapes::transform(&shapes::ship_body(craft.width, craft.height), origin, 0.0), CRAFT_COLOR);
    frame.push(DrawCommand::FillEllipse {
        center: origin - Vec2::new(0.0, craft.height / 6.0),
        radii: Vec2::new(craft.width / 4.0, craft.height / 6.0),
        rotation: 0.0,
        color: COCKPIT,
    });

    // Flame length pulses with the tick counter
    let pulse = 0.8 + (state.time_ticks % 5) as f32 * 0.1;
    let boost = if state.boost_active() { BOOST_MULTIPLIER } else { 1.0 };
    let length = craft.height / 3.0 * pulse * boost;
    frame.polygon(
        shapes::transform(&shapes::flame(craft.width / 2.0, craft.height, length), origin, 0.0),
        BOOST_COLOR,
    );
    frame.polygon(
        shapes::transform(&shapes::flame(craft.width / 3.0, craft.height, length * 0.7), origin, 0.0),
        FLAME_INNER,
    );
}

fn draw_hud(frame: &mut Frame, state: &GoHighState) {
    frame.text(
        format!("Altitude: {}m", grouped(state.altitude())),
        Vec2::new(20.0, 30.0),
        20.0,
        TextAlign::Left,
        Color::WHITE,
    );
    frame.text(
        format!("Best altitude: {}m", grouped(state.high_score)),
        Vec2::new(20.0, 60.0),
        16.0,
        TextAlign::Left,
        Color::WHITE,
    );

    let mut y = 90.0;
    if state.shield_active() {
        frame.text(
            format!("Shield: {}s", ticks_to_seconds(state.shield_ticks)),
            Vec2::new(20.0, y),
            16.0,
            TextAlign::Left,
            SHIELD_COLOR,
        );
        y += 30.0;
    }
    if state.boost_active() {
        frame.text(
            format!("Boost: {}s", ticks_to_seconds(state.boost_ticks)),
            Vec2::new(20.0, y),
            16.0,
            TextAlign::Left,
            BOOST_COLOR,
        );
    }
}

fn draw_button(frame: &mut Frame, state: &GoHighState, label: &str) {
    let button = overlay_button(state.surface);
    frame.rect(button, CRAFT_COLOR);
    frame.text(label, Vec2::new(button.center().x, button.y + 25.0), 16.0, TextAlign::Center, Color::WHITE);
}

fn draw_start_overlay(frame: &mut Frame, state: &GoHighState) {
    let cx = state.surface.center_x();
    let cy = state.surface.center_y();
    frame.dim();
    frame.text("GoHigh", Vec2::new(cx, cy - 60.0), 30.0, TextAlign::Center, Color::WHITE);
    frame.text(
        "Tap the left or right side to steer the ship!",
        Vec2::new(cx, cy - 20.0),
        16.0,
        TextAlign::Center,
        Color::WHITE,
    );
    frame.text(
        "Dodge the asteroids and climb as high as you can!",
        Vec2::new(cx, cy + 10.0),
        16.0,
        TextAlign::Center,
        Color::WHITE,
    );
    draw_button(frame, state, "Start");
}

fn draw_game_over_overlay(frame: &mut Frame, state: &GoHighState) {
    let cx = state.surface.center_x();
    let cy = state.surface.center_y();
    frame.dim();
    frame.text("Game Over", Vec2::new(cx, cy - 60.0), 30.0, TextAlign::Center, Color::WHITE);
    frame.text(
        format!("Final altitude: {}m", grouped(state.altitude())),
        Vec2::new(cx, cy - 20.0),
        20.0,
        TextAlign::Center,
        Color::WHITE,
    );
    if state.new_record {
        frame.text("New record!", Vec2::new(cx, cy + 10.0), 20.0, TextAlign::Center, RECORD);
    }
    draw_button(frame, state, "Restart");
}

//! GoHigh world state

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::renderer::Color;
use crate::sim::{GamePhase, Surface, random_between};

pub const SURFACE_MAX_WIDTH: f32 = 500.0;
pub const SURFACE_MAX_HEIGHT: f32 = 700.0;

pub const CRAFT_WIDTH: f32 = 40.0;
pub const CRAFT_HEIGHT: f32 = 60.0;
/// Distance of the craft from the bottom edge
pub const CRAFT_BOTTOM_OFFSET: f32 = 100.0;
/// Horizontal pixels per tick while a steering key is held
pub const CRAFT_STEP: f32 = 5.0;
pub const CLICK_STEP: f32 = 25.0;
pub const TOUCH_STEP: f32 = 15.0;

pub const BASE_SPEED: f32 = 2.0;
pub const DIFFICULTY_STEP: f32 = 0.01;
pub const DIFFICULTY_CHECKPOINT: f32 = 1000.0;

pub const BOOST_MULTIPLIER: f32 = 1.5;
pub const BOOST_TICKS: u32 = 300;
pub const SHIELD_TICKS: u32 = 600;

pub const ASTEROID_BASE_CHANCE: f32 = 0.02;
pub const ASTEROID_CHANCE_CAP: f32 = 0.25;
pub const ASTEROID_SPAWN_Y: f32 = -50.0;
/// Asteroids are pruned this far below the bottom edge
pub const ASTEROID_PRUNE_MARGIN: f32 = 50.0;

pub const POWER_UP_CHANCE: f32 = 0.002;
pub const POWER_UP_RADIUS: f32 = 15.0;
pub const POWER_UP_FALL: f32 = 2.0;
pub const POWER_UP_SPAWN_Y: f32 = -30.0;
pub const POWER_UP_PRUNE_MARGIN: f32 = 30.0;

pub const PARTICLES_PER_BURST: usize = 30;
pub const PARTICLE_LIFE: u32 = 60;

pub const STAR_COUNT: usize = 100;
pub const PLANET_COUNT: usize = 5;

pub const CRAFT_COLOR: Color = Color::hex(0x4ade80);
pub const SHIELD_COLOR: Color = Color::hex(0x60a5fa);
pub const BOOST_COLOR: Color = Color::hex(0xf97316);
pub const ASTEROID_COLOR: Color = Color::hex(0xa3a3a3);

const PLANET_COLORS: [Color; 7] = [
    Color::hex(0xff4d4d),
    Color::hex(0x4ade80),
    Color::hex(0x60a5fa),
    Color::hex(0xf97316),
    Color::hex(0xa78bfa),
    Color::hex(0xfbbf24),
    Color::hex(0xec4899),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Spacecraft {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Spacecraft {
    pub fn new(surface: Surface) -> Self {
        Self {
            x: surface.center_x(),
            y: surface.height - CRAFT_BOTTOM_OFFSET,
            width: CRAFT_WIDTH,
            height: CRAFT_HEIGHT,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Effective collision radius
    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }

    /// Keep the hull fully inside the surface
    pub fn clamp_to(&mut self, surface: Surface) {
        let half = self.width / 2.0;
        self.x = self.x.clamp(half, (surface.width - half).max(half));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    /// Stable id, seeds the crater layout
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Fall speed in px per tick
    pub speed: f32,
    pub rotation: f32,
    pub spin: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Shield,
    Boost,
}

impl PowerUpKind {
    pub fn color(self) -> Color {
        match self {
            PowerUpKind::Shield => SHIELD_COLOR,
            PowerUpKind::Boost => BOOST_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub radius: f32,
    pub collected: bool,
}

/// Cosmetic explosion fragment
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    pub life: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    /// Position inside the wrapping band, before scrolling
    pub y: f32,
    pub radius: f32,
    pub brightness: f32,
    pub twinkle_speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub x: f32,
    /// World y; drawn at `y + background_offset`
    pub y: f32,
    pub radius: f32,
    pub color: Color,
    pub ring: Option<Ring>,
}

impl Planet {
    /// A planet placed somewhere above the visible area
    pub fn random(rng: &mut impl Rng, surface: Surface, background_offset: f32) -> Self {
        let ring = rng.random_bool(0.3).then(|| Ring {
            color: random_color(rng),
            width: random_between(rng, 5.0, 15.0),
        });
        Self {
            x: random_between(rng, 0.0, surface.width),
            y: -background_offset - 500.0 - rng.random::<f32>() * 3000.0,
            radius: random_between(rng, 20.0, 60.0),
            color: random_color(rng),
            ring,
        }
    }

    pub fn screen_y(&self, background_offset: f32) -> f32 {
        self.y + background_offset
    }
}

fn random_color(rng: &mut impl Rng) -> Color {
    PLANET_COLORS[rng.random_range(0..PLANET_COLORS.len())]
}

/// Complete GoHigh world
#[derive(Debug, Clone)]
pub struct GoHighState {
    pub phase: GamePhase,
    pub surface: Surface,
    /// Altitude climbed this run
    pub score: f32,
    pub high_score: u64,
    pub new_record: bool,
    /// Base climb speed, raised at altitude checkpoints
    pub speed: f32,
    pub next_checkpoint: f32,
    pub background_offset: f32,
    pub shield_ticks: u32,
    pub boost_ticks: u32,
    pub craft: Spacecraft,
    pub asteroids: Vec<Asteroid>,
    pub next_asteroid_id: u32,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub planets: Vec<Planet>,
    /// Spawn particle bursts
    pub particles_enabled: bool,
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GoHighState {
    pub fn new(surface: Surface, high_score: u64, seed: u64) -> Self {
        let mut state = Self {
            phase: GamePhase::Idle,
            surface,
            score: 0.0,
            high_score,
            new_record: false,
            speed: BASE_SPEED,
            next_checkpoint: DIFFICULTY_CHECKPOINT,
            background_offset: 0.0,
            shield_ticks: 0,
            boost_ticks: 0,
            craft: Spacecraft::new(surface),
            asteroids: Vec::new(),
            next_asteroid_id: 0,
            power_ups: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            planets: Vec::new(),
            particles_enabled: true,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_scenery();
        state
    }

    pub fn shield_active(&self) -> bool {
        self.shield_ticks > 0
    }

    pub fn boost_active(&self) -> bool {
        self.boost_ticks > 0
    }

    /// Climb speed this tick, boost applied
    pub fn effective_speed(&self) -> f32 {
        if self.boost_active() {
            self.speed * BOOST_MULTIPLIER
        } else {
            self.speed
        }
    }

    /// Whole meters climbed
    pub fn altitude(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    pub fn asteroid_chance(&self) -> f32 {
        (ASTEROID_BASE_CHANCE + self.score / 100_000.0).min(ASTEROID_CHANCE_CAP)
    }

    /// Begin a new run
    pub fn restart(&mut self) {
        self.score = 0.0;
        self.new_record = false;
        self.speed = BASE_SPEED;
        self.next_checkpoint = DIFFICULTY_CHECKPOINT;
        self.background_offset = 0.0;
        self.shield_ticks = 0;
        self.boost_ticks = 0;
        self.craft = Spacecraft::new(self.surface);
        self.asteroids.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.time_ticks = 0;
        self.reset_scenery();
        self.phase = GamePhase::Playing;
        log::info!("GoHigh: run started");
    }

    fn reset_scenery(&mut self) {
        let surface = self.surface;
        let rng = &mut self.rng;
        self.stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: random_between(rng, 0.0, surface.width),
                y: random_between(rng, -surface.height, surface.height * 2.0),
                radius: random_between(rng, 0.5, 2.5),
                brightness: random_between(rng, 0.5, 1.0),
                twinkle_speed: random_between(rng, 0.01, 0.06),
            })
            .collect();
        self.planets = (0..PLANET_COUNT).map(|_| Planet::random(rng, surface, 0.0)).collect();
    }

    /// Emit a cosmetic burst, unless particles are disabled
    pub fn burst(&mut self, at: Vec2, color: Color) {
        if !self.particles_enabled {
            return;
        }
        let rng = &mut self.rng;
        self.particles.extend((0..PARTICLES_PER_BURST).map(|_| {
            let angle = random_between(rng, 0.0, TAU);
            let speed = random_between(rng, 1.0, 4.0);
            Particle {
                pos: at,
                vel: Vec2::from_angle(angle) * speed,
                radius: random_between(rng, 1.0, 4.0),
                color,
                life: PARTICLE_LIFE,
            }
        }));
    }

    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
        self.craft.y = surface.height - CRAFT_BOTTOM_OFFSET;
        self.craft.clamp_to(surface);
    }
}

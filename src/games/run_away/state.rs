//! RunAway world state

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::renderer::Color;
use crate::sim::{GamePhase, Rect, Surface, random_between};

pub const SURFACE_MAX_WIDTH: f32 = 1000.0;
pub const SURFACE_HEIGHT: f32 = 500.0;
pub const GROUND_HEIGHT: f32 = 50.0;

/// Player rests this far above the bottom edge
pub const PLAYER_GROUND_OFFSET: f32 = 100.0;
pub const PLAYER_X: f32 = 50.0;
pub const PLAYER_SIZE: f32 = 30.0;
pub const JUMP_POWER: f32 = 15.0;
pub const GRAVITY: f32 = 0.8;

pub const START_SPEED: f32 = 5.0;
pub const SPEED_STEP: f32 = 0.5;
/// Score ticks between speed increases
pub const SPEED_STEP_INTERVAL: u64 = 300;

pub const MAX_OBSTACLES: usize = 3;
pub const BASE_OBSTACLE_GAP: f32 = 300.0;
/// Gap shrinks by this much per unit of speed
pub const GAP_PER_SPEED: f32 = 10.0;

pub const BUILDING_COUNT: usize = 5;
pub const CLOUD_COUNT: usize = 5;
pub const BUILDING_PARALLAX: f32 = 0.2;
pub const CLOUD_PARALLAX: f32 = 0.1;

pub const BUILDING_COLORS: [Color; 7] = [
    Color::hex(0x2563eb),
    Color::hex(0x4f46e5),
    Color::hex(0x7c3aed),
    Color::hex(0x9333ea),
    Color::hex(0xc026d3),
    Color::hex(0xdb2777),
    Color::hex(0xe11d48),
];

/// The runner
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
    pub jumping: bool,
}

impl Player {
    pub fn on_ground(ground_y: f32) -> Self {
        Self {
            x: PLAYER_X,
            y: ground_y,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            velocity: 0.0,
            jumping: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Start a jump; ignored mid-air
    pub fn jump(&mut self) {
        if !self.jumping {
            self.jumping = true;
            self.velocity = -JUMP_POWER;
        }
    }

    /// Euler step under gravity, landing at `ground_y`
    pub fn integrate(&mut self, ground_y: f32) {
        if !self.jumping {
            return;
        }
        self.velocity += GRAVITY;
        self.y += self.velocity;
        if self.y >= ground_y {
            self.y = ground_y;
            self.jumping = false;
            self.velocity = 0.0;
        }
    }
}

/// Ground-anchored obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn rect(&self, surface: Surface) -> Rect {
        let top = surface.height - GROUND_HEIGHT - self.height;
        Rect::new(self.x, top, self.width, self.height)
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// Background building (decoration)
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl Building {
    pub fn random(rng: &mut Pcg32, x: f32) -> Self {
        let color = BUILDING_COLORS[rng.random_range(0..BUILDING_COLORS.len())];
        Self {
            x,
            width: random_between(rng, 100.0, 200.0),
            height: random_between(rng, 100.0, 250.0),
            color,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Sky cloud (decoration)
#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// Complete RunAway world
#[derive(Debug, Clone)]
pub struct RunAwayState {
    pub phase: GamePhase,
    pub surface: Surface,
    pub score: u64,
    pub high_score: u64,
    /// Set when the last run beat the previous best
    pub new_record: bool,
    pub speed: f32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub buildings: Vec<Building>,
    pub clouds: Vec<Cloud>,
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl RunAwayState {
    /// Idle world with scenery in place
    pub fn new(surface: Surface, high_score: u64, seed: u64) -> Self {
        let mut state = Self {
            phase: GamePhase::Idle,
            surface,
            score: 0,
            high_score,
            new_record: false,
            speed: START_SPEED,
            player: Player::on_ground(surface.height - PLAYER_GROUND_OFFSET),
            obstacles: Vec::new(),
            buildings: Vec::new(),
            clouds: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_world();
        state
    }

    /// Player's resting y
    pub fn ground_y(&self) -> f32 {
        self.surface.height - PLAYER_GROUND_OFFSET
    }

    /// Minimum horizontal spacing before another obstacle may appear
    pub fn min_obstacle_gap(&self) -> f32 {
        BASE_OBSTACLE_GAP - self.speed * GAP_PER_SPEED
    }

    /// Per-tick spawn probability
    pub fn obstacle_chance(&self) -> f32 {
        0.01 + (self.score as f32 / 10_000.0) * 0.01
    }

    /// Begin a new run
    pub fn restart(&mut self) {
        self.reset_world();
        self.phase = GamePhase::Playing;
        log::info!("RunAway: run started");
    }

    fn reset_world(&mut self) {
        self.score = 0;
        self.speed = START_SPEED;
        self.new_record = false;
        self.time_ticks = 0;
        self.player = Player::on_ground(self.ground_y());

        self.obstacles.clear();
        self.obstacles.push(Obstacle {
            x: self.surface.width,
            width: 30.0,
            height: 50.0,
        });

        self.buildings = (0..BUILDING_COUNT)
            .map(|i| Building::random(&mut self.rng, i as f32 * 200.0))
            .collect();

        let width = self.surface.width;
        self.clouds = (0..CLOUD_COUNT)
            .map(|_| Cloud {
                x: random_between(&mut self.rng, 0.0, width),
                y: random_between(&mut self.rng, 50.0, 150.0),
                radius: random_between(&mut self.rng, 20.0, 50.0),
            })
            .collect();
    }

    /// Adopt a new surface size
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
        if !self.player.jumping {
            self.player.y = self.ground_y();
        }
    }
}

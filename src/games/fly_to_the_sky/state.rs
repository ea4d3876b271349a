//! FlyToTheSky world state

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::sim::{GamePhase, Rect, Surface};

pub const SURFACE_MAX_WIDTH: f32 = 896.0;
pub const SURFACE_HEIGHT: f32 = 400.0;

pub const PLAYER_X: f32 = 100.0;
pub const PLAYER_START_Y: f32 = 200.0;
pub const PLAYER_WIDTH: f32 = 60.0;
pub const PLAYER_HEIGHT: f32 = 30.0;
/// Vertical pixels per tick while Up/Down is held
pub const PLAYER_STEP: f32 = 5.0;

pub const START_HP: u8 = 3;
pub const MAX_HP: u8 = 5;
/// Ticks of invulnerability after a hit
pub const HIT_TICKS: u32 = 30;

pub const PILLAR_WIDTH: f32 = 60.0;
pub const PILLAR_GAP: f32 = 150.0;
pub const MIN_PILLAR_HEIGHT: f32 = 50.0;
/// Horizontal spacing between pillar pairs
pub const OBSTACLE_INTERVAL: f32 = 200.0;
pub const PASS_SCORE: u64 = 10;

pub const ITEM_CHANCE: f32 = 0.005;
pub const MAX_ITEMS: usize = 3;
pub const ITEM_SIZE: f32 = 30.0;

pub const START_SPEED: f32 = 5.0;
pub const SPEED_STEP: f32 = 0.5;
pub const SPEED_CHECKPOINT: u64 = 100;

pub const BOOST_DELTA: f32 = 5.0;
/// 3 seconds at 60 ticks per second
pub const BOOST_TICKS: u32 = 180;

/// The plane
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_y: f32,
    /// Invulnerable and flickering
    pub is_hit: bool,
    pub hit_timer: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_X,
            y: PLAYER_START_Y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            velocity_y: 0.0,
            is_hit: false,
            hit_timer: 0,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Count down the invulnerability window
    pub fn update_hit_timer(&mut self) {
        if self.is_hit {
            self.hit_timer += 1;
            if self.hit_timer > HIT_TICKS {
                self.is_hit = false;
                self.hit_timer = 0;
            }
        }
    }
}

/// A top/bottom pillar pair, positioned in world (distance) coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Pillar {
    pub x: f32,
    pub top_height: f32,
    pub bottom_height: f32,
    pub width: f32,
    pub passed: bool,
}

impl Pillar {
    pub fn screen_x(&self, distance: f32) -> f32 {
        self.x - distance
    }

    pub fn top_rect(&self, distance: f32) -> Rect {
        Rect::new(self.screen_x(distance), 0.0, self.width, self.top_height)
    }

    pub fn bottom_rect(&self, distance: f32, surface: Surface) -> Rect {
        Rect::new(
            self.screen_x(distance),
            surface.height - self.bottom_height,
            self.width,
            self.bottom_height,
        )
    }

    pub fn is_off_screen(&self, distance: f32) -> bool {
        self.screen_x(distance) + self.width < 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Heal,
    Speed,
}

/// Collectible, positioned in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub x: f32,
    pub y: f32,
    pub kind: ItemKind,
    pub width: f32,
    pub height: f32,
    pub collected: bool,
}

impl Item {
    pub fn rect(&self, distance: f32) -> Rect {
        Rect::new(self.x - distance, self.y, self.width, self.height)
    }

    pub fn is_off_screen(&self, distance: f32) -> bool {
        self.x - distance + self.width < 0.0
    }
}

/// Complete FlyToTheSky world
#[derive(Debug, Clone)]
pub struct FlyState {
    pub phase: GamePhase,
    pub surface: Surface,
    pub score: u64,
    pub high_score: u64,
    pub new_record: bool,
    pub hp: u8,
    /// Base scroll speed, raised at score checkpoints
    pub speed: f32,
    /// Remaining ticks of each active speed boost
    pub boosts: Vec<u32>,
    /// World distance scrolled this run
    pub distance: f32,
    /// World x of the most recent pillar pair
    pub last_obstacle_x: Option<f32>,
    /// Score at which the next speed increase fires
    pub next_speed_checkpoint: u64,
    pub player: Player,
    pub pillars: Vec<Pillar>,
    pub items: Vec<Item>,
    /// Blink the player while invulnerable
    pub flicker: bool,
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl FlyState {
    pub fn new(surface: Surface, high_score: u64, seed: u64) -> Self {
        Self {
            phase: GamePhase::Idle,
            surface,
            score: 0,
            high_score,
            new_record: false,
            hp: START_HP,
            speed: START_SPEED,
            boosts: Vec::new(),
            distance: 0.0,
            last_obstacle_x: None,
            next_speed_checkpoint: SPEED_CHECKPOINT,
            player: Player::default(),
            pillars: Vec::new(),
            items: Vec::new(),
            flicker: true,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Scroll speed including active boosts
    pub fn world_speed(&self) -> f32 {
        self.speed + BOOST_DELTA * self.boosts.len() as f32
    }

    pub fn speed_boosted(&self) -> bool {
        !self.boosts.is_empty()
    }

    /// Begin a new run
    pub fn restart(&mut self) {
        self.score = 0;
        self.new_record = false;
        self.hp = START_HP;
        self.speed = START_SPEED;
        self.boosts.clear();
        self.distance = 0.0;
        self.last_obstacle_x = None;
        self.next_speed_checkpoint = SPEED_CHECKPOINT;
        self.player = Player::default();
        self.pillars.clear();
        self.items.clear();
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        log::info!("FlyToTheSky: run started");
    }

    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
        let max_y = (surface.height - self.player.height).max(0.0);
        self.player.y = self.player.y.clamp(0.0, max_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_timer_runs_to_completion() {
        let mut player = Player {
            is_hit: true,
            ..Default::default()
        };
        for _ in 0..HIT_TICKS {
            player.update_hit_timer();
            assert!(player.is_hit);
        }
        player.update_hit_timer();
        assert!(!player.is_hit);
        assert_eq!(player.hit_timer, 0);
    }

    #[test]
    fn test_world_speed_includes_boosts() {
        let mut state = FlyState::new(Surface::new(800.0, SURFACE_HEIGHT), 0, 1);
        assert_eq!(state.world_speed(), START_SPEED);
        state.boosts = vec![10, 20];
        assert_eq!(state.world_speed(), START_SPEED + 2.0 * BOOST_DELTA);
        assert!(state.speed_boosted());
    }
}

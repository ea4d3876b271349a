//! Input sampler
//!
//! Event handlers only ever call [`InputSampler::handle`]. The update step
//! receives a single [`InputSnapshot`] per tick from [`InputSampler::drain`].

use glam::Vec2;

use crate::sim::Rect;

/// Keys the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    A,
    D,
    Space,
    Enter,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::A,
        Key::D,
        Key::Space,
        Key::Enter,
    ];

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "a" | "A" => Some(Key::A),
            "d" | "D" => Some(Key::D),
            " " | "Spacebar" => Some(Key::Space),
            "Enter" => Some(Key::Enter),
            _ => None,
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Set of held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet(u16);

impl KeySet {
    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }
}

/// Raw input, in surface-local pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    Click(Vec2),
    TouchStart(Vec2),
    TouchMove(Vec2),
}

/// Kind of touch contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
}

/// Input signals for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Keys held at the time of the snapshot
    pub held: KeySet,
    /// Keys that went down since the previous snapshot
    pub pressed: Vec<Key>,
    /// Click positions since the previous snapshot
    pub clicks: Vec<Vec2>,
    /// Touch positions since the previous snapshot
    pub touches: Vec<(TouchPhase, Vec2)>,
}

impl InputSnapshot {
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(key)
    }

    /// Any of the given keys held
    pub fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|&k| self.is_held(k))
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// A click or touch-start landed inside `rect`
    pub fn pointer_hits(&self, rect: &Rect) -> bool {
        self.clicks.iter().any(|&p| rect.contains(p))
            || self
                .touches
                .iter()
                .any(|&(phase, p)| phase == TouchPhase::Start && rect.contains(p))
    }

    /// Snapshot with the given keys held (tests and scripted demos)
    pub fn holding(keys: &[Key]) -> Self {
        let mut held = KeySet::default();
        for &k in keys {
            held.insert(k);
        }
        Self {
            held,
            ..Default::default()
        }
    }

    /// Snapshot with a single key press
    pub fn pressing(key: Key) -> Self {
        let mut snapshot = Self::holding(&[key]);
        snapshot.pressed.push(key);
        snapshot
    }

    /// Snapshot with a single click
    pub fn clicking(at: Vec2) -> Self {
        Self {
            clicks: vec![at],
            ..Default::default()
        }
    }

    /// Snapshot with a single touch contact
    pub fn touching(phase: TouchPhase, at: Vec2) -> Self {
        Self {
            touches: vec![(phase, at)],
            ..Default::default()
        }
    }
}

/// Accumulates events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    pending: InputSnapshot,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: InputEvent) {
        let pending = &mut self.pending;
        match event {
            InputEvent::KeyDown(key) => {
                // Auto-repeat keydowns are not new presses
                if !pending.held.contains(key) {
                    pending.pressed.push(key);
                }
                pending.held.insert(key);
            }
            InputEvent::KeyUp(key) => pending.held.remove(key),
            InputEvent::Click(p) => pending.clicks.push(p),
            InputEvent::TouchStart(p) => pending.touches.push((TouchPhase::Start, p)),
            InputEvent::TouchMove(p) => pending.touches.push((TouchPhase::Move, p)),
        }
    }

    /// Take the signals for this tick. Held keys carry over.
    pub fn drain(&mut self) -> InputSnapshot {
        let held = self.pending.held;
        let snapshot = std::mem::take(&mut self.pending);
        self.pending.held = held;
        snapshot
    }

    /// Drop everything, including held keys (focus loss, unmount)
    pub fn reset(&mut self) {
        self.pending = InputSnapshot::default();
    }
}

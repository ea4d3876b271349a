//! Platform layer
//!
//! - `LoopDriver`: per-refresh timing and stall detection (all targets)
//! - `web`: canvas mounting, event listeners and the animation-frame loop

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::STALL_THRESHOLD_MS;

/// What the loop should do for one display refresh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Run the update step (false when the frame stalled)
    pub update: bool,
}

/// Decides, per display refresh, whether the update step runs
#[derive(Debug, Clone)]
pub struct LoopDriver {
    last_time: Option<f64>,
    stall_threshold_ms: f64,
    // FPS tracking
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for LoopDriver {
    fn default() -> Self {
        Self::new(STALL_THRESHOLD_MS)
    }
}

impl LoopDriver {
    pub fn new(stall_threshold_ms: f64) -> Self {
        Self {
            last_time: None,
            stall_threshold_ms,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Register a refresh at `now_ms` (host timestamp)
    pub fn advance(&mut self, now_ms: f64) -> FrameStep {
        // First frame counts as no elapsed time
        let elapsed_ms = match self.last_time {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_time = Some(now_ms);
        self.track_fps(now_ms);

        let update = elapsed_ms < self.stall_threshold_ms;
        if !update {
            log::debug!("Skipping update after {:.0}ms stall", elapsed_ms);
        }
        FrameStep { update }
    }

    /// Forget the previous timestamp (after the loop was paused or remounted)
    pub fn reset(&mut self) {
        self.last_time = None;
        self.frame_times = [0.0; 60];
        self.frame_index = 0;
        self.fps = 0;
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    fn track_fps(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample sits at the next write position
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = (59.0 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

//! Enemy spawn pacing
//!
//! Spawns are triggered by wall-clock time but the interval shrinks per spawn
//! event, so difficulty ramps with the number of enemies released rather than
//! with elapsed seconds.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Decides when the next enemy appears
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnDirector {
    /// Clock reading of the last spawn (or of the last rebase).
    /// `None` means the next observed frame becomes the baseline.
    pub last_spawn: Option<f64>,
    /// Current seconds between spawns
    pub interval: f64,
    initial_interval: f64,
    min_interval: f64,
    decay: f64,
}

impl SpawnDirector {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            last_spawn: None,
            interval: tuning.spawn_interval,
            initial_interval: tuning.spawn_interval,
            min_interval: tuning.min_spawn_interval,
            decay: tuning.spawn_decay,
        }
    }

    /// Restart the spawn timer from `now`
    pub fn rebase(&mut self, now: f64) {
        self.last_spawn = Some(now);
    }

    /// Back to the starting interval; the timer restarts on the next frame
    pub fn reset(&mut self) {
        self.interval = self.initial_interval;
        self.last_spawn = None;
    }

    /// Returns true when an enemy should be created this frame
    ///
    /// A due spawn moves the baseline to `now` and decays the interval toward
    /// its floor.
    pub fn poll(&mut self, now: f64) -> bool {
        let Some(last) = self.last_spawn else {
            self.last_spawn = Some(now);
            return false;
        };

        if now - last > self.interval {
            self.last_spawn = Some(now);
            self.interval = (self.interval * self.decay).max(self.min_interval);
            true
        } else {
            false
        }
    }
}

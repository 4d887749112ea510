use serde::{Deserialize, Serialize};

/// Countdown gate for repeatable actions (attacks, dashes).
///
/// Starts ready. `trigger` arms it for `duration` seconds; `tick` counts down
/// and clamps at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub duration: f32,
    remaining: f32,
}

impl Cooldown {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            remaining: 0.0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn trigger(&mut self) {
        self.remaining = self.duration;
    }

    pub fn tick(&mut self, dt: f32) {
        if dt > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Fraction of the cooldown that has elapsed, in `[0, 1]` (1 = ready).
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
    }
}

/// A fixed-length window that counts elapsed time once opened
/// (invulnerability after a hit, an in-progress dash).
///
/// Re-opening while active does not restart it; the window always runs its
/// full duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedWindow {
    pub duration: f32,
    elapsed: f32,
    active: bool,
}

impl TimedWindow {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
            active: false,
        }
    }

    /// Open the window. Returns `false` if it was already open.
    pub fn open(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.elapsed = 0.0;
        true
    }

    /// Advance by `dt`. Returns `true` on the tick the window closes.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        if dt > 0.0 {
            self.elapsed += dt;
        }
        if self.elapsed >= self.duration {
            self.active = false;
            self.elapsed = 0.0;
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn close(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
    }
}

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Trait for game-specific timed effect enums (jump boost, speed boost, ...).
pub trait PowerUpKind: Clone + Copy + PartialEq + Serialize + DeserializeOwned {
    /// Duration in seconds. Use `f32::INFINITY` for permanent effects.
    fn duration(&self) -> f32;
}

/// Active timed effect on an entity, generic over the kind enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ActivePowerUp<K: PowerUpKind> {
    pub kind: K,
    pub remaining: f32,
}

impl<K: PowerUpKind> ActivePowerUp<K> {
    pub fn new(kind: K) -> Self {
        Self {
            remaining: kind.duration(),
            kind,
        }
    }

    /// Count down by `dt` seconds, never below zero.
    pub fn tick(&mut self, dt: f32) {
        if self.remaining.is_finite() && dt > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Restart the timer (picking up the same effect again refreshes it).
    pub fn refresh(&mut self) {
        self.remaining = self.kind.duration();
    }
}

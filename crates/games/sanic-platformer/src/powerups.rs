use serde::{Deserialize, Serialize};

use sanic_core::powerup;

use crate::config::CombatConfig;

/// Timed pickups that modify player movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostKind {
    JumpBoost,
    SpeedBoost,
}

impl powerup::PowerUpKind for BoostKind {
    fn duration(&self) -> f32 {
        match self {
            BoostKind::JumpBoost => 3.0,
            BoostKind::SpeedBoost => 3.0,
        }
    }
}

pub type ActiveBoost = powerup::ActivePowerUp<BoostKind>;

/// Boosts currently affecting the player. At most one entry per kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Boosts {
    active: Vec<ActiveBoost>,
}

impl Boosts {
    /// Start a boost, or restart its timer if already running.
    pub fn grant(&mut self, kind: BoostKind) {
        if let Some(existing) = self.active.iter_mut().find(|b| b.kind == kind) {
            existing.refresh();
        } else {
            self.active.push(ActiveBoost::new(kind));
        }
    }

    pub fn tick(&mut self, dt: f32) {
        for boost in &mut self.active {
            boost.tick(dt);
        }
        self.active.retain(|b| !b.is_expired());
    }

    pub fn has(&self, kind: BoostKind) -> bool {
        self.active.iter().any(|b| b.kind == kind)
    }

    pub fn remaining(&self, kind: BoostKind) -> Option<f32> {
        self.active.iter().find(|b| b.kind == kind).map(|b| b.remaining)
    }

    pub fn jump_multiplier(&self, cfg: &CombatConfig) -> f32 {
        if self.has(BoostKind::JumpBoost) {
            cfg.jump_boost_multiplier
        } else {
            1.0
        }
    }

    pub fn acceleration_multiplier(&self, cfg: &CombatConfig) -> f32 {
        if self.has(BoostKind::SpeedBoost) {
            cfg.speed_boost_multiplier
        } else {
            1.0
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_boost_expires() {
        let mut boosts = Boosts::default();
        boosts.grant(BoostKind::SpeedBoost);
        let cfg = CombatConfig::default();
        assert_eq!(boosts.acceleration_multiplier(&cfg), 2.0);
        boosts.tick(3.5);
        assert!(!boosts.has(BoostKind::SpeedBoost));
        assert_eq!(boosts.acceleration_multiplier(&cfg), 1.0);
    }

    #[test]
    fn regrant_refreshes_instead_of_stacking() {
        let mut boosts = Boosts::default();
        boosts.grant(BoostKind::JumpBoost);
        boosts.tick(2.0);
        boosts.grant(BoostKind::JumpBoost);
        assert_eq!(boosts.remaining(BoostKind::JumpBoost), Some(3.0));
        boosts.tick(2.5);
        assert!(boosts.has(BoostKind::JumpBoost));
    }

    #[test]
    fn kinds_are_independent() {
        let mut boosts = Boosts::default();
        boosts.grant(BoostKind::JumpBoost);
        boosts.tick(1.0);
        boosts.grant(BoostKind::SpeedBoost);
        boosts.tick(2.5);
        assert!(!boosts.has(BoostKind::JumpBoost));
        assert!(boosts.has(BoostKind::SpeedBoost));
    }
}

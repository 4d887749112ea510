use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::interactables::CollectibleKind;
use crate::projectile::Projectile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Lives ran out.
    Damage,
    /// Fell too far below the last apex.
    Fall,
}

/// Semantic signals posted during a tick for the scene layer to act on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    PlayerDeath {
        cause: DeathCause,
    },
    CheckpointActivated {
        position: Vec2,
        level_id: String,
    },
    LevelComplete {
        next_level: String,
    },
    CreateProjectile {
        projectile: Projectile,
    },
    EnemyDefeated {
        id: EntityId,
        dropped_charges: u32,
    },
    CollectiblePicked {
        id: EntityId,
        kind: CollectibleKind,
    },
    PlayerDamaged {
        lives_left: u32,
    },
}

impl SimEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            SimEvent::PlayerDeath { .. } => "player_death",
            SimEvent::CheckpointActivated { .. } => "checkpoint_activated",
            SimEvent::LevelComplete { .. } => "level_complete",
            SimEvent::CreateProjectile { .. } => "create_projectile",
            SimEvent::EnemyDefeated { .. } => "enemy_defeated",
            SimEvent::CollectiblePicked { .. } => "collectible_picked",
            SimEvent::PlayerDamaged { .. } => "player_damaged",
        }
    }
}

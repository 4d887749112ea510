pub mod camera;
pub mod collision;
pub mod combat;
pub mod config;
pub mod enemy;
pub mod events;
pub mod input;
pub mod interactables;
pub mod level;
pub mod physics;
pub mod platform;
pub mod player;
pub mod powerups;
pub mod projectile;
pub mod world;

use serde::{Deserialize, Serialize};

pub use config::SimConfig;
pub use events::{DeathCause, SimEvent};
pub use input::{InputState, Key};
pub use level::{LevelDescription, LevelError};
pub use world::{EntityView, SnapshotError, World};

/// Stable handle of an entity within one loaded level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Entity variant, used to tag render snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
    Platform,
    Collectible,
    Checkpoint,
    Exit,
}

/// Hands out sequential entity ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

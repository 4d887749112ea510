use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use sanic_core::geometry::{Anchor, Rect};

use crate::EntityId;
use crate::physics::Body;

/// Where activated checkpoints are persisted. The real store (a database in
/// the full game) lives outside the simulation.
pub trait CheckpointStore {
    fn save_checkpoint(&mut self, level_id: &str, position: Vec2);
    fn load_checkpoint(&self, level_id: &str) -> Option<Vec2>;
    fn clear_checkpoint(&mut self, level_id: &str);
}

/// In-process store; keeps the last checkpoint per level.
#[derive(Debug, Clone, Default)]
pub struct MemoryCheckpointStore {
    saved: HashMap<String, Vec2>,
    writes: usize,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves performed since creation.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn save_checkpoint(&mut self, level_id: &str, position: Vec2) {
        self.saved.insert(level_id.to_string(), position);
        self.writes += 1;
    }

    fn load_checkpoint(&self, level_id: &str) -> Option<Vec2> {
        self.saved.get(level_id).copied()
    }

    fn clear_checkpoint(&mut self, level_id: &str) {
        self.saved.remove(level_id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Activated,
    AlreadyActive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: EntityId,
    pub body: Body,
    pub activated: bool,
    pub level_id: String,
}

impl Checkpoint {
    pub fn new(id: EntityId, rect: Rect, level_id: impl Into<String>) -> Self {
        Self {
            id,
            body: Body::new(Vec2::new(rect.x, rect.y), rect.size(), Anchor::TopLeft),
            activated: false,
            level_id: level_id.into(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// One-way activation. The first call saves the checkpoint position; later
    /// calls do nothing.
    pub fn activate(&mut self, store: &mut dyn CheckpointStore) -> Activation {
        if self.activated {
            return Activation::AlreadyActive;
        }
        self.activated = true;
        store.save_checkpoint(&self.level_id, self.body.pos);
        tracing::debug!(
            level = %self.level_id,
            x = self.body.pos.x,
            y = self.body.pos.y,
            "checkpoint activated"
        );
        Activation::Activated
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    pub id: EntityId,
    pub body: Body,
    pub next_level: String,
    /// Cleared after the first trigger; only a level reload resets it.
    pub active: bool,
}

impl Exit {
    pub fn new(id: EntityId, rect: Rect, next_level: impl Into<String>) -> Self {
        Self {
            id,
            body: Body::new(Vec2::new(rect.x, rect.y), rect.size(), Anchor::TopLeft),
            next_level: next_level.into(),
            active: true,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Fire once. Returns the next level on the first call only.
    pub fn trigger(&mut self) -> Option<String> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(self.next_level.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    Coin,
    JumpBoost,
    SpeedBoost,
    ProjectileCharge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: EntityId,
    pub body: Body,
    pub kind: CollectibleKind,
    pub collected: bool,
}

/// Default pickup size.
pub const COLLECTIBLE_SIZE: f32 = 30.0;

impl Collectible {
    pub fn new(id: EntityId, pos: Vec2, kind: CollectibleKind) -> Self {
        Self {
            id,
            body: Body::new(pos, Vec2::splat(COLLECTIBLE_SIZE), Anchor::TopLeft),
            kind,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// One-shot pickup. Returns `false` if already collected.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        self.body.alive = false;
        true
    }
}

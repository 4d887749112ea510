use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use sanic_core::events::EventQueue;
use sanic_core::frame_simulation_boilerplate;
use sanic_core::game_trait::FrameSimulation;
use sanic_core::geometry::Rect;

use crate::camera::Camera;
use crate::collision::{self, feet_probe};
use crate::combat::{self, Contact};
use crate::config::SimConfig;
use crate::enemy::Enemy;
use crate::events::{DeathCause, SimEvent};
use crate::input::InputState;
use crate::interactables::{
    Activation, Checkpoint, CheckpointStore, Collectible, CollectibleKind, Exit,
    MemoryCheckpointStore,
};
use crate::level::{LevelDescription, LevelError};
use crate::platform::Platform;
use crate::player::{DamageOutcome, Player};
use crate::powerups::BoostKind;
use crate::projectile::{Owner, Projectile};
use crate::{EntityId, EntityKind, IdAllocator};

/// Everything that changes tick to tick. Serialized for snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub level_id: String,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub checkpoints: Vec<Checkpoint>,
    pub exits: Vec<Exit>,
    pub collectibles: Vec<Collectible>,
    pub camera: Camera,
    pub ids: IdAllocator,
    pub spawn: Vec2,
    /// Seconds of simulated wall-clock time.
    pub clock: f32,
    pub tick: u64,
    pub level_complete: bool,
}

/// Render-facing view of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub rect: Rect,
}

#[derive(Debug)]
pub enum SnapshotError {
    Encode(String),
    Decode(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "snapshot encode error: {e}"),
            Self::Decode(e) => write!(f, "snapshot decode error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// The frame-stepped simulation of one level.
pub struct World {
    config: SimConfig,
    state: SimState,
    events: EventQueue<SimEvent>,
    /// Projectiles created this tick; adopted at the end of the tick.
    spawned: Vec<Projectile>,
    store: Box<dyn CheckpointStore>,
    rng: StdRng,
    paused: bool,
}

impl World {
    /// Load `level` with an in-memory checkpoint store.
    pub fn new(config: SimConfig, level: &LevelDescription) -> Result<Self, LevelError> {
        Self::with_store(config, level, Box::new(MemoryCheckpointStore::new()))
    }

    pub fn with_store(
        config: SimConfig,
        level: &LevelDescription,
        store: Box<dyn CheckpointStore>,
    ) -> Result<Self, LevelError> {
        let state = build_state(&config, level, &*store)?;
        let rng = StdRng::seed_from_u64(config.rng_seed);
        Ok(Self {
            config,
            state,
            events: EventQueue::new(),
            spawned: Vec::new(),
            store,
            rng,
            paused: false,
        })
    }

    /// Replace the current level. Exits become active again and pending
    /// events are discarded.
    pub fn load_level(&mut self, level: &LevelDescription) -> Result<(), LevelError> {
        self.state = build_state(&self.config, level, &*self.store)?;
        self.events.clear();
        self.spawned.clear();
        Ok(())
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimState {
        &mut self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn store(&self) -> &dyn CheckpointStore {
        &*self.store
    }

    /// Remove and return the events posted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain()
    }

    /// Put the player back in play at `pos` with full lives.
    pub fn respawn(&mut self, pos: Vec2) {
        self.state.player.respawn(pos);
        self.state.camera.follow(self.state.player.body.rect().center());
        tracing::info!(x = pos.x, y = pos.y, "player respawned");
    }

    /// Last activated checkpoint for this level, else the spawn point.
    pub fn respawn_point(&self) -> Vec2 {
        self.store
            .load_checkpoint(&self.state.level_id)
            .unwrap_or(self.state.spawn)
    }

    /// Current entities, player first.
    pub fn snapshot(&self) -> Vec<EntityView> {
        let s = &self.state;
        let view = |id, kind, body: &crate::physics::Body| EntityView {
            id,
            kind,
            pos: body.pos,
            rect: body.rect(),
        };
        let mut out = Vec::with_capacity(
            1 + s.platforms.len() + s.enemies.len() + s.projectiles.len() + s.collectibles.len(),
        );
        if !s.player.dead {
            out.push(view(s.player.id, EntityKind::Player, &s.player.body));
        }
        out.extend(s.platforms.iter().map(|p| view(p.id, EntityKind::Platform, &p.body)));
        out.extend(s.enemies.iter().map(|e| view(e.id, EntityKind::Enemy, &e.body)));
        out.extend(s.projectiles.iter().map(|p| view(p.id, EntityKind::Projectile, &p.body)));
        out.extend(s.checkpoints.iter().map(|c| view(c.id, EntityKind::Checkpoint, &c.body)));
        out.extend(s.exits.iter().map(|e| view(e.id, EntityKind::Exit, &e.body)));
        out.extend(s.collectibles.iter().map(|c| view(c.id, EntityKind::Collectible, &c.body)));
        out
    }

    pub fn encode_state(&self) -> Result<Vec<u8>, SnapshotError> {
        rmp_serde::to_vec(&self.state).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    pub fn decode_state(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        self.state =
            rmp_serde::from_slice(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))?;
        Ok(())
    }

    /// Advance one tick. Events accumulate until [`World::drain_events`].
    pub fn tick(&mut self, dt: f32, input: &InputState) {
        if self.paused || self.state.level_complete {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.state.clock += dt;
        self.state.tick += 1;
        self.state.player.tick_timers(dt);

        let intent = input.intent();
        let alive = !self.state.player.dead;

        if alive {
            self.state
                .player
                .step(&intent, &self.config.physics, &self.config.combat);
        }

        self.update_enemies(dt);
        self.move_platforms();

        if alive {
            let res = collision::resolve_player(
                &mut self.state.player,
                &self.state.platforms,
                &self.config.physics,
            );
            if res.fell_to_death {
                self.kill_player(DeathCause::Fall);
            }
        }

        if !self.state.player.dead
            && let Some(aim) = intent.attack
            && let Some(shot) = combat::player_attack(
                &mut self.state.player,
                aim,
                &self.config.combat,
                &mut self.state.ids,
            )
        {
            self.post_projectile(shot);
        }

        self.enemy_contacts();
        self.update_projectiles();
        self.state.enemies.retain(Enemy::is_alive);

        if !self.state.player.dead {
            self.touch_interactables();
        }

        self.state.projectiles.append(&mut self.spawned);
        let focus = self.state.player.body.rect().center();
        self.state.camera.follow(focus);
    }

    fn update_enemies(&mut self, dt: f32) {
        let target = self.state.player.body.rect().center();
        for enemy in &mut self.state.enemies {
            if let Some(dir) = enemy.think(target, dt) {
                let shot = combat::enemy_shot(enemy, dir, &self.config.combat, &mut self.state.ids);
                self.events.push(SimEvent::CreateProjectile {
                    projectile: shot.clone(),
                });
                self.spawned.push(shot);
            }
        }
    }

    /// Move platforms, carrying the player along with the one they stand on.
    /// The carry uses the platform's displacement computed before it moves.
    fn move_platforms(&mut self) {
        let player = &mut self.state.player;
        let physics = &self.config.physics;
        for platform in self.state.platforms.iter_mut().filter(|p| p.is_moving()) {
            let delta = platform.step_delta();
            let riding = !player.dead
                && player.ground == Some(platform.id)
                && player.body.vel.y >= 0.0
                && feet_probe(&player.body.rect(), physics).overlaps_x(&platform.rect());
            if riding {
                player.body.translate(delta);
            }
            platform.advance();
        }
    }

    fn post_projectile(&mut self, shot: Projectile) {
        self.events.push(SimEvent::CreateProjectile {
            projectile: shot.clone(),
        });
        self.spawned.push(shot);
    }

    fn kill_player(&mut self, cause: DeathCause) {
        if self.state.player.die() {
            tracing::info!(?cause, "player died");
            self.events.push(SimEvent::PlayerDeath { cause });
        }
    }

    fn report_damage(&mut self, outcome: DamageOutcome) {
        match outcome {
            DamageOutcome::Ignored => {},
            DamageOutcome::Hurt => self.events.push(SimEvent::PlayerDamaged {
                lives_left: self.state.player.lives,
            }),
            DamageOutcome::Killed => {
                self.events.push(SimEvent::PlayerDamaged { lives_left: 0 });
                // die() already ran inside take_damage
                tracing::info!(cause = ?DeathCause::Damage, "player died");
                self.events.push(SimEvent::PlayerDeath {
                    cause: DeathCause::Damage,
                });
            },
        }
    }

    fn enemy_defeated(&mut self, id: EntityId) {
        let chance = self.config.combat.drop_chance;
        let chance = if chance.is_finite() { chance.clamp(0.0, 1.0) } else { 0.0 };
        let dropped_charges = if self.rng.random_bool(chance) {
            self.config.combat.drop_charges
        } else {
            0
        };
        self.state.player.add_charges(dropped_charges);
        tracing::debug!(enemy = id.0, dropped_charges, "enemy defeated");
        self.events.push(SimEvent::EnemyDefeated {
            id,
            dropped_charges,
        });
    }

    fn enemy_contacts(&mut self) {
        let mut defeated = Vec::new();
        let mut outcomes = Vec::new();
        for enemy in &mut self.state.enemies {
            match combat::enemy_contact(&mut self.state.player, enemy, &self.config.combat) {
                Contact::None => {},
                Contact::Stomp { killed } => {
                    if killed {
                        defeated.push(enemy.id);
                    }
                },
                Contact::Hit(outcome) => outcomes.push(outcome),
            }
        }
        for outcome in outcomes {
            self.report_damage(outcome);
        }
        for id in defeated {
            self.enemy_defeated(id);
        }
    }

    fn update_projectiles(&mut self) {
        let margin = self.config.combat.cull_margin;
        let mut defeated = Vec::new();
        let mut outcomes = Vec::new();

        for shot in &mut self.state.projectiles {
            shot.advance();
            if shot.is_out_of_view(&self.state.camera, margin) {
                shot.body.alive = false;
                continue;
            }
            let rect = shot.rect();
            let player = &mut self.state.player;
            if shot.can_hit(Owner::Player) && !player.dead && rect.intersects(&player.body.rect()) {
                outcomes.push(player.take_damage(shot.damage));
                shot.body.alive = false;
                continue;
            }
            if shot.can_hit(Owner::Enemy)
                && let Some(enemy) = self
                    .state
                    .enemies
                    .iter_mut()
                    .find(|e| e.is_alive() && rect.intersects(&e.body.rect()))
            {
                if enemy.take_damage(shot.damage) {
                    defeated.push(enemy.id);
                }
                shot.body.alive = false;
            }
        }
        self.state.projectiles.retain(|p| p.body.alive);

        for outcome in outcomes {
            self.report_damage(outcome);
        }
        for id in defeated {
            self.enemy_defeated(id);
        }
    }

    fn touch_interactables(&mut self) {
        let body = self.state.player.body.rect();

        for cp in &mut self.state.checkpoints {
            if body.intersects(&cp.rect())
                && cp.activate(&mut *self.store) == Activation::Activated
            {
                self.events.push(SimEvent::CheckpointActivated {
                    position: cp.body.pos,
                    level_id: cp.level_id.clone(),
                });
            }
        }

        for exit in &mut self.state.exits {
            if body.intersects(&exit.rect())
                && let Some(next_level) = exit.trigger()
            {
                tracing::info!(%next_level, "level complete");
                self.state.level_complete = true;
                self.events.push(SimEvent::LevelComplete { next_level });
            }
        }

        let combat = &self.config.combat;
        let player = &mut self.state.player;
        for item in &mut self.state.collectibles {
            if !body.intersects(&item.rect()) || !item.collect() {
                continue;
            }
            match item.kind {
                CollectibleKind::Coin => player.coins += 1,
                CollectibleKind::ProjectileCharge => player.add_charges(combat.charge_pickup),
                CollectibleKind::JumpBoost => player.boosts.grant(BoostKind::JumpBoost),
                CollectibleKind::SpeedBoost => player.boosts.grant(BoostKind::SpeedBoost),
            }
            self.events.push(SimEvent::CollectiblePicked {
                id: item.id,
                kind: item.kind,
            });
        }
        self.state.collectibles.retain(|c| !c.collected);
    }
}

fn build_state(
    config: &SimConfig,
    level: &LevelDescription,
    store: &dyn CheckpointStore,
) -> Result<SimState, LevelError> {
    level.validate()?;
    let level_id = level.level_key().to_string();
    let mut ids = IdAllocator::new();

    let spawn = level.spawn();
    let start = store.load_checkpoint(&level_id).unwrap_or(spawn);
    let player = Player::new(ids.next_id(), start, &config.player, &config.combat);

    let mut platforms = Vec::with_capacity(level.platforms.len());
    for (i, desc) in level.platforms.iter().enumerate() {
        let id = ids.next_id();
        let platform = if desc.is_moving {
            Platform::moving(id, desc.rect(), desc.motion(i)?)
        } else {
            Platform::fixed(id, desc.rect())
        };
        platforms.push(platform);
    }

    let enemies = level
        .enemies
        .iter()
        .map(|e| Enemy::new(ids.next_id(), e.to_spec()))
        .collect();
    let checkpoints = level
        .checkpoints
        .iter()
        .map(|c| {
            Checkpoint::new(
                ids.next_id(),
                Rect::new(c.x, c.y, c.width, c.height),
                level_id.clone(),
            )
        })
        .collect();
    let exits = level
        .exits
        .iter()
        .map(|e| {
            Exit::new(
                ids.next_id(),
                Rect::new(e.x, e.y, e.width, e.height),
                e.next_level.clone(),
            )
        })
        .collect();
    let collectibles = level
        .collectibles
        .iter()
        .map(|c| Collectible::new(ids.next_id(), Vec2::new(c.x, c.y), c.kind))
        .collect();

    let mut camera = Camera::new(&config.viewport);
    camera.follow(player.body.rect().center());

    tracing::info!(
        level = %level_id,
        platforms = level.platforms.len(),
        enemies = level.enemies.len(),
        "level loaded"
    );

    Ok(SimState {
        level_id,
        player,
        platforms,
        enemies,
        projectiles: Vec::new(),
        checkpoints,
        exits,
        collectibles,
        camera,
        ids,
        spawn,
        clock: 0.0,
        tick: 0,
        level_complete: false,
    })
}

impl FrameSimulation for World {
    type Input = InputState;
    type Event = SimEvent;

    fn update(&mut self, dt: f32, input: &InputState) -> Vec<SimEvent> {
        self.tick(dt, input);
        self.drain_events()
    }

    fn tick_rate(&self) -> f32 {
        self.config.tick_rate_hz
    }

    frame_simulation_boilerplate!(state_type: SimState);
}

use glam::Vec2;
use serde::{Deserialize, Serialize};

use sanic_core::geometry::{Anchor, facing_sign};
use sanic_core::timer::{Cooldown, TimedWindow};

use crate::EntityId;
use crate::config::{CombatConfig, PhysicsConfig, PlayerConfig};
use crate::input::PlayerIntent;
use crate::physics::{Body, integrate};
use crate::powerups::Boosts;

/// Result of a damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// No effect (invulnerable, already dead, or non-positive amount).
    Ignored,
    /// Lives lost; invulnerability started.
    Hurt,
    /// Lives reached zero.
    Killed,
}

/// Dash burst state: the active window and the recharge gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashState {
    /// Dash velocity in units of horizontal acceleration.
    pub multiplier: f32,
    pub window: TimedWindow,
    pub cooldown: Cooldown,
}

impl DashState {
    fn new(cfg: &PlayerConfig) -> Self {
        Self {
            multiplier: cfg.dash_multiplier,
            window: TimedWindow::new(cfg.dash_duration_secs),
            cooldown: Cooldown::new(cfg.dash_cooldown_secs),
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.window.is_active()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    pub lives: u32,
    pub max_lives: u32,
    pub invulnerability: TimedWindow,
    pub dash: DashState,
    pub airborne: bool,
    /// Smallest y reached since leaving the ground.
    pub highest_y: f32,
    /// Platform the player landed on at the last resolution.
    pub ground: Option<EntityId>,
    pub coins: u32,
    pub charges: u32,
    /// 1.0 facing right, -1.0 facing left.
    pub facing: f32,
    pub attack_cooldown: Cooldown,
    pub boosts: Boosts,
    pub dead: bool,
}

impl Player {
    pub fn new(id: EntityId, spawn: Vec2, cfg: &PlayerConfig, combat: &CombatConfig) -> Self {
        Self {
            id,
            body: Body::new(spawn, Vec2::new(cfg.width, cfg.height), Anchor::MidBottom),
            lives: cfg.max_lives,
            max_lives: cfg.max_lives,
            invulnerability: TimedWindow::new(cfg.invulnerability_secs),
            dash: DashState::new(cfg),
            airborne: true,
            highest_y: spawn.y,
            ground: None,
            coins: 0,
            charges: cfg.starting_charges,
            facing: 1.0,
            attack_cooldown: Cooldown::new(combat.attack_cooldown_secs),
            boosts: Boosts::default(),
            dead: false,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability.is_active()
    }

    /// Advance wall-clock timers by `dt` seconds.
    pub fn tick_timers(&mut self, dt: f32) {
        self.invulnerability.tick(dt);
        self.dash.window.tick(dt);
        self.dash.cooldown.tick(dt);
        self.attack_cooldown.tick(dt);
        self.boosts.tick(dt);
    }

    /// Turn intent into acceleration and impulses, then integrate one tick.
    pub fn step(&mut self, intent: &PlayerIntent, physics: &PhysicsConfig, combat: &CombatConfig) {
        self.body.acc = Vec2::new(0.0, physics.gravity);
        let acc_x = physics.acceleration * self.boosts.acceleration_multiplier(combat);

        if intent.move_x < 0.0 && self.body.pos.x > 0.0 {
            self.body.acc.x = -acc_x;
            self.facing = -1.0;
            if intent.dash {
                self.try_dash(-physics.acceleration);
            }
        } else if intent.move_x > 0.0 {
            self.body.acc.x = acc_x;
            self.facing = 1.0;
            if intent.dash {
                self.try_dash(physics.acceleration);
            }
        }

        if intent.jump && !self.airborne {
            self.body.vel.y = -physics.jump_velocity * self.boosts.jump_multiplier(combat);
            self.airborne = true;
            self.ground = None;
        }

        integrate(&mut self.body, physics.friction);

        if self.airborne {
            self.highest_y = self.highest_y.min(self.body.pos.y);
        }
    }

    /// Burst of horizontal velocity, gated by the dash cooldown.
    fn try_dash(&mut self, signed_acc: f32) -> bool {
        if !self.dash.cooldown.is_ready() {
            return false;
        }
        self.body.vel.x = self.dash.multiplier * signed_acc;
        self.dash.window.close();
        self.dash.window.open();
        self.dash.cooldown.trigger();
        tracing::debug!(vx = self.body.vel.x, "dash");
        true
    }

    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if amount == 0 || self.dead || self.is_invulnerable() {
            return DamageOutcome::Ignored;
        }
        self.lives = self.lives.saturating_sub(amount);
        if self.lives == 0 {
            self.die();
            DamageOutcome::Killed
        } else {
            self.invulnerability.open();
            DamageOutcome::Hurt
        }
    }

    /// Enter the terminal dead state. Returns `false` if already dead.
    pub fn die(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        self.body.alive = false;
        self.body.vel = Vec2::ZERO;
        self.body.acc = Vec2::ZERO;
        true
    }

    pub fn add_charges(&mut self, n: u32) {
        self.charges = self.charges.saturating_add(n);
    }

    /// Spend one projectile charge. Returns `false` when none are left.
    pub fn spend_charge(&mut self) -> bool {
        if self.charges == 0 {
            return false;
        }
        self.charges -= 1;
        true
    }

    /// Face toward a horizontal offset (used for knockback and aiming).
    pub fn face(&mut self, dx: f32) {
        if dx != 0.0 {
            self.facing = facing_sign(dx);
        }
    }

    /// Fall distance below the airborne apex.
    pub fn fall_distance(&self) -> f32 {
        self.body.pos.y - self.highest_y
    }

    /// Land on a surface at `top`: snap feet, stop falling, reset the fall
    /// baseline.
    pub fn land(&mut self, top: f32, platform: EntityId) {
        self.body.pos.y = top;
        self.body.vel.y = 0.0;
        self.body.sync_rect();
        self.airborne = false;
        self.highest_y = top;
        self.ground = Some(platform);
    }

    /// Reset to a fresh state at `pos` keeping inventory.
    pub fn respawn(&mut self, pos: Vec2) {
        self.body.vel = Vec2::ZERO;
        self.body.acc = Vec2::ZERO;
        self.body.alive = true;
        self.body.set_pos(pos);
        self.lives = self.max_lives;
        self.invulnerability.close();
        self.dash.window.close();
        self.boosts.clear();
        self.airborne = true;
        self.highest_y = pos.y;
        self.ground = None;
        self.dead = false;
    }
}

use glam::Vec2;
use serde::{Deserialize, Serialize};

use sanic_core::geometry::{Anchor, RIGHT, direction_or, facing_sign};

use crate::EntityId;
use crate::physics::{Body, integrate};

/// Only turrets and bosses fire projectiles; every other kind is melee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    #[default]
    Turret,
    Boss,
    #[serde(other)]
    Melee,
}

impl EnemyKind {
    pub fn is_ranged(self) -> bool {
        matches!(self, EnemyKind::Turret | EnemyKind::Boss)
    }
}

/// Per-tick behavior. Re-evaluated every tick from distances; nothing is
/// committed beyond the patrol index and the attack timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    #[default]
    Stationary,
    Patrol,
    Chase,
    Boss,
}

/// Horizontal gap the boss keeps before closing in.
const BOSS_FOLLOW_GAP: f32 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub body: Body,
    pub kind: EnemyKind,
    pub behavior: Behavior,
    pub health: u32,
    pub damage: u32,
    pub speed: f32,
    pub detection_radius: f32,
    pub attack_range: f32,
    pub attack_interval: f32,
    pub attack_timer: f32,
    pub patrol_points: Vec<Vec2>,
    pub current_patrol_point: usize,
    /// 1 facing right, -1 facing left.
    pub facing: f32,
    pub detected_player: bool,
}

/// Spawn parameters for an enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemySpec {
    pub kind: EnemyKind,
    pub behavior: Behavior,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub damage: u32,
    pub speed: f32,
    pub detection_radius: f32,
    pub attack_range: f32,
    pub attack_interval: f32,
    pub patrol_points: Vec<Vec2>,
}

impl Default for EnemySpec {
    fn default() -> Self {
        Self {
            kind: EnemyKind::Turret,
            behavior: Behavior::Stationary,
            pos: Vec2::ZERO,
            size: Vec2::new(50.0, 50.0),
            health: 1,
            damage: 1,
            speed: 1.5,
            detection_radius: 200.0,
            attack_range: 300.0,
            attack_interval: 0.3,
            patrol_points: Vec::new(),
        }
    }
}

impl Enemy {
    pub fn new(id: EntityId, spec: EnemySpec) -> Self {
        Self {
            id,
            body: Body::new(spec.pos, spec.size, Anchor::Center),
            kind: spec.kind,
            behavior: spec.behavior,
            health: spec.health,
            damage: spec.damage,
            speed: spec.speed,
            detection_radius: spec.detection_radius,
            attack_range: spec.attack_range,
            attack_interval: spec.attack_interval,
            attack_timer: 0.0,
            patrol_points: spec.patrol_points,
            current_patrol_point: 0,
            facing: 1.0,
            detected_player: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.body.alive
    }

    /// Run this tick's behavior against the player's position. Returns the
    /// direction of a projectile to fire, if any.
    ///
    /// Behaviors pick a velocity and the integrator moves the body. Enemies
    /// feel no gravity or drag and never collide with platforms.
    pub fn think(&mut self, target: Vec2, dt: f32) -> Option<Vec2> {
        if !self.is_alive() {
            return None;
        }
        self.body.vel = Vec2::ZERO;
        let fire = match self.behavior {
            Behavior::Stationary => self.ranged_attack(target, dt),
            Behavior::Patrol => {
                self.patrol();
                None
            },
            Behavior::Chase => {
                self.chase(target);
                None
            },
            Behavior::Boss => {
                self.follow_horizontally(target);
                let fire = self.ranged_attack(target, dt);
                self.detected_player = self.body.pos.distance(target) <= self.detection_radius;
                fire
            },
        };
        self.body.acc = Vec2::ZERO;
        integrate(&mut self.body, 0.0);
        fire
    }

    fn patrol(&mut self) {
        if self.patrol_points.is_empty() {
            return;
        }
        let idx = self.current_patrol_point % self.patrol_points.len();
        let target = self.patrol_points[idx];
        let to_target = target - self.body.pos;

        if to_target.length() <= self.speed {
            // snap; no velocity left to integrate
            self.body.pos = target;
            self.current_patrol_point = (idx + 1) % self.patrol_points.len();
        } else {
            self.body.vel = direction_or(to_target, RIGHT) * self.speed;
            self.facing = facing_sign(self.body.vel.x);
        }
    }

    fn chase(&mut self, target: Vec2) {
        let to_player = target - self.body.pos;
        self.detected_player = to_player.length() <= self.detection_radius;
        if !self.detected_player || to_player.length_squared() <= f32::EPSILON {
            return;
        }
        self.body.vel = direction_or(to_player, RIGHT) * self.speed;
        self.facing = facing_sign(self.body.vel.x);
    }

    fn follow_horizontally(&mut self, target: Vec2) {
        let dx = target.x - self.body.pos.x;
        if dx.abs() > BOSS_FOLLOW_GAP {
            let dir = facing_sign(dx);
            self.body.vel.x = dir * self.speed;
            self.facing = dir;
        }
    }

    /// Count up while the player is in range; fire each time the interval
    /// elapses. Melee kinds go through the motions without a projectile.
    fn ranged_attack(&mut self, target: Vec2, dt: f32) -> Option<Vec2> {
        if self.body.pos.distance(target) > self.attack_range {
            return None;
        }
        if dt > 0.0 {
            self.attack_timer += dt;
        }
        if self.attack_timer < self.attack_interval {
            return None;
        }
        self.attack_timer = 0.0;
        if !self.kind.is_ranged() {
            return None;
        }
        Some(direction_or(target - self.body.pos, RIGHT))
    }

    /// Apply damage. Returns `true` on the hit that kills.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if amount == 0 || !self.is_alive() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.body.alive = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(spec: EnemySpec) -> Enemy {
        Enemy::new(EntityId(10), spec)
    }

    #[test]
    fn patrol_flips_after_reaching_waypoint() {
        let mut e = enemy(EnemySpec {
            behavior: Behavior::Patrol,
            kind: EnemyKind::Melee,
            pos: Vec2::new(0.0, 300.0),
            speed: 2.0,
            patrol_points: vec![Vec2::new(0.0, 300.0), Vec2::new(100.0, 300.0)],
            ..Default::default()
        });
        e.current_patrol_point = 1;
        for tick in 1..=50 {
            e.think(Vec2::new(5000.0, 0.0), 1.0 / 60.0);
            if tick < 50 {
                assert_eq!(e.current_patrol_point, 1, "tick {tick}");
                assert_eq!(e.facing, 1.0);
            }
        }
        assert_eq!(e.current_patrol_point, 0);
        assert_eq!(e.body.pos, Vec2::new(100.0, 300.0));

        e.think(Vec2::ZERO, 1.0 / 60.0);
        assert_eq!(e.facing, -1.0);
        assert_eq!(e.body.pos.x, 98.0);
    }

    #[test]
    fn behavior_velocity_drives_the_body() {
        let mut e = enemy(EnemySpec {
            behavior: Behavior::Chase,
            kind: EnemyKind::Melee,
            pos: Vec2::new(0.0, 0.0),
            speed: 2.0,
            detection_radius: 500.0,
            ..Default::default()
        });
        e.think(Vec2::new(100.0, 0.0), 0.1);
        assert_eq!(e.body.vel, Vec2::new(2.0, 0.0));
        assert_eq!(e.body.pos, Vec2::new(2.0, 0.0));
        assert!(e.body.rect_is_fresh());

        // out of range: velocity drops back to zero
        e.think(Vec2::new(5000.0, 0.0), 0.1);
        assert_eq!(e.body.vel, Vec2::ZERO);
        assert_eq!(e.body.pos, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn enemies_hover_without_support() {
        let mut e = enemy(EnemySpec {
            pos: Vec2::new(400.0, 100.0),
            attack_range: 10.0,
            ..Default::default()
        });
        for _ in 0..120 {
            e.think(Vec2::new(4000.0, 4000.0), 1.0 / 60.0);
        }
        assert_eq!(e.body.pos, Vec2::new(400.0, 100.0));
        assert_eq!(e.body.vel, Vec2::ZERO);
    }

    #[test]
    fn patrol_without_points_stays_put() {
        let mut e = enemy(EnemySpec {
            behavior: Behavior::Patrol,
            pos: Vec2::new(10.0, 10.0),
            ..Default::default()
        });
        e.think(Vec2::ZERO, 0.1);
        assert_eq!(e.body.pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn chase_only_inside_detection_radius() {
        let mut e = enemy(EnemySpec {
            behavior: Behavior::Chase,
            pos: Vec2::ZERO,
            speed: 3.0,
            detection_radius: 100.0,
            ..Default::default()
        });
        e.think(Vec2::new(150.0, 0.0), 0.1);
        assert_eq!(e.body.pos, Vec2::ZERO);
        assert!(!e.detected_player);

        e.think(Vec2::new(-80.0, 0.0), 0.1);
        assert_eq!(e.body.pos, Vec2::new(-3.0, 0.0));
        assert_eq!(e.facing, -1.0);
        assert!(e.detected_player);
    }

    #[test]
    fn chase_on_top_of_player_does_not_nan() {
        let mut e = enemy(EnemySpec {
            behavior: Behavior::Chase,
            pos: Vec2::new(40.0, 40.0),
            ..Default::default()
        });
        e.think(Vec2::new(40.0, 40.0), 0.1);
        assert_eq!(e.body.pos, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn turret_fires_on_interval_in_range() {
        let mut e = enemy(EnemySpec {
            pos: Vec2::ZERO,
            attack_interval: 0.3,
            attack_range: 300.0,
            ..Default::default()
        });
        assert_eq!(e.think(Vec2::new(100.0, 0.0), 0.2), None);
        let dir = e.think(Vec2::new(100.0, 0.0), 0.2);
        assert_eq!(dir, Some(Vec2::new(1.0, 0.0)));
        assert_eq!(e.attack_timer, 0.0);
    }

    #[test]
    fn turret_holds_fire_out_of_range() {
        let mut e = enemy(EnemySpec::default());
        for _ in 0..10 {
            assert_eq!(e.think(Vec2::new(1000.0, 0.0), 0.5), None);
        }
        assert_eq!(e.attack_timer, 0.0);
    }

    #[test]
    fn turret_on_player_fires_right() {
        let mut e = enemy(EnemySpec {
            attack_interval: 0.0,
            ..Default::default()
        });
        assert_eq!(e.think(Vec2::ZERO, 0.1), Some(RIGHT));
    }

    #[test]
    fn melee_never_fires() {
        let mut e = enemy(EnemySpec {
            kind: EnemyKind::Melee,
            attack_interval: 0.1,
            ..Default::default()
        });
        for _ in 0..10 {
            assert_eq!(e.think(Vec2::new(50.0, 0.0), 0.2), None);
        }
    }

    #[test]
    fn boss_closes_horizontal_gap_and_fires() {
        let mut e = enemy(EnemySpec {
            kind: EnemyKind::Boss,
            behavior: Behavior::Boss,
            pos: Vec2::new(0.0, 0.0),
            speed: 4.0,
            attack_interval: 0.1,
            ..Default::default()
        });
        let fired = e.think(Vec2::new(200.0, 0.0), 0.1);
        assert_eq!(e.body.pos.x, 4.0);
        assert!(fired.is_some());

        // inside the gap only the attack runs
        let mut near = enemy(EnemySpec {
            behavior: Behavior::Boss,
            kind: EnemyKind::Boss,
            ..Default::default()
        });
        near.think(Vec2::new(30.0, 0.0), 0.0);
        assert_eq!(near.body.pos.x, 0.0);
    }

    #[test]
    fn damage_clamps_and_kills_once() {
        let mut e = enemy(EnemySpec {
            health: 2,
            ..Default::default()
        });
        assert!(!e.take_damage(0));
        assert!(!e.take_damage(1));
        assert_eq!(e.health, 1);
        assert!(e.take_damage(10));
        assert_eq!(e.health, 0);
        assert!(!e.is_alive());
        assert!(!e.take_damage(1));
        assert_eq!(e.think(Vec2::ZERO, 1.0), None);

        let mut boss = enemy(EnemySpec {
            health: 5,
            ..Default::default()
        });
        assert!(boss.take_damage(u32::MAX));
        assert_eq!(boss.health, 0);
    }

    #[test]
    fn kind_parses_unknown_as_melee() {
        let k: EnemyKind = serde_json::from_str("\"goblin\"").unwrap();
        assert_eq!(k, EnemyKind::Melee);
        let k: EnemyKind = serde_json::from_str("\"boss\"").unwrap();
        assert_eq!(k, EnemyKind::Boss);
    }
}

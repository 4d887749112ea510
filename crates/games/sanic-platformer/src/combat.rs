use glam::Vec2;

use sanic_core::geometry::{direction_or, facing_sign};

use crate::IdAllocator;
use crate::config::CombatConfig;
use crate::enemy::Enemy;
use crate::input::Aim;
use crate::player::{DamageOutcome, Player};
use crate::projectile::{Owner, Projectile};

/// Try to fire a player projectile.
///
/// Needs a ready attack cooldown and a projectile charge. When either is
/// missing nothing is spent and the cooldown keeps its current value.
pub fn player_attack(
    player: &mut Player,
    aim: Aim,
    combat: &CombatConfig,
    ids: &mut IdAllocator,
) -> Option<Projectile> {
    if player.dead || !player.attack_cooldown.is_ready() {
        return None;
    }
    if !player.spend_charge() {
        return None;
    }

    let facing = Vec2::new(player.facing, 0.0);
    let dir = match aim {
        Aim::Facing => facing,
        Aim::Direction(d) => direction_or(d, facing),
    };
    player.face(dir.x);
    player.attack_cooldown.trigger();

    let origin = player.body.rect().center() + dir * combat.spawn_offset;
    Some(Projectile::new(
        ids.next_id(),
        origin,
        dir,
        combat.projectile_speed,
        combat.projectile_damage,
        Vec2::splat(combat.projectile_size),
        Owner::Player,
    ))
}

/// Build an enemy projectile fired along `dir`.
pub fn enemy_shot(
    enemy: &Enemy,
    dir: Vec2,
    combat: &CombatConfig,
    ids: &mut IdAllocator,
) -> Projectile {
    Projectile::new(
        ids.next_id(),
        enemy.body.pos,
        dir,
        enemy.speed,
        enemy.damage,
        Vec2::from(combat.enemy_projectile_size),
        Owner::Enemy,
    )
}

/// What happened when the player touched an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    /// Player landed on the enemy from above.
    Stomp { killed: bool },
    /// Enemy hurt (or tried to hurt) the player.
    Hit(DamageOutcome),
}

/// Resolve body contact between the player and one enemy.
pub fn enemy_contact(player: &mut Player, enemy: &mut Enemy, combat: &CombatConfig) -> Contact {
    if player.dead || !enemy.is_alive() {
        return Contact::None;
    }
    let pr = player.body.rect();
    let er = enemy.body.rect();
    if !pr.intersects(&er) {
        return Contact::None;
    }

    if pr.bottom() <= er.top() + combat.stomp_tolerance && player.body.vel.y > 0.0 {
        let killed = enemy.take_damage(1);
        player.body.vel.y = -combat.stomp_bounce;
        return Contact::Stomp { killed };
    }

    let outcome = player.take_damage(enemy.damage);
    if outcome != DamageOutcome::Killed {
        player.body.vel.x = facing_sign(player.body.pos.x - enemy.body.pos.x) * combat.knockback;
    }
    Contact::Hit(outcome)
}

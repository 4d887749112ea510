use sanic_core::geometry::Rect;

use crate::EntityId;
use crate::config::PhysicsConfig;
use crate::physics::Body;
use crate::platform::Platform;
use crate::player::Player;

/// Thin strip under the body used for landing checks.
pub fn feet_probe(rect: &Rect, physics: &PhysicsConfig) -> Rect {
    let w = rect.w * physics.feet_probe_ratio;
    let h = physics.probe_thickness;
    Rect::new(rect.center().x - w / 2.0, rect.bottom() - h, w, h)
}

pub fn left_probe(rect: &Rect, physics: &PhysicsConfig) -> Rect {
    let h = rect.h * physics.side_probe_ratio;
    Rect::new(rect.left(), rect.center().y - h / 2.0, physics.probe_thickness, h)
}

pub fn right_probe(rect: &Rect, physics: &PhysicsConfig) -> Rect {
    let h = rect.h * physics.side_probe_ratio;
    let w = physics.probe_thickness;
    Rect::new(rect.right() - w, rect.center().y - h / 2.0, w, h)
}

/// What the resolver did to the player this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    pub landed_on: Option<EntityId>,
    pub blocked_by: Option<EntityId>,
    pub fell_to_death: bool,
}

/// Find the first platform whose top strip the falling body's feet touch.
/// Returns the platform id and the top to snap to.
pub fn find_landing(
    body: &Body,
    platforms: &[Platform],
    physics: &PhysicsConfig,
) -> Option<(EntityId, f32)> {
    if body.vel.y <= 0.0 {
        return None;
    }
    let feet = feet_probe(&body.rect(), physics);
    platforms
        .iter()
        .find(|p| feet.intersects(&p.top_strip(physics.probe_thickness)))
        .map(|p| (p.id, p.rect().top()))
}

/// Stop horizontal motion against the first wall hit. Only moving into a wall
/// counts; the body is placed flush against the edge.
///
/// The wall edge strip is as deep as this tick's horizontal travel, so a fast
/// body cannot skip over it.
pub fn resolve_sides(
    body: &mut Body,
    platforms: &[Platform],
    physics: &PhysicsConfig,
) -> Option<EntityId> {
    let rect = body.rect();
    let half_w = body.size.x / 2.0;
    let t = physics.probe_thickness + body.vel.x.abs() + body.acc.x.abs();

    let hit = if body.vel.x > 0.0 {
        let probe = right_probe(&rect, physics);
        platforms
            .iter()
            .find(|p| probe.intersects(&p.left_strip(t)))
            .map(|p| (p.id, p.rect().left() - half_w))
    } else if body.vel.x < 0.0 {
        let probe = left_probe(&rect, physics);
        platforms
            .iter()
            .find(|p| probe.intersects(&p.right_strip(t)))
            .map(|p| (p.id, p.rect().right() + half_w))
    } else {
        None
    };

    let (id, x) = hit?;
    body.pos.x = x;
    body.vel.x = 0.0;
    body.sync_rect();
    Some(id)
}

/// Resolve the player against every platform: fall death, landing, then one
/// side block.
pub fn resolve_player(
    player: &mut Player,
    platforms: &[Platform],
    physics: &PhysicsConfig,
) -> Resolution {
    player.body.sync_rect();
    let mut out = Resolution::default();

    if player.airborne
        && player.body.vel.y > 0.0
        && player.fall_distance() > physics.fall_death_distance
    {
        out.fell_to_death = true;
        return out;
    }

    match find_landing(&player.body, platforms, physics) {
        Some((id, top)) => {
            player.land(top, id);
            out.landed_on = Some(id);
        },
        None => {
            player.ground = None;
            player.airborne = true;
        },
    }

    out.blocked_by = resolve_sides(&mut player.body, platforms, physics);
    out
}

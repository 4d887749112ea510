use glam::Vec2;
use serde::{Deserialize, Serialize};

use sanic_core::geometry::{Anchor, Rect};

/// Kinematic state shared by every simulated entity.
///
/// `pos` is the point named by `anchor`. The cached rectangle is only valid
/// after [`Body::sync_rect`]; every mutation path in the tick loop ends with a
/// sync before anything queries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    pub size: Vec2,
    pub anchor: Anchor,
    pub alive: bool,
    rect: Rect,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, anchor: Anchor) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            size,
            anchor,
            alive: true,
            rect: Rect::anchored(pos, size, anchor),
        }
    }

    /// Recompute the rectangle from the current position.
    pub fn sync_rect(&mut self) {
        self.rect = Rect::anchored(self.pos, self.size, self.anchor);
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Move to `pos` and resync.
    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
        self.sync_rect();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
        self.sync_rect();
    }

    /// Whether the cached rectangle matches the position.
    pub fn rect_is_fresh(&self) -> bool {
        self.rect == Rect::anchored(self.pos, self.size, self.anchor)
    }
}

/// One integration step with velocity-proportional drag.
///
/// The order is fixed: drag folds into acceleration first (y then x), velocity
/// takes the full acceleration, and position advances by the new velocity plus
/// half the acceleration. `friction` is negative.
pub fn integrate(body: &mut Body, friction: f32) {
    body.acc.y += body.vel.y * friction;
    body.acc.x += body.vel.x * friction;
    body.vel += body.acc;
    body.pos += body.vel + 0.5 * body.acc;
    body.sync_rect();
}

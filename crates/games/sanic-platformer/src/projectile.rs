use glam::Vec2;
use serde::{Deserialize, Serialize};

use sanic_core::geometry::{Anchor, RIGHT, Rect, direction_or};

use crate::EntityId;
use crate::camera::Camera;
use crate::physics::Body;

/// Which faction fired a projectile. A projectile never hurts its own side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub body: Body,
    /// Unit vector.
    pub dir: Vec2,
    pub speed: f32,
    pub damage: u32,
    pub owner: Owner,
}

impl Projectile {
    /// `dir` need not be normalized; a zero or non-finite direction fires
    /// to the right.
    pub fn new(
        id: EntityId,
        pos: Vec2,
        dir: Vec2,
        speed: f32,
        damage: u32,
        size: Vec2,
        owner: Owner,
    ) -> Self {
        Self {
            id,
            body: Body::new(pos, size, Anchor::Center),
            dir: direction_or(dir, RIGHT),
            speed,
            damage,
            owner,
        }
    }

    pub fn advance(&mut self) {
        self.body.translate(self.dir * self.speed);
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Whether this projectile may damage a target belonging to `side`.
    pub fn can_hit(&self, side: Owner) -> bool {
        self.owner != side
    }

    pub fn is_out_of_view(&self, camera: &Camera, margin: f32) -> bool {
        !camera.keeps(self.body.pos, margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewportConfig;

    fn shot(dir: Vec2, owner: Owner) -> Projectile {
        Projectile::new(
            EntityId(5),
            Vec2::new(100.0, 100.0),
            dir,
            10.0,
            1,
            Vec2::splat(10.0),
            owner,
        )
    }

    #[test]
    fn direction_is_normalized() {
        let p = shot(Vec2::new(0.0, -4.0), Owner::Player);
        assert_eq!(p.dir, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn zero_direction_falls_back_right() {
        let mut p = shot(Vec2::ZERO, Owner::Enemy);
        assert_eq!(p.dir, RIGHT);
        p.advance();
        assert_eq!(p.body.pos, Vec2::new(110.0, 100.0));
        assert!(p.body.rect_is_fresh());
    }

    #[test]
    fn owner_cannot_hit_own_side() {
        let p = shot(RIGHT, Owner::Enemy);
        assert!(p.can_hit(Owner::Player));
        assert!(!p.can_hit(Owner::Enemy));
    }

    #[test]
    fn culled_past_margin() {
        let cam = Camera::new(&ViewportConfig::default());
        let mut p = shot(RIGHT, Owner::Player);
        p.body.set_pos(Vec2::new(1245.0, 100.0));
        assert!(!p.is_out_of_view(&cam, 50.0));
        p.advance();
        assert!(p.is_out_of_view(&cam, 50.0));
    }
}

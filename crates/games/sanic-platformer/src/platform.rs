use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use sanic_core::geometry::{Anchor, Rect};

use crate::EntityId;
use crate::physics::Body;

/// Axis a linear platform travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// X when the endpoints differ horizontally, otherwise Y.
    pub fn between(a: Vec2, b: Vec2) -> Self {
        if a.x != b.x { Axis::X } else { Axis::Y }
    }

    fn get(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    fn set(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }
}

/// How a platform moves each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    Static,
    /// Ping-pong between two top-left positions. `coeff` is +1 while heading
    /// to `endpoints[1]` and -1 while heading back to `endpoints[0]`.
    Linear {
        endpoints: [Vec2; 2],
        speed: f32,
        wait_time: f32,
        coeff: f32,
    },
    /// Orbit of the platform center around `center`.
    Circular {
        center: Vec2,
        radius: f32,
        angular_speed: f32,
        angle: f32,
        clockwise: bool,
    },
}

/// Advance `pos` one tick along the segment `endpoints[0] -> endpoints[1]`
/// and return the new coefficient.
///
/// The platform stops exactly on an endpoint and the coefficient flips on that
/// same tick. A position outside the segment heads back toward it. `wait_time`
/// is accepted but does not pause motion.
pub fn move_linear(
    pos: &mut Vec2,
    axis: Axis,
    endpoints: [Vec2; 2],
    speed: f32,
    _wait_time: f32,
    coeff: f32,
) -> f32 {
    let mut coeff = if coeff < 0.0 { -1.0 } else { 1.0 };
    if !speed.is_finite() || speed <= 0.0 {
        return coeff;
    }

    let start = axis.get(endpoints[0]);
    let end = axis.get(endpoints[1]);
    let sign = if end >= start { 1.0 } else { -1.0 };
    let length = (end - start).abs();

    // progress along the segment, 0 at endpoints[0]
    let mut t = (axis.get(*pos) - start) * sign;
    if t < 0.0 {
        coeff = 1.0;
    } else if t > length {
        coeff = -1.0;
    }

    let target = if coeff > 0.0 { length } else { 0.0 };
    if (target - t).abs() <= speed {
        t = target;
        coeff = -coeff;
    } else {
        t += coeff * speed;
    }

    axis.set(pos, start + t * sign);
    coeff
}

/// Offset of the orbiting point from the orbit center at `angle`.
/// Clockwise orbits keep the sine term positive (y grows downward).
pub fn circular_offset(radius: f32, angle: f32, clockwise: bool) -> Vec2 {
    let s = if clockwise { 1.0 } else { -1.0 };
    Vec2::new(radius * angle.cos(), s * radius * angle.sin())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: EntityId,
    pub body: Body,
    pub motion: Motion,
}

impl Platform {
    pub fn fixed(id: EntityId, rect: Rect) -> Self {
        Self {
            id,
            body: Body::new(Vec2::new(rect.x, rect.y), rect.size(), Anchor::TopLeft),
            motion: Motion::Static,
        }
    }

    pub fn moving(id: EntityId, rect: Rect, motion: Motion) -> Self {
        let motion = match motion {
            // Start at the angle matching the authored position
            Motion::Circular {
                center,
                radius,
                angular_speed,
                clockwise,
                ..
            } => {
                let rel = rect.center() - center;
                let s = if clockwise { 1.0 } else { -1.0 };
                let angle = if rel.length_squared() > f32::EPSILON {
                    (s * rel.y).atan2(rel.x)
                } else {
                    0.0
                };
                Motion::Circular {
                    center,
                    radius,
                    angular_speed,
                    angle,
                    clockwise,
                }
            },
            other => other,
        };
        Self {
            id,
            body: Body::new(Vec2::new(rect.x, rect.y), rect.size(), Anchor::TopLeft),
            motion,
        }
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn is_moving(&self) -> bool {
        !matches!(self.motion, Motion::Static)
    }

    /// Thin strip along the top edge used for landing checks.
    pub fn top_strip(&self, thickness: f32) -> Rect {
        let r = self.rect();
        Rect::new(r.x, r.y, r.w, thickness.min(r.h))
    }

    pub fn left_strip(&self, thickness: f32) -> Rect {
        let r = self.rect();
        Rect::new(r.x, r.y, thickness.min(r.w), r.h)
    }

    pub fn right_strip(&self, thickness: f32) -> Rect {
        let r = self.rect();
        let t = thickness.min(r.w);
        Rect::new(r.right() - t, r.y, t, r.h)
    }

    /// Compute where the platform will be after this tick without moving it.
    /// Returns the new top-left position and motion state.
    pub fn peek_step(&self) -> (Vec2, Motion) {
        let mut pos = self.body.pos;
        let motion = match self.motion.clone() {
            Motion::Static => Motion::Static,
            Motion::Linear {
                endpoints,
                speed,
                wait_time,
                coeff,
            } => {
                let axis = Axis::between(endpoints[0], endpoints[1]);
                let coeff = move_linear(&mut pos, axis, endpoints, speed, wait_time, coeff);
                Motion::Linear {
                    endpoints,
                    speed,
                    wait_time,
                    coeff,
                }
            },
            Motion::Circular {
                center,
                radius,
                angular_speed,
                angle,
                clockwise,
            } => {
                let angle = (angle + angular_speed).rem_euclid(TAU);
                let platform_center = center + circular_offset(radius, angle, clockwise);
                pos = platform_center - self.body.size / 2.0;
                Motion::Circular {
                    center,
                    radius,
                    angular_speed,
                    angle,
                    clockwise,
                }
            },
        };
        (pos, motion)
    }

    /// Per-tick displacement computed from the current (pre-move) state.
    pub fn step_delta(&self) -> Vec2 {
        self.peek_step().0 - self.body.pos
    }

    /// Move one tick. Returns the displacement applied.
    pub fn advance(&mut self) -> Vec2 {
        let (pos, motion) = self.peek_step();
        let delta = pos - self.body.pos;
        self.motion = motion;
        self.body.set_pos(pos);
        delta
    }
}

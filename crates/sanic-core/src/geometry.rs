use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which point of a rectangle an entity's position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// Position is the middle of the bottom edge (feet).
    MidBottom,
    /// Position is the rectangle center.
    Center,
    /// Position is the top-left corner.
    TopLeft,
}

/// Axis-aligned rectangle in y-down screen space.
///
/// `x`/`y` is the top-left corner. Overlap tests are strict: rectangles that
/// only share an edge do not intersect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build the rectangle of size `size` whose `anchor` point sits at `pos`.
    pub fn anchored(pos: Vec2, size: Vec2, anchor: Anchor) -> Self {
        match anchor {
            Anchor::MidBottom => Self::new(pos.x - size.x / 2.0, pos.y - size.y, size.x, size.y),
            Anchor::Center => Self::new(pos.x - size.x / 2.0, pos.y - size.y / 2.0, size.x, size.y),
            Anchor::TopLeft => Self::new(pos.x, pos.y, size.x, size.y),
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Horizontal extents overlap (vertical position ignored).
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.w + 2.0 * margin,
            self.h + 2.0 * margin,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}

/// Normalize `v`, falling back to `fallback` when `v` has no usable direction.
///
/// Covers zero-length vectors (two entities at the same spot) and non-finite
/// input so callers never see NaN.
pub fn direction_or(v: Vec2, fallback: Vec2) -> Vec2 {
    let len_sq = v.length_squared();
    if len_sq > f32::EPSILON && len_sq.is_finite() {
        v / len_sq.sqrt()
    } else {
        fallback
    }
}

/// Unit vector pointing right; the default facing.
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);

/// Sign of `dx` as a facing value: `1.0` when positive, else `-1.0`.
pub fn facing_sign(dx: f32) -> f32 {
    if dx > 0.0 { 1.0 } else { -1.0 }
}

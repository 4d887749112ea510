use glam::Vec2;
use serde::{Deserialize, Serialize};

use sanic_core::geometry::Rect;

use crate::config::ViewportConfig;

/// World-space rectangle currently on screen. Follows a target so that it
/// sits in the middle of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub view: Rect,
}

impl Camera {
    pub fn new(viewport: &ViewportConfig) -> Self {
        Self {
            view: Rect::new(0.0, 0.0, viewport.width, viewport.height),
        }
    }

    pub fn follow(&mut self, target: Vec2) {
        self.view.x = target.x - self.view.w / 2.0;
        self.view.y = target.y - self.view.h / 2.0;
    }

    /// Screen-space position of a world point (what the renderer blits at).
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - Vec2::new(self.view.x, self.view.y)
    }

    /// Whether `p` is inside the view grown by `margin` on each side.
    pub fn keeps(&self, p: Vec2, margin: f32) -> bool {
        self.view.expand(margin).contains_point(p)
    }
}

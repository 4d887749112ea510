use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stick deflection below this magnitude is treated as centered.
pub const STICK_DEADZONE: f32 = 0.2;

/// Logical keys the simulation reacts to. Physical bindings live in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Dash,
    Attack,
}

/// Gamepad snapshot for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GamepadState {
    pub axis_x: f32,
    pub axis_y: f32,
    pub fire: bool,
    pub jump: bool,
    pub dash: bool,
}

/// Raw input sampled by the scene each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub pressed: HashSet<Key>,
    pub gamepad: Option<GamepadState>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(keys: &[Key]) -> Self {
        Self {
            pressed: keys.iter().copied().collect(),
            gamepad: None,
        }
    }

    pub fn with_gamepad(gamepad: GamepadState) -> Self {
        Self {
            pressed: HashSet::new(),
            gamepad: Some(gamepad),
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Reduce the raw state to what the player is trying to do this tick.
    pub fn intent(&self) -> PlayerIntent {
        let stick = self.gamepad.map(|g| stick_vector(g.axis_x, g.axis_y)).unwrap_or(Vec2::ZERO);

        let mut move_x = 0.0;
        if self.is_pressed(Key::Left) || stick.x < 0.0 {
            move_x = -1.0;
        }
        // Right wins when both directions are held
        if self.is_pressed(Key::Right) || stick.x > 0.0 {
            move_x = 1.0;
        }

        let pad = self.gamepad.unwrap_or_default();
        let jump = self.is_pressed(Key::Jump) || pad.jump;
        let dash = self.is_pressed(Key::Dash) || pad.dash;

        let attack = if self.is_pressed(Key::Attack) {
            let held = self.held_direction();
            Some(if held == Vec2::ZERO {
                Aim::Facing
            } else {
                Aim::Direction(held)
            })
        } else if pad.fire {
            Some(if stick == Vec2::ZERO {
                Aim::Facing
            } else {
                Aim::Direction(stick)
            })
        } else {
            None
        };

        PlayerIntent {
            move_x,
            jump,
            dash,
            attack,
        }
    }

    /// Sum of held directional keys, y-down. Opposing keys cancel.
    fn held_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_pressed(Key::Left) {
            dir.x -= 1.0;
        }
        if self.is_pressed(Key::Right) {
            dir.x += 1.0;
        }
        if self.is_pressed(Key::Up) {
            dir.y -= 1.0;
        }
        if self.is_pressed(Key::Down) {
            dir.y += 1.0;
        }
        dir
    }
}

/// Sanitize a stick reading: NaN or infinite axes become 0, and deflection
/// inside the deadzone is centered.
fn stick_vector(x: f32, y: f32) -> Vec2 {
    let x = if x.is_finite() { x.clamp(-1.0, 1.0) } else { 0.0 };
    let y = if y.is_finite() { y.clamp(-1.0, 1.0) } else { 0.0 };
    let v = Vec2::new(x, y);
    if v.length() < STICK_DEADZONE {
        Vec2::ZERO
    } else {
        v
    }
}

/// Where an attack is aimed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aim {
    /// Along the player's current facing.
    Facing,
    /// Along an explicit (not yet normalized) direction.
    Direction(Vec2),
}

/// Per-tick player intent derived from [`InputState`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerIntent {
    /// -1, 0 or 1.
    pub move_x: f32,
    pub jump: bool,
    pub dash: bool,
    pub attack: Option<Aim>,
}

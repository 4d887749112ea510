use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use sanic_core::geometry::Rect;

use crate::enemy::{Behavior, EnemyKind, EnemySpec};
use crate::interactables::CollectibleKind;
use crate::platform::Motion;

#[derive(Debug)]
pub enum LevelError {
    Io(String),
    Parse(String),
    Invalid {
        entity: &'static str,
        index: usize,
        reason: &'static str,
    },
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read level: {e}"),
            Self::Parse(e) => write!(f, "failed to parse level: {e}"),
            Self::Invalid {
                entity,
                index,
                reason,
            } => write!(f, "invalid {entity} #{index}: {reason}"),
        }
    }
}

impl std::error::Error for LevelError {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

fn default_name() -> String {
    "Unnamed Level".to_string()
}

fn default_spawn() -> Point {
    Point { x: 50.0, y: 700.0 }
}

fn default_clockwise() -> bool {
    true
}

fn default_marker_size() -> f32 {
    50.0
}

/// Level file as written by the editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDescription {
    #[serde(default = "default_name")]
    pub name: String,
    /// Key for checkpoint persistence. Falls back to `name` when empty.
    #[serde(default)]
    pub level_id: String,
    #[serde(default = "default_spawn")]
    pub spawn_point: Point,
    #[serde(default)]
    pub platforms: Vec<PlatformDesc>,
    #[serde(default)]
    pub enemies: Vec<EnemyDesc>,
    #[serde(default)]
    pub checkpoints: Vec<CheckpointDesc>,
    #[serde(default)]
    pub exits: Vec<ExitDesc>,
    #[serde(default)]
    pub collectibles: Vec<CollectibleDesc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformDesc {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub is_moving: bool,
    #[serde(default)]
    pub movement: Option<MovementDesc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MovementDesc {
    Linear {
        points: Vec<Point>,
        speed: f32,
        #[serde(default)]
        wait_time: f32,
    },
    Circular {
        center: Point,
        radius: f32,
        /// Radians per tick.
        speed: f32,
        #[serde(default = "default_clockwise")]
        clockwise: bool,
    },
}

/// Enemy entry; absent fields take the enemy defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyDesc {
    #[serde(default, rename = "type")]
    pub kind: EnemyKind,
    #[serde(default)]
    pub behavior: Behavior,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub size: Option<[f32; 2]>,
    pub health: Option<u32>,
    pub damage: Option<u32>,
    pub speed: Option<f32>,
    pub detection_radius: Option<f32>,
    pub attack_range: Option<f32>,
    pub attack_interval: Option<f32>,
    #[serde(default)]
    pub patrol_points: Vec<Point>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointDesc {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_marker_size")]
    pub width: f32,
    #[serde(default = "default_marker_size")]
    pub height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitDesc {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_marker_size")]
    pub width: f32,
    #[serde(default = "default_marker_size")]
    pub height: f32,
    pub next_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectibleDesc {
    #[serde(rename = "type")]
    pub kind: CollectibleKind,
    pub x: f32,
    pub y: f32,
}

fn invalid(entity: &'static str, index: usize, reason: &'static str) -> LevelError {
    LevelError::Invalid {
        entity,
        index,
        reason,
    }
}

fn check_rect(entity: &'static str, index: usize, rect: Rect) -> Result<(), LevelError> {
    if !rect.is_finite() {
        return Err(invalid(entity, index, "non-finite coordinates"));
    }
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return Err(invalid(entity, index, "size must be positive"));
    }
    Ok(())
}

impl LevelDescription {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self =
            serde_json::from_str(json).map_err(|e| LevelError::Parse(e.to_string()))?;
        level.validate()?;
        Ok(level)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LevelError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    pub fn level_key(&self) -> &str {
        if self.level_id.is_empty() {
            &self.name
        } else {
            &self.level_id
        }
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn_point.into()
    }

    /// Reject geometry the simulation cannot handle.
    pub fn validate(&self) -> Result<(), LevelError> {
        if !self.spawn().is_finite() {
            return Err(invalid("spawn point", 0, "non-finite coordinates"));
        }
        for (i, p) in self.platforms.iter().enumerate() {
            check_rect("platform", i, p.rect())?;
            if p.is_moving {
                p.motion(i)?;
            }
        }
        for (i, e) in self.enemies.iter().enumerate() {
            let spec = e.to_spec();
            if !spec.pos.is_finite() || !spec.speed.is_finite() {
                return Err(invalid("enemy", i, "non-finite coordinates"));
            }
            if spec.size.x <= 0.0 || spec.size.y <= 0.0 {
                return Err(invalid("enemy", i, "size must be positive"));
            }
            if spec.patrol_points.iter().any(|p| !p.is_finite()) {
                return Err(invalid("enemy", i, "non-finite patrol point"));
            }
        }
        for (i, c) in self.checkpoints.iter().enumerate() {
            check_rect("checkpoint", i, Rect::new(c.x, c.y, c.width, c.height))?;
        }
        for (i, e) in self.exits.iter().enumerate() {
            check_rect("exit", i, Rect::new(e.x, e.y, e.width, e.height))?;
        }
        for (i, c) in self.collectibles.iter().enumerate() {
            if !c.x.is_finite() || !c.y.is_finite() {
                return Err(invalid("collectible", i, "non-finite coordinates"));
            }
        }
        Ok(())
    }
}

impl PlatformDesc {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Motion profile for a moving platform. `index` is only used in errors.
    pub fn motion(&self, index: usize) -> Result<Motion, LevelError> {
        if !self.is_moving {
            return Ok(Motion::Static);
        }
        match &self.movement {
            None => Err(invalid("platform", index, "moving platform without movement")),
            Some(MovementDesc::Linear {
                points,
                speed,
                wait_time,
            }) => {
                let [a, b] = points.as_slice() else {
                    return Err(invalid("platform", index, "linear movement needs two points"));
                };
                let (a, b) = (Vec2::from(*a), Vec2::from(*b));
                if !a.is_finite() || !b.is_finite() || !speed.is_finite() {
                    return Err(invalid("platform", index, "non-finite movement"));
                }
                if a == b {
                    return Err(invalid("platform", index, "linear endpoints coincide"));
                }
                Ok(Motion::Linear {
                    endpoints: [a, b],
                    speed: *speed,
                    wait_time: *wait_time,
                    coeff: 1.0,
                })
            },
            Some(MovementDesc::Circular {
                center,
                radius,
                speed,
                clockwise,
            }) => {
                let center = Vec2::from(*center);
                if !center.is_finite() || !radius.is_finite() || !speed.is_finite() {
                    return Err(invalid("platform", index, "non-finite movement"));
                }
                Ok(Motion::Circular {
                    center,
                    radius: *radius,
                    angular_speed: *speed,
                    angle: 0.0,
                    clockwise: *clockwise,
                })
            },
        }
    }
}

impl EnemyDesc {
    pub fn to_spec(&self) -> EnemySpec {
        let d = EnemySpec::default();
        EnemySpec {
            kind: self.kind,
            behavior: self.behavior,
            pos: Vec2::new(self.x, self.y),
            size: self.size.map(Vec2::from).unwrap_or(d.size),
            health: self.health.unwrap_or(d.health),
            damage: self.damage.unwrap_or(d.damage),
            speed: self.speed.unwrap_or(d.speed),
            detection_radius: self.detection_radius.unwrap_or(d.detection_radius),
            attack_range: self.attack_range.unwrap_or(d.attack_range),
            attack_interval: self.attack_interval.unwrap_or(d.attack_interval),
            patrol_points: self.patrol_points.iter().copied().map(Vec2::from).collect(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// Downward acceleration added to the player every tick.
pub const GRAVITY: f32 = 1.0;
/// Horizontal acceleration from held movement input.
pub const ACCELERATION: f32 = 0.5;
/// Velocity-proportional drag folded into acceleration (negative).
pub const FRICTION: f32 = -0.12;
/// Upward velocity applied on jump.
pub const JUMP_VELOCITY: f32 = 30.0;
/// Fall distance (y units below the airborne apex) that kills the player.
pub const FALL_DEATH_DISTANCE: f32 = 500.0;
/// Thickness of feet probes, side probes and platform edge strips.
pub const PROBE_THICKNESS: f32 = 10.0;

/// Integrator and collision constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub acceleration: f32,
    pub friction: f32,
    pub jump_velocity: f32,
    pub fall_death_distance: f32,
    pub probe_thickness: f32,
    /// Feet probe width as a fraction of the body width.
    pub feet_probe_ratio: f32,
    /// Side probe height as a fraction of the body height.
    pub side_probe_ratio: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            acceleration: ACCELERATION,
            friction: FRICTION,
            jump_velocity: JUMP_VELOCITY,
            fall_death_distance: FALL_DEATH_DISTANCE,
            probe_thickness: PROBE_THICKNESS,
            feet_probe_ratio: 0.8,
            side_probe_ratio: 0.7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub max_lives: u32,
    pub invulnerability_secs: f32,
    /// Dash velocity as a multiple of the horizontal acceleration.
    pub dash_multiplier: f32,
    pub dash_duration_secs: f32,
    pub dash_cooldown_secs: f32,
    pub starting_charges: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            max_lives: 2,
            invulnerability_secs: 1.5,
            dash_multiplier: 75.0,
            dash_duration_secs: 0.5,
            dash_cooldown_secs: 3.0,
            starting_charges: 0,
        }
    }
}

/// Attacks, contact rules, drops and pickups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub attack_cooldown_secs: f32,
    pub projectile_speed: f32,
    pub projectile_damage: u32,
    pub projectile_size: f32,
    /// Distance from the body center at which player projectiles spawn.
    pub spawn_offset: f32,
    /// Enemy projectiles are drawn as a laser bolt.
    pub enemy_projectile_size: [f32; 2],
    pub stomp_tolerance: f32,
    pub stomp_bounce: f32,
    pub knockback: f32,
    pub drop_chance: f64,
    pub drop_charges: u32,
    pub charge_pickup: u32,
    pub jump_boost_multiplier: f32,
    pub speed_boost_multiplier: f32,
    /// Projectiles are culled this far outside the viewport.
    pub cull_margin: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            attack_cooldown_secs: 0.5,
            projectile_speed: 10.0,
            projectile_damage: 1,
            projectile_size: 10.0,
            spawn_offset: 50.0,
            enemy_projectile_size: [50.0, 10.0],
            stomp_tolerance: 10.0,
            stomp_bounce: 15.0,
            knockback: 8.0,
            drop_chance: 0.3,
            drop_charges: 3,
            charge_pickup: 3,
            jump_boost_multiplier: 1.5,
            speed_boost_multiplier: 2.0,
            cull_margin: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub combat: CombatConfig,
    pub viewport: ViewportConfig,
    pub tick_rate_hz: f32,
    /// Seed for loot rolls.
    pub rng_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            combat: CombatConfig::default(),
            viewport: ViewportConfig::default(),
            tick_rate_hz: 60.0,
            rng_seed: 42,
        }
    }
}

impl SimConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path =
            std::env::var("SANIC_SIM_CONFIG").unwrap_or_else(|_| "config/sim.toml".to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<SimConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    SimConfig::default()
                },
            },
            Err(_) => SimConfig::default(),
        }
    }
}

mod track;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use sanic_core::game_trait::FrameSimulation;
use sanic_platformer::{LevelDescription, SimConfig, SimEvent, World};

use track::InputTrack;

fn arg_value(prefix: &str) -> Option<String> {
    std::env::args()
        .skip(1)
        .find_map(|a| a.strip_prefix(prefix).map(String::from))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let level_path = arg_value("--level=").unwrap_or_else(|| "levels/demo.json".to_string());
    let ticks = arg_value("--ticks=")
        .and_then(|t| t.parse::<u64>().ok())
        .unwrap_or(600);
    let track = arg_value("--track=")
        .map(|t| InputTrack::parse(&t))
        .unwrap_or_else(InputTrack::demo);
    let dump = arg_value("--dump=").is_some_and(|v| v == "json");

    let config = SimConfig::load();
    let level = match LevelDescription::from_file(&level_path) {
        Ok(level) => level,
        Err(e) => {
            tracing::error!("Failed to load {level_path}: {e}");
            return ExitCode::FAILURE;
        },
    };

    let mut world = match World::new(config, &level) {
        Ok(w) => w,
        Err(e) => {
            tracing::error!("Failed to build level {level_path}: {e}");
            return ExitCode::FAILURE;
        },
    };

    tracing::info!(
        "Running {} for {ticks} ticks at {} Hz",
        level.name,
        world.tick_rate()
    );

    let dt = 1.0 / world.tick_rate();
    for tick in 0..ticks {
        let input = track.input_at(tick);
        for event in world.update(dt, &input) {
            log_event(tick, &event);
            match event {
                SimEvent::PlayerDeath { .. } => {
                    let at = world.respawn_point();
                    world.respawn(at);
                },
                SimEvent::LevelComplete { .. } => {
                    report(&world, tick, dump);
                    return ExitCode::SUCCESS;
                },
                _ => {},
            }
        }
    }

    report(&world, ticks, dump);
    ExitCode::SUCCESS
}

fn log_event(tick: u64, event: &SimEvent) {
    match event {
        SimEvent::CreateProjectile { projectile } => tracing::debug!(
            tick,
            id = projectile.id.0,
            owner = ?projectile.owner,
            "create_projectile"
        ),
        other => tracing::info!(tick, event = ?other, "{}", other.name()),
    }
}

fn report(world: &World, tick: u64, dump: bool) {
    let p = world.player();
    tracing::info!(
        tick,
        x = p.body.pos.x,
        y = p.body.pos.y,
        lives = p.lives,
        coins = p.coins,
        charges = p.charges,
        complete = world.is_level_complete(),
        "Run finished"
    );
    if dump {
        match serde_json::to_string_pretty(&world.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!("Failed to encode snapshot: {e}"),
        }
    }
}

use sanic_platformer::{InputState, Key, LevelDescription, SimConfig, SimEvent, World};

pub const DT: f32 = 1.0 / 60.0;

/// Floor spanning x 0..2000 with its top at y=500.
pub const FLOOR: &str = r#"{"x": 0, "y": 500, "width": 2000, "height": 40}"#;

/// Build a world from a level JSON body (the part inside the braces).
pub fn world(body: &str) -> World {
    let json = format!("{{\"level_id\": \"it\", {body}}}");
    let level = LevelDescription::from_json(&json)
        .unwrap_or_else(|e| panic!("bad test level: {e}\n{json}"));
    World::new(SimConfig::default(), &level).unwrap()
}

/// Player standing on the floor at x=200 plus whatever `extra` adds.
pub fn floor_world(extra: &str) -> World {
    world(&format!(
        r#""spawn_point": {{"x": 200, "y": 500}}, "platforms": [{FLOOR}] {extra}"#
    ))
}

pub fn idle() -> InputState {
    InputState::new()
}

pub fn keys(k: &[Key]) -> InputState {
    InputState::with_keys(k)
}

/// Tick `n` times, collecting every event.
pub fn run(w: &mut World, n: usize, input: &InputState) -> Vec<SimEvent> {
    let mut out = Vec::new();
    for _ in 0..n {
        w.tick(DT, input);
        out.extend(w.drain_events());
    }
    out
}

/// Assert every body in the world has a rectangle matching its position.
pub fn assert_rects_fresh(w: &World) {
    let s = w.state();
    assert!(s.player.body.rect_is_fresh(), "player rect stale");
    for p in &s.platforms {
        assert!(p.body.rect_is_fresh(), "platform {:?} rect stale", p.id);
    }
    for e in &s.enemies {
        assert!(e.body.rect_is_fresh(), "enemy {:?} rect stale", e.id);
    }
    for p in &s.projectiles {
        assert!(p.body.rect_is_fresh(), "projectile {:?} rect stale", p.id);
    }
    for c in &s.collectibles {
        assert!(c.body.rect_is_fresh(), "collectible {:?} rect stale", c.id);
    }
}

//! Whole-world kinematics: integration, landing, passengers and fall death.

#[allow(dead_code)]
mod common;

use glam::Vec2;
use proptest::prelude::*;

use sanic_core::geometry::Anchor;
use sanic_platformer::physics::{Body, integrate};
use sanic_platformer::{DeathCause, Key, SimConfig, SimEvent};

use common::{DT, assert_rects_fresh, floor_world, idle, keys, run, world};

#[test]
fn resting_player_does_not_drift() {
    let mut w = floor_world("");
    w.tick(DT, &idle());
    let rest = w.player().body.pos;
    for _ in 0..120 {
        w.tick(DT, &idle());
        let p = w.player();
        assert_eq!(p.body.pos, rest);
        assert_eq!(p.body.vel.y, 0.0);
        assert!(!p.airborne);
    }
    assert!(w.drain_events().is_empty());
}

#[test]
fn fall_death_fires_on_first_tick_past_threshold() {
    let config = SimConfig::default();
    let threshold = config.physics.fall_death_distance;

    // Same integrator the player runs, without any platforms to land on.
    let mut reference = Body::new(Vec2::ZERO, Vec2::new(100.0, 100.0), Anchor::MidBottom);
    let mut expected_tick = 0;
    for tick in 1..=500 {
        reference.acc = Vec2::new(0.0, config.physics.gravity);
        integrate(&mut reference, config.physics.friction);
        if reference.pos.y > threshold {
            expected_tick = tick;
            break;
        }
    }
    assert!(expected_tick > 0);

    let mut w = world(r#""spawn_point": {"x": 300, "y": 0}"#);
    for tick in 1..=expected_tick {
        w.tick(DT, &idle());
        let events = w.drain_events();
        let died = events.contains(&SimEvent::PlayerDeath {
            cause: DeathCause::Fall,
        });
        if tick < expected_tick {
            assert!(!died, "died early at tick {tick}");
        } else {
            assert!(died, "no death at tick {tick}");
        }
    }
}

#[test]
fn player_rides_horizontal_platform() {
    let mut w = world(
        r#""spawn_point": {"x": 200, "y": 500},
           "platforms": [{"x": 100, "y": 500, "width": 200, "height": 20, "is_moving": true,
               "movement": {"type": "linear", "points": [{"x": 100, "y": 500}, {"x": 600, "y": 500}], "speed": 2}}]"#,
    );
    w.tick(DT, &idle());
    let offset = w.player().body.pos.x - w.state().platforms[0].body.pos.x;
    for _ in 0..40 {
        w.tick(DT, &idle());
        let p = w.player();
        assert!(!p.airborne);
        assert_eq!(p.body.pos.x - w.state().platforms[0].body.pos.x, offset);
        assert_eq!(p.body.rect().bottom(), w.state().platforms[0].rect().top());
    }
}

#[test]
fn player_rides_vertical_platform() {
    let mut w = world(
        r#""spawn_point": {"x": 200, "y": 500},
           "platforms": [{"x": 100, "y": 500, "width": 200, "height": 20, "is_moving": true,
               "movement": {"type": "linear", "points": [{"x": 100, "y": 500}, {"x": 100, "y": 300}], "speed": 3}}]"#,
    );
    w.tick(DT, &idle());
    for _ in 0..60 {
        w.tick(DT, &idle());
        let top = w.state().platforms[0].rect().top();
        assert_eq!(w.player().body.pos.y, top);
        assert!(!w.player().dead);
    }
}

#[test]
fn player_rides_circular_platform_for_full_orbit() {
    let mut w = world(
        r#""spawn_point": {"x": 600, "y": 380},
           "platforms": [{"x": 500, "y": 380, "width": 200, "height": 20, "is_moving": true,
               "movement": {"type": "circular", "center": {"x": 600, "y": 330}, "radius": 60, "speed": 0.05}}]"#,
    );
    for _ in 0..10 {
        w.tick(DT, &idle());
        if !w.player().airborne {
            break;
        }
    }
    assert!(!w.player().airborne, "never settled on the platform");
    let offset = w.player().body.pos.x - w.state().platforms[0].body.pos.x;

    // 2 * pi / 0.05
    for tick in 0..126 {
        w.tick(DT, &idle());
        let p = w.player();
        let platform = &w.state().platforms[0];
        assert!(!p.airborne, "airborne at tick {tick}");
        assert!(!p.dead);
        let drift = (p.body.pos.x - platform.body.pos.x - offset).abs();
        assert!(drift < 1e-3, "drift {drift} at tick {tick}");
        assert_eq!(p.body.rect().bottom(), platform.rect().top());
    }
}

#[test]
fn jumping_player_is_not_carried() {
    let mut w = world(
        r#""spawn_point": {"x": 200, "y": 500},
           "platforms": [{"x": 100, "y": 500, "width": 200, "height": 20, "is_moving": true,
               "movement": {"type": "linear", "points": [{"x": 100, "y": 500}, {"x": 600, "y": 500}], "speed": 2}}]"#,
    );
    w.tick(DT, &idle());
    let x = w.player().body.pos.x;
    w.tick(DT, &keys(&[Key::Jump]));
    assert!(w.player().airborne);
    assert_eq!(w.player().body.pos.x, x);
}

#[test]
fn linear_platform_returns_home() {
    let mut w = world(
        r#""platforms": [{"x": 100, "y": 300, "width": 80, "height": 20, "is_moving": true,
               "movement": {"type": "linear", "points": [{"x": 100, "y": 300}, {"x": 300, "y": 300}], "speed": 4}}]"#,
    );
    // 2 * 200 / 4
    run(&mut w, 50, &idle());
    assert_eq!(w.state().platforms[0].body.pos, Vec2::new(300.0, 300.0));
    run(&mut w, 50, &idle());
    assert_eq!(w.state().platforms[0].body.pos, Vec2::new(100.0, 300.0));
    let sanic_platformer::platform::Motion::Linear { coeff, .. } = w.state().platforms[0].motion
    else {
        panic!("expected linear motion");
    };
    assert_eq!(coeff, 1.0);
}

#[test]
fn wall_stops_walking_player_flush() {
    let mut w = world(&format!(
        r#""spawn_point": {{"x": 200, "y": 500}},
           "platforms": [{}, {{"x": 400, "y": 300, "width": 50, "height": 200}}]"#,
        common::FLOOR
    ));
    run(&mut w, 120, &keys(&[Key::Right]));
    let p = w.player();
    assert_eq!(p.body.pos.x, 350.0);
    assert_eq!(p.body.rect().right(), 400.0);
    assert_eq!(p.body.pos.y, 500.0);
}

#[test]
fn dashing_player_never_passes_through_wall() {
    let mut passed = Vec::new();
    for start in 200..=300 {
        let mut w = world(&format!(
            r#""spawn_point": {{"x": {start}, "y": 500}},
               "platforms": [{}, {{"x": 400, "y": 300, "width": 50, "height": 200}}]"#,
            common::FLOOR
        ));
        run(&mut w, 10, &keys(&[Key::Right, Key::Dash]));
        let right = w.player().body.rect().right();
        if right > 400.0 {
            passed.push((start, right));
        }
    }
    assert!(passed.is_empty(), "ended inside or past the wall: {passed:?}");
}

proptest! {
    #[test]
    fn landing_snaps_exactly_to_platform_top(
        x in 100.0f32..1900.0,
        y in 100.0f32..480.0,
    ) {
        let mut w = world(&format!(
            r#""spawn_point": {{"x": {x}, "y": {y}}}, "platforms": [{}]"#,
            common::FLOOR
        ));
        let mut landed = false;
        for _ in 0..200 {
            let was_airborne = w.player().airborne;
            w.tick(DT, &idle());
            let p = w.player();
            if was_airborne && !p.airborne {
                prop_assert_eq!(p.body.vel.y, 0.0);
                prop_assert_eq!(p.body.rect().bottom(), 500.0);
                landed = true;
                break;
            }
        }
        prop_assert!(landed);
        prop_assert!(!w.player().dead);
    }

    #[test]
    fn rects_never_stale(
        moves in proptest::collection::vec(0u8..8, 20..120),
    ) {
        let mut w = world(&format!(
            r#""spawn_point": {{"x": 200, "y": 500}},
               "platforms": [{}, {{"x": 500, "y": 380, "width": 120, "height": 20, "is_moving": true,
                 "movement": {{"type": "circular", "center": {{"x": 560, "y": 330}}, "radius": 60, "speed": 0.05}}}}],
               "enemies": [
                 {{"type": "turret", "x": 700, "y": 450}},
                 {{"type": "slime", "behavior": "chase", "x": 100, "y": 450}},
                 {{"type": "boss", "behavior": "boss", "x": 900, "y": 450}}
               ],
               "collectibles": [{{"type": "projectile_charge", "x": 260, "y": 460}}]"#,
            common::FLOOR
        ));
        for m in moves {
            let input = match m {
                0 => keys(&[Key::Left]),
                1 => keys(&[Key::Right]),
                2 => keys(&[Key::Jump]),
                3 => keys(&[Key::Right, Key::Dash]),
                4 => keys(&[Key::Attack]),
                5 => keys(&[Key::Up, Key::Attack]),
                _ => idle(),
            };
            w.tick(DT, &input);
            w.drain_events();
            assert_rects_fresh(&w);
        }
    }
}

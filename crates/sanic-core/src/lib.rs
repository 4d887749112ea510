pub mod events;
pub mod game_trait;
pub mod geometry;
pub mod powerup;
pub mod timer;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::FrameSimulation;

    /// Run `n` ticks with the same input, returning every event emitted.
    pub fn run_ticks<S: FrameSimulation>(
        sim: &mut S,
        n: usize,
        dt: f32,
        input: &S::Input,
    ) -> Vec<S::Event> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(sim.update(dt, input));
        }
        all_events
    }

    /// Assert two floats are within `eps` of each other.
    pub fn assert_close(actual: f32, expected: f32, eps: f32) {
        assert!(
            (actual - expected).abs() <= eps,
            "expected {expected} (±{eps}), got {actual}"
        );
    }

    // ================================================================
    // Simulation Trait Contract Tests
    // ================================================================
    // Every FrameSimulation implementation should pass these. Simulation
    // crates call them from their own tests with a freshly loaded instance.

    /// serialize_state() must return non-empty bytes for a loaded simulation.
    pub fn contract_state_is_serializable<S: FrameSimulation>(sim: &S) {
        let state = sim.serialize_state();
        assert!(
            !state.is_empty(),
            "serialize_state() must return non-empty bytes"
        );
    }

    /// update() with dt>0 must change state (clock, gravity, timers).
    pub fn contract_update_advances_state<S: FrameSimulation>(sim: &mut S, input: &S::Input) {
        let before = sim.serialize_state();
        sim.update(1.0 / 60.0, input);
        let after = sim.serialize_state();
        assert_ne!(before, after, "update(dt>0) must advance simulation state");
    }

    /// serialize → apply → serialize must be stable.
    pub fn contract_state_roundtrip_preserves<S: FrameSimulation>(sim: &mut S) {
        let state_a = sim.serialize_state();
        sim.apply_state(&state_a);
        let state_b = sim.serialize_state();
        assert_eq!(
            state_a, state_b,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// Garbage bytes passed to apply_state() must leave state untouched.
    pub fn contract_malformed_state_ignored<S: FrameSimulation>(sim: &mut S) {
        let before = sim.serialize_state();
        sim.apply_state(&[0xc1, 0xff, 0x00]);
        assert_eq!(before, sim.serialize_state(), "malformed state must be ignored");
    }

    /// pause() must freeze the simulation, resume() must unfreeze it.
    pub fn contract_pause_stops_updates<S: FrameSimulation>(sim: &mut S, input: &S::Input) {
        sim.pause();
        let before = sim.serialize_state();
        let events = sim.update(1.0 / 60.0, input);
        assert!(events.is_empty(), "paused simulation must not emit events");
        assert_eq!(before, sim.serialize_state(), "State must not change while paused");

        sim.resume();
        sim.update(1.0 / 60.0, input);
        assert_ne!(before, sim.serialize_state(), "State must change after resume");
    }
}

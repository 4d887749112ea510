/// Core trait for a frame-stepped simulation driven by a scene loop.
///
/// The scene owns rendering, menus and persistence; the simulation only
/// advances state and reports what happened.
pub trait FrameSimulation {
    /// Raw input sampled by the scene each frame.
    type Input;
    /// Semantic signals emitted during a tick.
    type Event;

    /// Advance one tick. `dt` is the wall-clock frame delta in seconds.
    /// Returns the events posted during this tick, oldest first.
    fn update(&mut self, dt: f32, input: &Self::Input) -> Vec<Self::Event>;

    /// Serialize the simulation state (for snapshots and replays).
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the simulation state with a previously serialized one.
    /// Malformed data leaves the current state untouched.
    fn apply_state(&mut self, state: &[u8]);

    /// Nominal tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    fn pause(&mut self);

    fn resume(&mut self);

    /// Whether the current level has been completed.
    fn is_level_complete(&self) -> bool;
}

/// Generates the `serialize_state`, `apply_state`, `pause`, `resume` and
/// `is_level_complete` methods shared by simulations.
///
/// Requires the implementing struct to have `state: $StateType` and
/// `paused: bool` fields, and `$StateType` to have a `level_complete: bool`
/// field.
#[macro_export]
macro_rules! frame_simulation_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("simulation state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            match rmp_serde::from_slice::<$StateType>(state) {
                Ok(s) => self.state = s,
                Err(e) => tracing::warn!("Ignoring malformed simulation state: {e}"),
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_level_complete(&self) -> bool {
            self.state.level_complete
        }
    };
}

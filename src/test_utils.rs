//! Test utilities for plugin and engine testing

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::config::SimulationConfig;
use crate::events::SimulationCommand;
use crate::physics::math::{Scalar, StateVector};

/// Seed used by every helper that needs a reproducible engine
pub const TEST_SEED: u64 = 1234;

/// Creates a minimal test app with the core Bevy plugins the simulation needs
pub fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app
}

/// Default configuration with a fixed seed and `body_count` bodies
pub fn test_config(body_count: usize) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.physics.body_count = body_count;
    config.physics.initial_seed = Some(TEST_SEED);
    config
}

/// Queue a command for the next update
pub fn send_command(app: &mut App, command: SimulationCommand) {
    app.world_mut()
        .resource_mut::<Events<SimulationCommand>>()
        .send(command);
}

/// `[x, v] -> [v, -x]`, the unit harmonic oscillator
pub fn harmonic_oscillator(state: &[Scalar], _t: Scalar) -> StateVector {
    vec![state[1], -state[0]]
}

/// Total energy of the unit harmonic oscillator
pub fn oscillator_energy(state: &[Scalar]) -> Scalar {
    0.5 * state[0] * state[0] + 0.5 * state[1] * state[1]
}

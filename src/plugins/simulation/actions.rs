//! Systems that drive the engine and apply simulation commands

use crate::prelude::*;

pub fn advance_simulation(
    mut engine: ResMut<GravityEngine>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if let Err(e) = engine.step() {
        error!("Simulation step failed: {}. Pausing.", e);
        next_state.set(AppState::Paused);
    }
}

pub fn handle_simulation_commands(
    mut commands_reader: EventReader<SimulationCommand>,
    mut engine: ResMut<GravityEngine>,
    current_state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for command in commands_reader.read() {
        match *command {
            SimulationCommand::Restart(count) => engine.reset(count),
            SimulationCommand::TogglePause => match current_state.get() {
                AppState::Running => next_state.set(AppState::Paused),
                AppState::Paused => next_state.set(AppState::Running),
            },
            SimulationCommand::SetGravitationalConstant(g) => {
                match engine.set_gravitational_constant(g) {
                    Ok(()) => debug!("Gravitational constant set to {}", g),
                    Err(e) => warn!("Ignoring gravitational constant: {}", e),
                }
            }
            SimulationCommand::SetDimensions { width, height } => {
                if let Err(e) = engine.set_dimensions(width, height) {
                    warn!("Ignoring resize: {}", e);
                }
            }
            SimulationCommand::SetIntegrator(kind) => {
                info!("Switching integrator to {}", kind);
                engine.set_integrator(kind);
            }
        }
    }
}

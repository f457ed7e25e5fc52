//! Simulation plugin - Self-contained plugin pattern
//!
//! Stands in for the fixed-interval driver: the engine lives in a resource and
//! is stepped once per `Update` while [`AppState::Running`]. Controllers talk
//! to it through [`SimulationCommand`] events.

use crate::prelude::*;

mod actions;

use actions::{advance_simulation, handle_simulation_commands};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Commands,
    Advance,
}

pub struct SimulationPlugin {
    config: Option<SimulationConfig>,
}

impl SimulationPlugin {
    pub fn new() -> Self {
        Self { config: None }
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self
            .config
            .clone()
            .unwrap_or_else(SimulationConfig::load_from_user_config);

        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        app.init_state::<AppState>();
        app.add_event::<SimulationCommand>();

        let engine = match GravityEngine::from_config(&config.physics) {
            Ok(engine) => engine,
            Err(e) => {
                error!("Invalid physics configuration: {}. Not starting.", e);
                app.insert_resource(config);
                app.world_mut()
                    .resource_mut::<Events<AppExit>>()
                    .send(AppExit::error());
                return;
            }
        };

        app.insert_resource(config);
        app.insert_resource(engine);

        app.configure_sets(
            Update,
            (SimulationSet::Commands, SimulationSet::Advance).chain(),
        );

        app.add_systems(
            Update,
            (
                handle_simulation_commands.in_set(SimulationSet::Commands),
                advance_simulation
                    .in_set(SimulationSet::Advance)
                    .run_if(in_state(AppState::Running)),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, send_command, test_config};

    #[test]
    fn test_plugin_steps_engine_each_update() {
        let mut app = create_test_app();
        app.add_plugins(SimulationPlugin::with_config(test_config(8)));

        app.update();
        app.update();
        app.update();

        let engine = app.world().resource::<GravityEngine>();
        assert_eq!(engine.step_count(), 3);
        assert_eq!(engine.body_count(), 8);
    }

    #[test]
    fn test_unknown_integrator_refuses_to_start() {
        let mut config = test_config(3);
        config.physics.integrator = "rk5".to_string();

        let mut app = create_test_app();
        app.add_plugins(SimulationPlugin::with_config(config));
        app.update();

        assert!(!app.world().contains_resource::<GravityEngine>());
        assert!(app.should_exit().is_some_and(|exit| exit.is_error()));
    }

    #[test]
    fn test_invalid_physics_refuses_to_start() {
        let mut config = test_config(3);
        config.physics.timestep = -1.0;

        let mut app = create_test_app();
        app.add_plugins(SimulationPlugin::with_config(config));
        app.update();

        assert!(!app.world().contains_resource::<GravityEngine>());
        assert!(app.should_exit().is_some_and(|exit| exit.is_error()));
    }

    #[test]
    fn test_valid_config_keeps_running() {
        let mut app = create_test_app();
        app.add_plugins(SimulationPlugin::with_config(test_config(3)));
        app.update();

        assert!(app.should_exit().is_none());
    }

    #[test]
    fn test_pause_stops_stepping() {
        let mut app = create_test_app();
        app.add_plugins(SimulationPlugin::with_config(test_config(4)));
        app.update();

        send_command(&mut app, SimulationCommand::TogglePause);
        app.update();
        app.update();
        let paused_at = app.world().resource::<GravityEngine>().step_count();

        app.update();
        app.update();

        assert_eq!(
            app.world().resource::<State<AppState>>().get(),
            &AppState::Paused
        );
        assert_eq!(
            app.world().resource::<GravityEngine>().step_count(),
            paused_at
        );
    }
}

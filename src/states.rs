use bevy::prelude::*;

/// Whether the driver is currently ticking the engine
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Running,
    Paused,
}

//! Orrery library
//!
//! Interchangeable ODE integrators and a softened N-body gravity engine that
//! consumes them. The engine is exposed both as a plain struct and as a bevy
//! resource driven by [`SimulationPlugin`].

pub mod cli;
pub mod config;
pub mod events;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod resources;
pub mod states;

// Test utilities are public for integration tests
pub mod test_utils;

// Re-export commonly used items
pub use config::{PhysicsConfig, SimulationConfig};
pub use events::SimulationCommand;
pub use physics::{
    components::Body,
    engine::{GravityEngine, SimulationSnapshot},
    errors::{DomainError, SimulationError},
    forces::ForceModel,
    integrators,
    math::{Scalar, StateVector, Vector},
};
pub use plugins::simulation::SimulationPlugin;
pub use states::AppState;

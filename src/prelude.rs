//! Orrery prelude module
//!
//! Re-exports the types most plugin and driver code needs.

// External crate re-exports
pub use bevy::prelude::*;
pub use rand::Rng;

// Internal re-exports - Config
pub use crate::config::{PhysicsConfig, SimulationConfig};

// Internal re-exports - States and events
pub use crate::events::SimulationCommand;
pub use crate::states::AppState;

// Internal re-exports - Resources
pub use crate::resources::SharedRng;

// Internal re-exports - Physics
pub use crate::physics::components::Body;
pub use crate::physics::engine::{GravityEngine, SimulationSnapshot};
pub use crate::physics::integrators::{Integrator, IntegratorKind};
pub use crate::physics::math::{Scalar, Vector};

// Internal re-exports - Plugins
pub use crate::plugins::simulation::{SimulationPlugin, SimulationSet};

//! Commands sent from the controller layer to the simulation
//!
//! Each variant maps onto one engine operation, so an external UI never needs
//! direct mutable access to the engine resource.

use crate::physics::integrators::IntegratorKind;
use crate::physics::math::Scalar;
use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SimulationCommand {
    /// Re-initialize with the given body count, or the current one
    Restart(Option<usize>),
    TogglePause,
    SetGravitationalConstant(Scalar),
    SetDimensions { width: Scalar, height: Scalar },
    SetIntegrator(IntegratorKind),
}

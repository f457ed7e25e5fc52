//! Error types shared by the gravity engine and its configuration

use super::integrators::{IntegrationError, RegistryError};
use crate::physics::components::BodyId;
use crate::physics::math::Scalar;
use std::fmt;

/// A physical parameter outside its valid domain
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    NonPositiveTimestep(Scalar),
    NonPositiveDimensions { width: Scalar, height: Scalar },
    InvalidMassRange { min: Scalar, max: Scalar },
    NegativeSoftening(Scalar),
    NonPositiveMass { id: BodyId, mass: Scalar },
    NonFinite(&'static str),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NonPositiveTimestep(dt) => {
                write!(f, "Timestep must be positive, got {dt}")
            }
            DomainError::NonPositiveDimensions { width, height } => write!(
                f,
                "Simulation area must have positive size, got {width}x{height}"
            ),
            DomainError::InvalidMassRange { min, max } => write!(
                f,
                "Mass range must satisfy 0 < min <= max, got [{min}, {max}]"
            ),
            DomainError::NegativeSoftening(epsilon) => {
                write!(f, "Softening factor must not be negative, got {epsilon}")
            }
            DomainError::NonPositiveMass { id, mass } => {
                write!(f, "Body {id} must have a positive finite mass, got {mass}")
            }
            DomainError::NonFinite(parameter) => write!(f, "{parameter} must be finite"),
        }
    }
}

impl std::error::Error for DomainError {}

/// Any failure raised while building or stepping a simulation
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Domain(DomainError),
    Integration(IntegrationError),
    Registry(RegistryError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Domain(err) => write!(f, "Invalid parameter: {err}"),
            SimulationError::Integration(err) => write!(f, "Integration failed: {err}"),
            SimulationError::Registry(err) => write!(f, "Invalid integrator: {err}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Domain(err) => Some(err),
            SimulationError::Integration(err) => Some(err),
            SimulationError::Registry(err) => Some(err),
        }
    }
}

impl From<DomainError> for SimulationError {
    fn from(err: DomainError) -> Self {
        SimulationError::Domain(err)
    }
}

impl From<IntegrationError> for SimulationError {
    fn from(err: IntegrationError) -> Self {
        SimulationError::Integration(err)
    }
}

impl From<RegistryError> for SimulationError {
    fn from(err: RegistryError) -> Self {
        SimulationError::Registry(err)
    }
}

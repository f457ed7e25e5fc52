//! Registry for name-based integrator selection
//!
//! The set of integrators is closed: every scheme is a variant of
//! [`IntegratorKind`], and the registry only resolves names (canonical and
//! aliases) to those variants. Engines hold an `IntegratorKind` chosen at
//! configuration time and never need to know which scheme is active.

use super::{
    Derivative, ExplicitEuler, IntegrationError, Integrator, PositionVerlet,
    RungeKuttaFourthOrder, VelocityVerlet,
};
use crate::physics::math::{Scalar, StateVector};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// The closed set of available integration schemes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegratorKind {
    #[serde(rename = "euler")]
    ExplicitEuler,
    #[serde(rename = "rk4")]
    RungeKuttaFourthOrder,
    #[serde(rename = "verlet")]
    PositionVerlet,
    #[default]
    #[serde(rename = "velocityVerlet")]
    VelocityVerlet,
}

impl IntegratorKind {
    pub const ALL: [IntegratorKind; 4] = [
        IntegratorKind::ExplicitEuler,
        IntegratorKind::RungeKuttaFourthOrder,
        IntegratorKind::PositionVerlet,
        IntegratorKind::VelocityVerlet,
    ];

    fn scheme(&self) -> &'static dyn Integrator {
        match self {
            IntegratorKind::ExplicitEuler => &ExplicitEuler,
            IntegratorKind::RungeKuttaFourthOrder => &RungeKuttaFourthOrder,
            IntegratorKind::PositionVerlet => &PositionVerlet,
            IntegratorKind::VelocityVerlet => &VelocityVerlet,
        }
    }
}

impl Integrator for IntegratorKind {
    fn integrate(
        &self,
        state: &[Scalar],
        derivative: &dyn Derivative,
        dt: Scalar,
        t: Scalar,
    ) -> Result<StateVector, IntegrationError> {
        self.scheme().integrate(state, derivative, dt, t)
    }

    fn name(&self) -> &'static str {
        self.scheme().name()
    }

    fn convergence_order(&self) -> usize {
        self.scheme().convergence_order()
    }

    fn aliases(&self) -> Vec<&'static str> {
        self.scheme().aliases()
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntegratorKind {
    type Err = RegistryError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        IntegratorRegistry::new().create(name)
    }
}

/// Name lookup failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    UnknownIntegrator {
        name: String,
        available: Vec<String>,
        aliases: Vec<String>,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownIntegrator {
                name,
                available,
                aliases,
            } => write!(
                f,
                "Unknown integrator: '{}'. Available integrators: {}. Aliases: {}",
                name,
                available.join(", "),
                aliases.join(", ")
            ),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Resolves canonical names and aliases to integrator variants
#[derive(Debug, Clone)]
pub struct IntegratorRegistry {
    /// Maps names (canonical and aliases) to variants
    integrators: HashMap<String, IntegratorKind>,
}

impl IntegratorRegistry {
    /// Create a registry holding every standard integrator
    pub fn new() -> Self {
        let mut registry = Self {
            integrators: HashMap::new(),
        };
        for kind in IntegratorKind::ALL {
            registry.register(kind);
        }
        registry
    }

    fn register(&mut self, kind: IntegratorKind) {
        self.integrators.insert(kind.name().to_string(), kind);
        for alias in kind.aliases() {
            self.integrators.insert(alias.to_string(), kind);
        }
    }

    /// Resolve a name or alias. Names are case-sensitive.
    pub fn create(&self, name: &str) -> Result<IntegratorKind, RegistryError> {
        self.integrators
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownIntegrator {
                name: name.to_string(),
                available: self.list_available(),
                aliases: self
                    .list_aliases()
                    .into_iter()
                    .map(|(alias, _)| alias)
                    .collect(),
            })
    }

    /// Canonical names, sorted
    pub fn list_available(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .integrators
            .iter()
            .filter(|(key, kind)| key.as_str() == kind.name())
            .map(|(key, _)| key.clone())
            .collect();
        names.sort();
        names
    }

    /// `(alias, canonical name)` pairs, sorted by alias
    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<(String, String)> = self
            .integrators
            .iter()
            .filter(|(key, kind)| key.as_str() != kind.name())
            .map(|(key, kind)| (key.clone(), kind.name().to_string()))
            .collect();
        aliases.sort_by(|a, b| a.0.cmp(&b.0));
        aliases
    }
}

impl Default for IntegratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

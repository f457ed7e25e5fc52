//! Softened pairwise gravity and power-law mass sampling

use crate::physics::components::Body;
use crate::physics::errors::DomainError;
use crate::physics::math::{Scalar, Vector};
use libm::{pow, sqrt};
use rand::Rng;

/// Parameters of the gravity force law and the mass distribution
///
/// Passed to the engine at construction, so two engines never share hidden
/// state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    /// Added in quadrature to the separation, keeps forces finite at zero distance
    pub softening_factor: Scalar,
    /// Exponent α of the mass power law `p(m) ∝ m^-α`
    pub mass_power_law_scaling: Scalar,
    pub min_mass: Scalar,
    pub max_mass: Scalar,
}

impl Default for ForceModel {
    fn default() -> Self {
        Self {
            softening_factor: 5.0,
            mass_power_law_scaling: 2.35,
            min_mass: 2.0,
            max_mass: 10_000.0,
        }
    }
}

impl ForceModel {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.softening_factor.is_finite() {
            return Err(DomainError::NonFinite("softening_factor"));
        }
        if self.softening_factor < 0.0 {
            return Err(DomainError::NegativeSoftening(self.softening_factor));
        }
        if !self.mass_power_law_scaling.is_finite() {
            return Err(DomainError::NonFinite("mass_power_law_scaling"));
        }
        if !(self.min_mass.is_finite()
            && self.max_mass.is_finite()
            && self.min_mass > 0.0
            && self.min_mass <= self.max_mass)
        {
            return Err(DomainError::InvalidMassRange {
                min: self.min_mass,
                max: self.max_mass,
            });
        }
        Ok(())
    }

    /// Gravitational force exerted on `a` by `b`
    ///
    /// ```text
    /// d²_soft = |b - a|² + ε²
    /// |F|     = G * m_a * m_b / d²_soft
    /// F       = |F| * (b - a) / sqrt(d²_soft)
    /// ```
    ///
    /// `force(a, b, g) == -force(b, a, g)` up to rounding.
    pub fn force(&self, a: &Body, b: &Body, g: Scalar) -> Vector {
        let displacement = b.position - a.position;
        let softened_distance_squared = displacement.length_squared()
            + self.softening_factor * self.softening_factor;

        // Only reachable with zero softening and coincident bodies
        if softened_distance_squared <= 0.0 {
            return Vector::ZERO;
        }

        let magnitude = g * a.mass * b.mass / softened_distance_squared;
        displacement * (magnitude / sqrt(softened_distance_squared))
    }

    /// Draw a mass from the bounded power law by inverse transform sampling
    ///
    /// ```text
    /// m = ((max^(1-α) - min^(1-α)) * u + min^(1-α))^(1/(1-α)),  u ∈ [0, 1)
    /// ```
    ///
    /// For α = 1 the distribution is log-uniform.
    pub fn sample_mass<R: Rng + ?Sized>(&self, rng: &mut R) -> Scalar {
        let u: Scalar = rng.random();
        let exponent = 1.0 - self.mass_power_law_scaling;

        let mass = if exponent.abs() < Scalar::EPSILON {
            self.min_mass * pow(self.max_mass / self.min_mass, u)
        } else {
            let low = pow(self.min_mass, exponent);
            let high = pow(self.max_mass, exponent);
            pow((high - low) * u + low, 1.0 / exponent)
        };

        // Rounding in pow can land a hair outside the bounds
        mass.clamp(self.min_mass, self.max_mass)
    }
}

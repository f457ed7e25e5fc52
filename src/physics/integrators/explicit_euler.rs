//! Explicit Euler integration method (forward Euler)
//!
//! Used as the baseline scheme and for simple first-order ODEs. It is not
//! symplectic: orbits integrated with it drift in energy over time.

use super::{Derivative, IntegrationError, Integrator, evaluate_checked};
use crate::physics::math::{Scalar, StateVector, offset_state};

/// Explicit Euler integrator (forward Euler method)
///
/// ```text
/// y(t+dt) = y(t) + dt * f(y(t), t)
/// ```
///
/// - **Order of accuracy**: O(dt²) local, O(dt) global truncation error
/// - **Derivative evaluations**: 1 per step
/// - **Symplectic**: No
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn integrate(
        &self,
        state: &[Scalar],
        derivative: &dyn Derivative,
        dt: Scalar,
        t: Scalar,
    ) -> Result<StateVector, IntegrationError> {
        let rate = evaluate_checked(derivative, state, t, state.len())?;
        Ok(offset_state(state, &rate, dt))
    }

    fn name(&self) -> &'static str {
        "euler"
    }

    fn convergence_order(&self) -> usize {
        1
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["explicit_euler", "forward_euler"]
    }
}

//! Position (Störmer) Verlet integration method

use super::{Derivative, IntegrationError, Integrator, evaluate_checked, half_length};
use crate::physics::math::{Scalar, StateVector};

/// Position Verlet integrator
///
/// Velocity is never stored. The state carries the current position and the
/// position one step earlier:
///
/// ```text
/// state = [x(t), x(t-dt)]
/// a     = f(state, t)                       (length n)
/// x(t+dt) = 2*x(t) - x(t-dt) + a * dt²
/// result  = [x(t+dt), x(t)]
/// ```
///
/// The derivative receives the whole concatenated state and must slice out
/// whatever it needs itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionVerlet;

impl Integrator for PositionVerlet {
    fn integrate(
        &self,
        state: &[Scalar],
        derivative: &dyn Derivative,
        dt: Scalar,
        t: Scalar,
    ) -> Result<StateVector, IntegrationError> {
        let n = half_length(state)?;
        let (position, previous_position) = state.split_at(n);
        let acceleration = evaluate_checked(derivative, state, t, n)?;
        let dt_squared = dt * dt;

        let mut next = Vec::with_capacity(state.len());
        next.extend(
            position
                .iter()
                .zip(previous_position)
                .zip(&acceleration)
                .map(|((x, x_previous), a)| 2.0 * x - x_previous + a * dt_squared),
        );
        next.extend_from_slice(position);

        Ok(next)
    }

    fn name(&self) -> &'static str {
        "verlet"
    }

    fn convergence_order(&self) -> usize {
        2
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["position_verlet", "stormer_verlet"]
    }
}

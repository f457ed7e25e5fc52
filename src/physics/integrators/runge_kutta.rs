//! Runge-Kutta integration methods

use super::{Derivative, IntegrationError, Integrator, evaluate_checked};
use crate::physics::math::{Scalar, StateVector, offset_state};

/// Fourth-order Runge-Kutta integrator (RK4)
///
/// A classic multi-stage integrator that provides fourth-order accuracy
/// by combining four intermediate evaluations of the derivative.
///
/// The RK4 algorithm:
/// 1. k1 = f(y, t)
/// 2. k2 = f(y + k1*dt/2, t + dt/2)
/// 3. k3 = f(y + k2*dt/2, t + dt/2)
/// 4. k4 = f(y + k3*dt, t + dt)
/// 5. y(t+dt) = y(t) + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
///
/// The derivative is evaluated exactly four times per step. Results are exact
/// for constant derivatives, and for derivatives that depend on `t` alone as a
/// polynomial of degree three or less.
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaFourthOrder;

impl Integrator for RungeKuttaFourthOrder {
    fn integrate(
        &self,
        state: &[Scalar],
        derivative: &dyn Derivative,
        dt: Scalar,
        t: Scalar,
    ) -> Result<StateVector, IntegrationError> {
        let n = state.len();
        let half_dt = 0.5 * dt;

        let k1 = evaluate_checked(derivative, state, t, n)?;
        let k2 = evaluate_checked(derivative, &offset_state(state, &k1, half_dt), t + half_dt, n)?;
        let k3 = evaluate_checked(derivative, &offset_state(state, &k2, half_dt), t + half_dt, n)?;
        let k4 = evaluate_checked(derivative, &offset_state(state, &k3, dt), t + dt, n)?;

        // Weighted mean slope first, so constant derivatives come out exact
        Ok((0..n)
            .map(|i| {
                let slope = (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) / 6.0;
                state[i] + dt * slope
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "rk4"
    }

    fn convergence_order(&self) -> usize {
        4
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["runge_kutta_fourth_order", "runge_kutta"]
    }
}

//! Velocity Verlet integration method

use super::{Derivative, IntegrationError, Integrator, evaluate_checked, half_length};
use crate::physics::math::{Scalar, StateVector};

/// Velocity Verlet integrator
///
/// A second-order symplectic integrator that provides excellent energy conservation
/// for Hamiltonian systems like gravitational n-body simulations. The state is
/// `[x(n), v(n)]` and the derivative returns `[v(n), a(n)]`; only the
/// acceleration half is used.
///
/// The algorithm:
/// 1. a(t) = second half of f([x, v], t)
/// 2. x(t+dt) = x(t) + v(t)*dt + 0.5*a(t)*dt²
/// 3. a(t+dt) = second half of f([x(t+dt), v(t)], t+dt)
/// 4. v(t+dt) = v(t) + 0.5*(a(t) + a(t+dt))*dt
///
/// Step 3 deliberately passes the pre-update velocity. Accelerations that only
/// depend on position are unaffected, and there is no corrector iteration. The
/// derivative is evaluated exactly twice per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityVerlet;

impl Integrator for VelocityVerlet {
    fn integrate(
        &self,
        state: &[Scalar],
        derivative: &dyn Derivative,
        dt: Scalar,
        t: Scalar,
    ) -> Result<StateVector, IntegrationError> {
        let n = half_length(state)?;
        let (position, velocity) = state.split_at(n);

        let initial_acceleration = evaluate_checked(derivative, state, t, state.len())?.split_off(n);

        let mut predicted: StateVector = position
            .iter()
            .zip(velocity)
            .zip(&initial_acceleration)
            .map(|((x, v), a)| x + v * dt + 0.5 * a * dt * dt)
            .collect();
        predicted.extend_from_slice(velocity);

        let final_acceleration =
            evaluate_checked(derivative, &predicted, t + dt, state.len())?.split_off(n);

        // Reuse the predicted buffer: its second half becomes the new velocity
        for i in 0..n {
            predicted[n + i] =
                velocity[i] + 0.5 * (initial_acceleration[i] + final_acceleration[i]) * dt;
        }

        Ok(predicted)
    }

    fn name(&self) -> &'static str {
        "velocityVerlet"
    }

    fn convergence_order(&self) -> usize {
        2
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["velocity_verlet"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_velocity_verlet_simple_step() {
        // [x, y, z, vx, vy, vz] under constant gravity along z
        let gravity = |state: &[Scalar], _: Scalar| -> StateVector {
            vec![state[3], state[4], state[5], 0.0, 0.0, -9.81]
        };
        let dt = 0.01;

        let next = VelocityVerlet
            .integrate(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &gravity, dt, 0.0)
            .unwrap();

        assert!((next[0] - 1.0).abs() < 1e-12);
        assert!((next[1] - 0.01).abs() < 1e-12);
        assert!((next[2] - (-0.0004905)).abs() < 1e-12);
        assert_eq!(next[3], 0.0);
        assert_eq!(next[4], 1.0);
        assert!((next[5] - (-0.0981)).abs() < 1e-12);
    }

    #[test]
    fn test_velocity_verlet_averages_accelerations() {
        // a = -x, so the second evaluation sees the moved position
        let spring = |state: &[Scalar], _: Scalar| -> StateVector { vec![state[1], -state[0]] };
        let dt = 0.1;

        let next = VelocityVerlet
            .integrate(&[1.0, 0.0], &spring, dt, 0.0)
            .unwrap();

        let new_position = 1.0 - 0.5 * dt * dt;
        let expected_velocity = 0.5 * (-1.0 - new_position) * dt;
        assert!((next[0] - new_position).abs() < 1e-15);
        assert!((next[1] - expected_velocity).abs() < 1e-15);
    }

    #[test]
    fn test_velocity_verlet_second_call_uses_old_velocity() {
        let calls = Cell::new(0);
        let second_call_velocity = Cell::new(Scalar::NAN);
        let second_call_time = Cell::new(Scalar::NAN);
        let recorder = |state: &[Scalar], t: Scalar| -> StateVector {
            calls.set(calls.get() + 1);
            if calls.get() == 2 {
                second_call_velocity.set(state[1]);
                second_call_time.set(t);
            }
            vec![state[1], 3.0]
        };

        VelocityVerlet
            .integrate(&[0.0, 2.0], &recorder, 0.5, 1.0)
            .unwrap();

        assert_eq!(calls.get(), 2);
        assert_eq!(second_call_velocity.get(), 2.0);
        assert_eq!(second_call_time.get(), 1.5);
    }

    #[test]
    fn test_energy_conservation() {
        // Simple harmonic oscillator, k = m = 1
        let spring = |state: &[Scalar], _: Scalar| -> StateVector { vec![state[1], -state[0]] };
        let energy = |state: &[Scalar]| 0.5 * state[1] * state[1] + 0.5 * state[0] * state[0];
        let dt = 0.01;

        let mut state = vec![1.0, 0.0];
        let initial_energy = energy(&state);
        let mut max_energy_error: Scalar = 0.0;
        for step in 0..10_000 {
            state = VelocityVerlet
                .integrate(&state, &spring, dt, step as Scalar * dt)
                .unwrap();
            let energy_error = ((energy(&state) - initial_energy) / initial_energy).abs();
            max_energy_error = max_energy_error.max(energy_error);
        }

        assert!(max_energy_error < 1e-4, "Energy error: {max_energy_error}");
    }

    #[test]
    fn test_velocity_verlet_rejects_position_only_derivative() {
        let acceleration_only = |_: &[Scalar], _: Scalar| -> StateVector { vec![0.0] };

        let result = VelocityVerlet.integrate(&[0.0, 1.0], &acceleration_only, 0.1, 0.0);

        assert_eq!(
            result,
            Err(IntegrationError::DerivativeLength {
                expected: 2,
                actual: 1
            })
        );
    }
}

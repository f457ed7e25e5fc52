//! Numerical integration methods for the simulation sandbox
//!
//! Every integrator is a pure step function over a flat phase-space state.
//! The layout of that state depends on the scheme:
//!
//! | Integrator      | State layout                   | Derivative returns            |
//! |-----------------|--------------------------------|-------------------------------|
//! | Explicit Euler  | any vector `y`                 | `dy/dt`, same length as `y`   |
//! | RK4             | any vector `y`                 | `dy/dt`, same length as `y`   |
//! | Position Verlet | `[x(n), x_previous(n)]`        | acceleration, length `n`      |
//! | Velocity Verlet | `[x(n), v(n)]`                 | `[v(n), a(n)]`, length `2n`   |
//!
//! Integrators never mutate the state they are given. A derivative whose output
//! has the wrong length is reported as an [`IntegrationError`] rather than
//! silently producing NaN entries.

use crate::physics::math::{Scalar, StateVector};
use std::fmt;

pub mod explicit_euler;
pub mod registry;
pub mod runge_kutta;
pub mod velocity_verlet;
pub mod verlet;

pub use explicit_euler::ExplicitEuler;
pub use registry::{IntegratorKind, IntegratorRegistry, RegistryError};
pub use runge_kutta::RungeKuttaFourthOrder;
pub use velocity_verlet::VelocityVerlet;
pub use verlet::PositionVerlet;

/// Rate-of-change function consumed by the integrators
///
/// Implemented for any `Fn(&[Scalar], Scalar) -> StateVector`, so plain
/// closures can be handed to [`Integrator::integrate`] directly. Implementations
/// must be deterministic for a fixed `(state, t)`.
pub trait Derivative {
    fn evaluate(&self, state: &[Scalar], t: Scalar) -> StateVector;
}

impl<F> Derivative for F
where
    F: Fn(&[Scalar], Scalar) -> StateVector,
{
    #[inline]
    fn evaluate(&self, state: &[Scalar], t: Scalar) -> StateVector {
        self(state, t)
    }
}

/// Malformed input handed to an integrator
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationError {
    /// The derivative returned a vector of the wrong length
    DerivativeLength { expected: usize, actual: usize },
    /// A Verlet-family state must hold two halves of equal length
    OddStateLength(usize),
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationError::DerivativeLength { expected, actual } => write!(
                f,
                "Derivative returned {actual} components, expected {expected}"
            ),
            IntegrationError::OddStateLength(len) => write!(
                f,
                "State of length {len} cannot be split into position and velocity halves"
            ),
        }
    }
}

impl std::error::Error for IntegrationError {}

/// Base trait for all integrators
pub trait Integrator {
    /// Advance `state` by one step of size `dt`, starting at time `t`
    ///
    /// Returns a new state; the input is left untouched. `dt` is not
    /// validated: zero gives a degenerate step and negative values step
    /// backwards in time.
    fn integrate(
        &self,
        state: &[Scalar],
        derivative: &dyn Derivative,
        dt: Scalar,
        t: Scalar,
    ) -> Result<StateVector, IntegrationError>;

    /// Canonical registry name
    fn name(&self) -> &'static str;

    /// Order of the global truncation error
    fn convergence_order(&self) -> usize;

    /// Alternative names accepted by the registry
    fn aliases(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Advance a scalar ODE `dy/dt = f(y, t)`
    ///
    /// The scalar is treated as a one-dimensional state and unwrapped again on
    /// return, so a scalar in always gives a scalar out. Only meaningful for
    /// schemes that accept arbitrary-length states; the Verlet family reports
    /// [`IntegrationError::OddStateLength`].
    fn integrate_scalar(
        &self,
        state: Scalar,
        derivative: &dyn Fn(Scalar, Scalar) -> Scalar,
        dt: Scalar,
        t: Scalar,
    ) -> Result<Scalar, IntegrationError> {
        let vector_derivative =
            |state: &[Scalar], t: Scalar| -> StateVector { vec![derivative(state[0], t)] };
        let next = self.integrate(&[state], &vector_derivative, dt, t)?;
        Ok(next[0])
    }
}

/// Evaluate `derivative` and check the length of what it returned
pub(crate) fn evaluate_checked(
    derivative: &dyn Derivative,
    state: &[Scalar],
    t: Scalar,
    expected: usize,
) -> Result<StateVector, IntegrationError> {
    let rate = derivative.evaluate(state, t);
    if rate.len() != expected {
        return Err(IntegrationError::DerivativeLength {
            expected,
            actual: rate.len(),
        });
    }
    Ok(rate)
}

/// Length of one half of a Verlet-family state
pub(crate) fn half_length(state: &[Scalar]) -> Result<usize, IntegrationError> {
    if state.len() % 2 != 0 {
        return Err(IntegrationError::OddStateLength(state.len()));
    }
    Ok(state.len() / 2)
}

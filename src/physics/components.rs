//! Body entity for the gravity domain

use crate::physics::math::{Scalar, Vector};

/// Identifier assigned when a body is created
pub type BodyId = usize;

/// A point mass in the gravity simulation
///
/// Bodies are owned by [`GravityEngine`](crate::physics::engine::GravityEngine);
/// everything handed out by the engine is a copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub position: Vector,
    pub velocity: Vector,
    /// Always positive
    pub mass: Scalar,
}

impl Body {
    pub fn new(id: BodyId, position: Vector, velocity: Vector, mass: Scalar) -> Self {
        Self {
            id,
            position,
            velocity,
            mass,
        }
    }

    /// Body at rest at `(x, y)`
    pub fn at_rest(id: BodyId, x: Scalar, y: Scalar, mass: Scalar) -> Self {
        Self::new(id, Vector::new(x, y), Vector::ZERO, mass)
    }

    /// Phase-space state `[x, y, vx, vy]`
    #[inline]
    pub fn phase_state(&self) -> [Scalar; 4] {
        [
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
        ]
    }

    #[inline]
    pub fn kinetic_energy(&self) -> Scalar {
        0.5 * self.mass * self.velocity.length_squared()
    }

    #[inline]
    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }
}

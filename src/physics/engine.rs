//! Direct-summation N-body gravity engine
//!
//! The engine owns its bodies exclusively. Each [`GravityEngine::step`] runs in
//! two phases: forces are accumulated over every unordered pair, then each body
//! is advanced by the configured integrator with its force held constant over
//! the step. New states are only written back once every body has been
//! integrated, so a failed step leaves the engine untouched.

use crate::config::PhysicsConfig;
use crate::physics::components::Body;
use crate::physics::errors::{DomainError, SimulationError};
use crate::physics::forces::ForceModel;
use crate::physics::integrators::{IntegrationError, Integrator, IntegratorKind};
use crate::physics::math::{Scalar, StateVector, Vector, wrap_coordinate};
use crate::resources::SharedRng;
use bevy::prelude::*;
use rand::Rng;

/// Initial velocity components are drawn from `[-limit, limit]`
pub const INITIAL_SPEED_LIMIT: Scalar = 10.0;

/// Immutable copy of the engine state handed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSnapshot {
    pub bodies: Vec<Body>,
    pub width: Scalar,
    pub height: Scalar,
}

impl SimulationSnapshot {
    pub fn total_mass(&self) -> Scalar {
        self.bodies.iter().map(|body| body.mass).sum()
    }

    pub fn kinetic_energy(&self) -> Scalar {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn momentum(&self) -> Vector {
        self.bodies.iter().map(Body::momentum).sum()
    }

    /// Mass-weighted mean position, `None` without bodies
    pub fn barycenter(&self) -> Option<Vector> {
        let total_mass = self.total_mass();
        if total_mass <= Scalar::EPSILON {
            return None;
        }
        let weighted: Vector = self
            .bodies
            .iter()
            .map(|body| body.position * body.mass)
            .sum();
        Some(weighted / total_mass)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct GravityEngine {
    bodies: Vec<Body>,
    width: Scalar,
    height: Scalar,
    gravitational_constant: Scalar,
    timestep: Scalar,
    integrator: IntegratorKind,
    force_model: ForceModel,
    rng: SharedRng,
    elapsed_time: Scalar,
    step_count: u64,
}

impl Default for GravityEngine {
    fn default() -> Self {
        let config = PhysicsConfig::default();
        let mut engine = Self {
            bodies: Vec::new(),
            width: config.width,
            height: config.height,
            gravitational_constant: config.gravitational_constant,
            timestep: config.timestep,
            integrator: IntegratorKind::default(),
            force_model: ForceModel::from(&config),
            rng: SharedRng::default(),
            elapsed_time: 0.0,
            step_count: 0,
        };
        engine.initialize(config.body_count);
        engine
    }
}

impl GravityEngine {
    /// Check every physics parameter and resolve the integrator name without
    /// building anything
    pub fn validate_config(config: &PhysicsConfig) -> Result<IntegratorKind, SimulationError> {
        ForceModel::from(config).validate()?;
        validate_dimensions(config.width, config.height)?;
        if !config.gravitational_constant.is_finite() {
            return Err(DomainError::NonFinite("gravitational_constant").into());
        }
        if !config.timestep.is_finite() {
            return Err(DomainError::NonFinite("timestep").into());
        }
        if config.timestep <= 0.0 {
            return Err(DomainError::NonPositiveTimestep(config.timestep).into());
        }
        Ok(config.integrator.parse()?)
    }

    /// Build an engine from configuration and populate it with
    /// `config.body_count` random bodies
    pub fn from_config(config: &PhysicsConfig) -> Result<Self, SimulationError> {
        let integrator = Self::validate_config(config)?;
        let force_model = ForceModel::from(config);

        let mut engine = Self {
            bodies: Vec::new(),
            width: config.width,
            height: config.height,
            gravitational_constant: config.gravitational_constant,
            timestep: config.timestep,
            integrator,
            force_model,
            rng: SharedRng::from_optional_seed(config.initial_seed),
            elapsed_time: 0.0,
            step_count: 0,
        };
        engine.initialize(config.body_count);
        Ok(engine)
    }

    /// Replace the body collection with `count` freshly generated bodies
    pub fn initialize(&mut self, count: usize) {
        self.bodies = spawn_bodies(
            count,
            self.width,
            self.height,
            &self.force_model,
            &mut *self.rng,
        );
        self.elapsed_time = 0.0;
        self.step_count = 0;
        info!(
            "Initialized {} bodies on a {}x{} area using the {} integrator",
            count, self.width, self.height, self.integrator
        );
    }

    /// Replace the body collection with explicit bodies
    ///
    /// Every body needs a finite position and velocity and a positive finite
    /// mass. On error the current bodies are kept.
    pub fn load_bodies(&mut self, bodies: Vec<Body>) -> Result<(), DomainError> {
        for body in &bodies {
            if !(body.mass.is_finite() && body.mass > 0.0) {
                return Err(DomainError::NonPositiveMass {
                    id: body.id,
                    mass: body.mass,
                });
            }
            if !(body.position.is_finite() && body.velocity.is_finite()) {
                return Err(DomainError::NonFinite("body state"));
            }
        }
        self.bodies = bodies;
        self.elapsed_time = 0.0;
        self.step_count = 0;
        Ok(())
    }

    /// `count` bodies with ids `0..count`, positions uniform over the area,
    /// velocity components uniform in `[-INITIAL_SPEED_LIMIT, INITIAL_SPEED_LIMIT]`
    /// and power-law masses
    pub fn generate_random_bodies<R: Rng + ?Sized>(
        count: usize,
        width: Scalar,
        height: Scalar,
        force_model: &ForceModel,
        rng: &mut R,
    ) -> Result<Vec<Body>, DomainError> {
        validate_dimensions(width, height)?;
        force_model.validate()?;
        Ok(spawn_bodies(count, width, height, force_model, rng))
    }

    /// Advance every body by one timestep
    pub fn step(&mut self) -> Result<(), IntegrationError> {
        let forces = self.accumulate_forces();

        let advanced = self
            .bodies
            .iter()
            .zip(&forces)
            .map(|(body, force)| self.advance_body(body, *force))
            .collect::<Result<Vec<_>, _>>()?;

        self.bodies = advanced;
        self.elapsed_time += self.timestep;
        self.step_count += 1;
        Ok(())
    }

    /// Net force on every body, summed over each unordered pair once
    fn accumulate_forces(&self) -> Vec<Vector> {
        let mut forces = vec![Vector::ZERO; self.bodies.len()];

        for (i, a) in self.bodies.iter().enumerate() {
            for (j, b) in self.bodies.iter().enumerate().skip(i + 1) {
                let force = self.force_model.force(a, b, self.gravitational_constant);
                forces[i] += force;
                forces[j] -= force;
            }
        }

        forces
    }

    fn advance_body(&self, body: &Body, force: Vector) -> Result<Body, IntegrationError> {
        let acceleration = force / body.mass;
        let dt = self.timestep;
        let t = self.elapsed_time;

        let (position, velocity) = match self.integrator {
            IntegratorKind::PositionVerlet => {
                // Bodies carry velocity, so reconstruct the previous position from it
                let previous_position = body.position - body.velocity * dt;
                let state = [
                    body.position.x,
                    body.position.y,
                    previous_position.x,
                    previous_position.y,
                ];
                let derivative = move |_: &[Scalar], _: Scalar| -> StateVector {
                    vec![acceleration.x, acceleration.y]
                };

                let next = self.integrator.integrate(&state, &derivative, dt, t)?;
                let position = Vector::new(next[0], next[1]);
                (position, (position - body.position) / dt)
            }
            kind => {
                let derivative = move |state: &[Scalar], _: Scalar| -> StateVector {
                    vec![state[2], state[3], acceleration.x, acceleration.y]
                };

                let next = kind.integrate(&body.phase_state(), &derivative, dt, t)?;
                (Vector::new(next[0], next[1]), Vector::new(next[2], next[3]))
            }
        };

        Ok(Body {
            position: Vector::new(
                wrap_coordinate(position.x, self.width),
                wrap_coordinate(position.y, self.height),
            ),
            velocity,
            ..*body
        })
    }

    /// Deep copy of the current bodies and area
    pub fn state(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            bodies: self.bodies.clone(),
            width: self.width,
            height: self.height,
        }
    }

    /// Re-initialize with `count` bodies, or with the current count
    pub fn reset(&mut self, count: Option<usize>) {
        let count = count.unwrap_or(self.bodies.len());
        self.initialize(count);
    }

    pub fn set_gravitational_constant(&mut self, g: Scalar) -> Result<(), DomainError> {
        if !g.is_finite() {
            return Err(DomainError::NonFinite("gravitational_constant"));
        }
        self.gravitational_constant = g;
        Ok(())
    }

    /// Resize the area. Existing positions are not rescaled; bodies outside
    /// the new bounds wrap back in on the next step.
    pub fn set_dimensions(&mut self, width: Scalar, height: Scalar) -> Result<(), DomainError> {
        validate_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn set_integrator(&mut self, integrator: IntegratorKind) {
        self.integrator = integrator;
    }

    pub fn integrator(&self) -> IntegratorKind {
        self.integrator
    }

    pub fn gravitational_constant(&self) -> Scalar {
        self.gravitational_constant
    }

    pub fn dimensions(&self) -> (Scalar, Scalar) {
        (self.width, self.height)
    }

    pub fn timestep(&self) -> Scalar {
        self.timestep
    }

    pub fn force_model(&self) -> &ForceModel {
        &self.force_model
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Simulated seconds since the last (re)initialization
    pub fn elapsed_time(&self) -> Scalar {
        self.elapsed_time
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}

/// Callers have validated the area and the force model
fn spawn_bodies<R: Rng + ?Sized>(
    count: usize,
    width: Scalar,
    height: Scalar,
    force_model: &ForceModel,
    rng: &mut R,
) -> Vec<Body> {
    (0..count)
        .map(|id| {
            let position = Vector::new(
                rng.random_range(0.0..=width),
                rng.random_range(0.0..=height),
            );
            let velocity = Vector::new(
                rng.random_range(-INITIAL_SPEED_LIMIT..=INITIAL_SPEED_LIMIT),
                rng.random_range(-INITIAL_SPEED_LIMIT..=INITIAL_SPEED_LIMIT),
            );
            let mass = force_model.sample_mass(rng);
            Body::new(id, position, velocity, mass)
        })
        .collect()
}

fn validate_dimensions(width: Scalar, height: Scalar) -> Result<(), DomainError> {
    if !(width.is_finite() && height.is_finite()) {
        return Err(DomainError::NonFinite("dimensions"));
    }
    if width <= 0.0 || height <= 0.0 {
        return Err(DomainError::NonPositiveDimensions { width, height });
    }
    Ok(())
}

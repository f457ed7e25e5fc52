//! Numerical core: integrators, force model, and the gravity engine

pub mod components;
pub mod engine;
pub mod errors;
pub mod forces;
pub mod integrators;
pub mod math;

use bevy::prelude::*;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

/// Random source the engine draws initial bodies from
///
/// Each engine owns its own stream, so a seeded engine replays the same
/// bodies on every run and across `reset` sequences. Without a seed the
/// stream starts from the thread-local generator.
#[derive(Resource, Deref, DerefMut, Debug, Clone, PartialEq)]
pub struct SharedRng(pub ChaCha8Rng);

impl SharedRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// `initial_seed` from the physics configuration
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::default, Self::from_seed)
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

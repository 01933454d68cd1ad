//! Per-run generation state.
//!
//! A [`GenerationContext`] owns everything that shrinks or advances during
//! one dataset run: the seeded random source and the word pools. A fresh
//! context is built for every dataset, so nothing leaks between runs.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{ConfigError, ContentConfig};
use crate::content::ContentPools;

/// Random source and content pools for one dataset run.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// The single random source every component draws from.
    pub rng: StdRng,
    /// Remaining names and words.
    pub content: ContentPools,
    seed: u64,
}

impl GenerationContext {
    /// Context seeded with `seed` over the given pools.
    pub fn new(seed: u64, content: ContentPools) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            content,
            seed,
        }
    }

    /// Context seeded with `seed` over pools loaded from `config`.
    pub fn load(seed: u64, config: &ContentConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(seed, ContentPools::load(config)?))
    }

    /// The seed this context started from.
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

//! # Maze Seeds
//!
//! Every random decision made while carving comes from one seed.
//!
//! ## Determinism Guarantee
//!
//! Given the same `MazeSeed`, carving produces **exactly** the same grid on
//! any platform, any time. `ChaCha8Rng` is used instead of `StdRng` because
//! its output stream is fixed across `rand` releases.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seed for deterministic maze generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MazeSeed(u64);

impl MazeSeed {
    /// Creates a new maze seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Builds the random stream used by the carver.
    #[must_use]
    pub fn rng(self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0)
    }
}

impl Default for MazeSeed {
    /// Kept below `i64::MAX` so it can be written back to TOML.
    fn default() -> Self {
        Self(0x4341_5441_434F_4D42)
    }
}

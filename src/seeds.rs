//! Seed management for terrain generation
//!
//! A single master seed is split into one seed per random system, so the height field and the
//! water shimmer can be reproduced (or varied) independently.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeds for every random system in one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Corner seeding and per-level displacement
    pub heightmap: u64,
    /// Per-cell water alpha
    pub shimmer: u64,
}

impl TerrainSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            heightmap: derive_seed(master, "heightmap"),
            shimmer: derive_seed(master, "shimmer"),
        }
    }

    /// Generator for the height field.
    pub fn heightmap_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.heightmap)
    }
}

impl Default for TerrainSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Derive a sub-seed from a master seed and a system name.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for TerrainSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TerrainSeeds {{ master: {}, heightmap: {}, shimmer: {} }}",
            self.master, self.heightmap, self.shimmer,
        )
    }
}

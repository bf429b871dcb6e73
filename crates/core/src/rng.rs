//! RNG module - uniform random piece generation
//!
//! Every draw picks one of the seven kinds with equal probability,
//! independently of earlier draws (no bag, no anti-repeat). The generator is
//! seeded so a given seed replays the same piece sequence, which keeps tests
//! and recorded sessions reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Seeded uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: StdRng,
    seed: u64,
}

impl PieceGenerator {
    /// Create a generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator seeded from OS entropy.
    ///
    /// The chosen seed is kept so the session can still be replayed.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

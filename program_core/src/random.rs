//! Injectable randomness for exercise variety.
//!
//! The split planner never touches a global RNG. Callers hand it any
//! `RngCore`; tests pass a seeded `StdRng` to get repeatable programs.

use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

pub use rand::rngs::StdRng;

/// Deterministic generator for a fixed seed
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generator seeded from the operating system
pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}

/// Shuffled copy of `items`
pub fn shuffled<T: Clone>(rng: &mut dyn RngCore, items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

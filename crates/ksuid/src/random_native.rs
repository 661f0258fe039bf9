use rand::{Rng, rng};

use crate::RandSource;

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically.
///
/// Suitable for high-throughput, contention-free ID generation.
#[derive(Default, Clone)]
pub struct ThreadRandom;

impl RandSource<u128> for ThreadRandom {
    fn rand(&self) -> u128 {
        rng().random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_is_not_constant() {
        let a: u128 = ThreadRandom.rand();
        let b: u128 = ThreadRandom.rand();
        assert_ne!(a, b);
    }
}

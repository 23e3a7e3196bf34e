// Copyright (c) The range-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use proptest::{
    strategy::{Strategy, ValueTree},
    test_runner::{Config, RngAlgorithm, TestRng, TestRunner},
};
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

/// Generates values from proptest strategies, reproducibly from a seed.
pub struct ValueGenerator {
    runner: TestRunner,
}

impl ValueGenerator {
    /// Creates a generator whose RNG is seeded from the hash of `seed`.
    pub fn from_seed(seed: impl Hash) -> Self {
        // ChaCha takes a 32-byte seed: four 64-bit hashes with different hasher seeds.
        let mut bytes = [0u8; 32];
        for (ix, chunk) in bytes.chunks_exact_mut(8).enumerate() {
            let mut hasher = XxHash64::with_seed(ix as u64);
            seed.hash(&mut hasher);
            chunk.copy_from_slice(&hasher.finish().to_le_bytes());
        }
        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &bytes);
        Self {
            runner: TestRunner::new_with_rng(Config::default(), rng),
        }
    }

    /// Forks off a new generator, advancing this one by a single step.
    ///
    /// Values drawn from the fork don't affect what this generator produces next.
    pub fn partial_clone(&mut self) -> Self {
        Self {
            runner: TestRunner::new_with_rng(Config::default(), self.runner.new_rng()),
        }
    }

    /// Draws a value from `strategy`.
    pub fn generate<S: Strategy>(&mut self, strategy: S) -> S::Value {
        strategy
            .new_tree(&mut self.runner)
            .expect("the strategies used here never reject values")
            .current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_seed_same_values() {
        let mut a = ValueGenerator::from_seed("range-min");
        let mut b = ValueGenerator::from_seed("range-min");
        let strategy = prop::collection::vec(0..1000u32, 16);
        assert_eq!(a.generate(&strategy), b.generate(&strategy));

        let mut fork_a = a.partial_clone();
        let mut fork_b = b.partial_clone();
        assert_eq!(fork_a.generate(&strategy), fork_b.generate(&strategy));
        assert_eq!(a.generate(&strategy), b.generate(&strategy));
    }

    #[test]
    fn test_different_seeds() {
        let mut a = ValueGenerator::from_seed("range-min");
        let mut b = ValueGenerator::from_seed("range-min-2");
        let strategy = prop::collection::vec(any::<u64>(), 4);
        assert_ne!(a.generate(&strategy), b.generate(&strategy));
    }
}

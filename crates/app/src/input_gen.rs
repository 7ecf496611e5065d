//! Benchmark input generation.
//!
//! Benchmarks run on uniformly random bits drawn from a seeded ChaCha8 RNG,
//! so the same `--seed` always benchmarks the same data.

use bitshield_core::Bit;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `size_bytes * 8` uniformly random bits.
pub fn generate_random_bits(seed: u32, size_bytes: usize) -> Vec<Bit> {
    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(seed));
    let len = size_bytes * 8;

    let mut bits = Vec::with_capacity(len);
    while bits.len() < len {
        // One draw yields 64 bits
        let word: u64 = rng.gen();
        let take = (len - bits.len()).min(64);
        bits.extend((0..take).map(|i| ((word >> i) & 1) as Bit));
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        for size in [0, 1, 7, 8, 9, 1000] {
            assert_eq!(generate_random_bits(999, size).len(), size * 8);
        }
    }

    #[test]
    fn test_determinism() {
        assert_eq!(generate_random_bits(12345, 500), generate_random_bits(12345, 500));
    }

    #[test]
    fn test_different_seeds() {
        assert_ne!(generate_random_bits(1, 100), generate_random_bits(2, 100));
    }

    #[test]
    fn test_bits_are_strict_and_balanced() {
        let bits = generate_random_bits(42, 4096);
        assert!(bits.iter().all(|&b| b <= 1));

        let ones = bits.iter().filter(|&&b| b == 1).count() as f64;
        let ratio = ones / bits.len() as f64;
        assert!(ratio > 0.48 && ratio < 0.52, "ratio {ratio}");
    }
}

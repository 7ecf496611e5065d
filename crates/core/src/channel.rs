//! Binary symmetric channel: independent bit-flip noise.
//!
//! Every bit passing through the channel is flipped with probability `p`,
//! independently of every other bit.
//!
//! # Determinism
//!
//! With a seed, all randomness comes from a ChaCha8 RNG seeded with that
//! exact value, so identical `(bits, p, seed)` triples give identical output
//! across calls and across process runs. Without a seed the RNG is seeded
//! from OS entropy and runs are not reproducible.
//!
//! # Edge Cases
//!
//! Draws are uniform in `[0, 1)` and a bit flips when `draw < p`, so
//! `p = 0.0` never flips and `p = 1.0` always flips.

use crate::bitio::Bit;
use crate::error::{InvalidParameter, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Noisy channel with its own random source.
///
/// # Thread Safety
/// Not shared; build one per thread or per trial.
#[derive(Debug, Clone)]
pub struct NoisyChannel {
    p: f64,
    rng: ChaCha8Rng,
    stats: ChannelStats,
}

impl NoisyChannel {
    /// Create a channel with flip probability `p`.
    ///
    /// # Errors
    /// `InvalidParameter::Probability` unless `0.0 <= p <= 1.0`.
    pub fn new(p: f64, seed: Option<u32>) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(InvalidParameter::Probability { p }.into());
        }

        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(u64::from(seed)),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            p,
            rng,
            stats: ChannelStats::default(),
        })
    }

    /// Create the channel for one trial of a multi-trial run.
    ///
    /// Trial `i` uses seed `base_seed + i` (wrapping), so a seeded run stays
    /// reproducible however its trials are scheduled.
    pub fn for_trial(p: f64, base_seed: Option<u32>, trial: u32) -> Result<Self> {
        Self::new(p, base_seed.map(|seed| seed.wrapping_add(trial)))
    }

    /// Flip probability of this channel.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Send bits through the channel, returning the received copy.
    ///
    /// Flipping is `bit ^ 1`, applied to the raw value.
    pub fn transmit(&mut self, bits: &[Bit]) -> Vec<Bit> {
        let mut flipped = 0u64;
        let received: Vec<Bit> = bits
            .iter()
            .map(|&bit| {
                let draw: f64 = self.rng.gen();
                if draw < self.p {
                    flipped += 1;
                    bit ^ 1
                } else {
                    bit
                }
            })
            .collect();

        self.stats.bits_sent += bits.len() as u64;
        self.stats.bits_flipped += flipped;
        tracing::trace!(bits = bits.len(), flipped, p = self.p, "channel transmit");

        received
    }

    /// Get statistics about channel behavior so far.
    pub fn stats(&self) -> ChannelStats {
        self.stats
    }
}

/// Counts of bits seen and flipped by a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Total bits sent into the channel
    pub bits_sent: u64,

    /// Bits inverted by noise
    pub bits_flipped: u64,
}

impl ChannelStats {
    /// Observed flip rate (flipped / sent).
    pub fn flip_rate(&self) -> f64 {
        if self.bits_sent == 0 {
            0.0
        } else {
            self.bits_flipped as f64 / self.bits_sent as f64
        }
    }
}

/// Apply bit-flip noise with probability `p` to a copy of `bits`.
///
/// # Errors
/// `InvalidParameter::Probability` unless `0.0 <= p <= 1.0`.
pub fn apply_noise(bits: &[Bit], p: f64, seed: Option<u32>) -> Result<Vec<Bit>> {
    Ok(NoisyChannel::new(p, seed)?.transmit(bits))
}

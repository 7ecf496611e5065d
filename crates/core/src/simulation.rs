//! Monte Carlo trials: encode once, then repeatedly send the codeword stream
//! through a noisy channel, decode, and compare against the original.
//!
//! Each trial owns its channel. With a base seed, trial `i` is seeded with
//! `seed + i`, so results do not depend on the order trials run in.

use crate::bitio::Bit;
use crate::channel::NoisyChannel;
use crate::codec::Scheme;
use crate::error::{InvalidParameter, Result};
use crate::metrics::Timer;
use std::time::Duration;

/// Parameters of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Codec and its parameter
    pub scheme: Scheme,

    /// Channel flip probability [0.0, 1.0]
    pub p: f64,

    /// Number of independent trials (>= 1)
    pub trials: u32,

    /// Base seed; `None` draws every trial from OS entropy
    pub seed: Option<u32>,
}

/// Outcome of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOutcome {
    /// Mismatched bits over the original message length
    pub bit_errors: usize,

    /// Whether the message was recovered exactly
    pub success: bool,

    /// Bits flipped by the channel
    pub bits_flipped: u64,
}

/// Aggregated results of a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub scheme: Scheme,
    pub p: f64,
    pub trials: u32,

    /// Length of the original message in bits
    pub message_bits: usize,

    /// Length of the encoded stream in bits
    pub encoded_bits: usize,

    /// Decoded bit errors summed over all trials
    pub bit_errors: u64,

    /// Trials that recovered the message exactly
    pub successes: u32,

    /// Channel flips summed over all trials
    pub bits_flipped: u64,

    /// Wall time spent in the trial loop
    pub elapsed: Duration,
}

impl SimulationReport {
    /// Post-decoding bit error rate across all trials.
    ///
    /// Returns 0.0 for an empty message.
    pub fn ber(&self) -> f64 {
        let total = self.message_bits as u64 * u64::from(self.trials);
        if total == 0 {
            0.0
        } else {
            self.bit_errors as f64 / total as f64
        }
    }

    /// Fraction of trials that recovered the message exactly.
    pub fn success_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            f64::from(self.successes) / f64::from(self.trials)
        }
    }

    /// Raw channel bit error rate, before decoding.
    pub fn channel_ber(&self) -> f64 {
        let total = self.encoded_bits as u64 * u64::from(self.trials);
        if total == 0 {
            0.0
        } else {
            self.bits_flipped as f64 / total as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("Simulation Results:");
        println!("  Codec: {}", self.scheme);
        println!("  Noise probability: {:.6}", self.p);
        println!("  Trials: {}", self.trials);
        println!("  Message bits: {} (encoded: {})", self.message_bits, self.encoded_bits);
        println!("  Channel BER: {:.6}", self.channel_ber());
        println!("  Bit Error Rate (BER): {:.6}", self.ber());
        println!("  Message Success Rate: {:.6}", self.success_rate());
        println!("  Time: {:.6} ms", self.elapsed.as_secs_f64() * 1000.0);
    }

    /// Export results as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "codec={}\n\
             p={:.6}\n\
             trials={}\n\
             message_bits={}\n\
             encoded_bits={}\n\
             bit_errors={}\n\
             successes={}\n\
             channel_ber={:.6}\n\
             ber={:.6}\n\
             success_rate={:.6}\n\
             elapsed_ms={:.3}\n",
            self.scheme,
            self.p,
            self.trials,
            self.message_bits,
            self.encoded_bits,
            self.bit_errors,
            self.successes,
            self.channel_ber(),
            self.ber(),
            self.success_rate(),
            self.elapsed.as_secs_f64() * 1000.0,
        )
    }
}

/// Run one trial against an already-encoded stream.
///
/// The decoded output is compared over the original message length only, so
/// Hamming zero padding never counts as an error.
pub fn run_trial(
    scheme: &Scheme,
    original: &[Bit],
    encoded: &[Bit],
    channel: &mut NoisyChannel,
) -> Result<TrialOutcome> {
    let before = channel.stats().bits_flipped;
    let noisy = channel.transmit(encoded);
    let decoded = scheme.decode(&noisy)?;

    let compared = original.len().min(decoded.len());
    let bit_errors = original[..compared]
        .iter()
        .zip(&decoded[..compared])
        .filter(|(a, b)| a != b)
        .count()
        + (original.len() - compared);
    let success = decoded.len() >= original.len() && decoded[..original.len()] == *original;
    let bits_flipped = channel.stats().bits_flipped - before;

    tracing::trace!(p = channel.p(), bits_flipped, bit_errors, success, "trial finished");

    Ok(TrialOutcome {
        bit_errors,
        success,
        bits_flipped,
    })
}

/// Run `config.trials` independent trials of `original` through the channel.
///
/// # Errors
/// - `InvalidParameter::TrialCount` when `trials == 0`
/// - `InvalidParameter::Probability` for `p` outside [0.0, 1.0]
/// - any codec parameter error
pub fn simulate(config: &SimulationConfig, original: &[Bit]) -> Result<SimulationReport> {
    if config.trials == 0 {
        return Err(InvalidParameter::TrialCount { trials: 0 }.into());
    }

    let encoded = config.scheme.encode(original)?;

    let mut report = SimulationReport {
        scheme: config.scheme,
        p: config.p,
        trials: config.trials,
        message_bits: original.len(),
        encoded_bits: encoded.len(),
        bit_errors: 0,
        successes: 0,
        bits_flipped: 0,
        elapsed: Duration::ZERO,
    };

    let mut timer = Timer::started();
    for trial in 0..config.trials {
        let mut channel = NoisyChannel::for_trial(config.p, config.seed, trial)?;
        let outcome = run_trial(&config.scheme, original, &encoded, &mut channel)?;

        report.bit_errors += outcome.bit_errors as u64;
        report.bits_flipped += outcome.bits_flipped;
        if outcome.success {
            report.successes += 1;
        }
    }
    timer.stop();
    report.elapsed = timer.elapsed();

    tracing::debug!(
        scheme = %config.scheme,
        trials = config.trials,
        bit_errors = report.bit_errors,
        successes = report.successes,
        "simulation finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitio::text_to_bits;
    use crate::error::Error;

    fn config(scheme: Scheme, p: f64, trials: u32, seed: Option<u32>) -> SimulationConfig {
        SimulationConfig {
            scheme,
            p,
            trials,
            seed,
        }
    }

    #[test]
    fn test_noiseless_channel_always_succeeds() {
        let bits = text_to_bits("hello");
        for scheme in [Scheme::Repetition { n: 3 }, Scheme::Hamming74] {
            let report = simulate(&config(scheme, 0.0, 20, Some(1)), &bits).unwrap();
            assert_eq!(report.bit_errors, 0);
            assert_eq!(report.successes, 20);
            assert_eq!(report.ber(), 0.0);
            assert_eq!(report.success_rate(), 1.0);
            assert_eq!(report.channel_ber(), 0.0);
        }
    }

    #[test]
    fn test_hamming_padding_is_not_an_error() {
        // 5 bits pad to 8 on decode
        let bits = vec![1, 0, 1, 1, 1];
        let report = simulate(&config(Scheme::Hamming74, 0.0, 1, Some(1)), &bits).unwrap();
        assert_eq!(report.message_bits, 5);
        assert_eq!(report.encoded_bits, 14);
        assert_eq!(report.successes, 1);
    }

    #[test]
    fn test_full_noise_always_fails() {
        let bits = text_to_bits("abc");
        let report =
            simulate(&config(Scheme::Repetition { n: 3 }, 1.0, 5, Some(9)), &bits).unwrap();
        // Every bit inverts, majority vote inverts every bit
        assert_eq!(report.ber(), 1.0);
        assert_eq!(report.success_rate(), 0.0);
        assert_eq!(report.channel_ber(), 1.0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let bits = text_to_bits("reproducible");
        let cfg = config(Scheme::Repetition { n: 3 }, 0.1, 50, Some(42));
        let a = simulate(&cfg, &bits).unwrap();
        let b = simulate(&cfg, &bits).unwrap();
        assert_eq!(a.bit_errors, b.bit_errors);
        assert_eq!(a.successes, b.successes);
        assert_eq!(a.bits_flipped, b.bits_flipped);
    }

    #[test]
    fn test_trials_match_manual_loop() {
        let bits = text_to_bits("hi");
        let scheme = Scheme::Hamming74;
        let encoded = scheme.encode(&bits).unwrap();

        let mut expected_errors = 0u64;
        for trial in 0..10 {
            let mut channel = NoisyChannel::for_trial(0.05, Some(100), trial).unwrap();
            expected_errors += run_trial(&scheme, &bits, &encoded, &mut channel)
                .unwrap()
                .bit_errors as u64;
        }

        let report = simulate(&config(scheme, 0.05, 10, Some(100)), &bits).unwrap();
        assert_eq!(report.bit_errors, expected_errors);
    }

    #[test]
    fn test_coding_beats_raw_channel() {
        let bits = text_to_bits("The quick brown fox jumps over the lazy dog");
        let report =
            simulate(&config(Scheme::Repetition { n: 5 }, 0.05, 200, Some(3)), &bits).unwrap();
        assert!(report.ber() < report.channel_ber());
    }

    #[test]
    fn test_empty_message() {
        let report = simulate(&config(Scheme::Hamming74, 0.5, 3, None), &[]).unwrap();
        assert_eq!(report.ber(), 0.0);
        assert_eq!(report.success_rate(), 1.0);
    }

    #[test]
    fn test_zero_trials_rejected() {
        assert!(matches!(
            simulate(&config(Scheme::Hamming74, 0.1, 0, None), &[1]),
            Err(Error::InvalidParameter(InvalidParameter::TrialCount { trials: 0 }))
        ));
    }

    #[test]
    fn test_bad_probability_rejected() {
        assert!(matches!(
            simulate(&config(Scheme::Hamming74, 1.5, 1, None), &[1]),
            Err(Error::InvalidParameter(InvalidParameter::Probability { .. }))
        ));
    }

    #[test]
    fn test_export_text() {
        let bits = text_to_bits("x");
        let report = simulate(&config(Scheme::Repetition { n: 3 }, 0.0, 4, Some(1)), &bits).unwrap();

        let text = report.export_text();
        assert!(text.contains("codec=Repetition(n=3)\n"));
        assert!(text.contains("trials=4\n"));
        assert!(text.contains("message_bits=8\n"));
        assert!(text.contains("encoded_bits=24\n"));
        assert!(text.contains("success_rate=1.000000\n"));
    }
}

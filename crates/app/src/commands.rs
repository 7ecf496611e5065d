//! Subcommand implementations.
//!
//! Each handler reads its input, drives the core codecs, and writes results
//! to a file or stdout. Errors bubble up to `main`.

use crate::config::{Format, Source};
use crate::formats;
use crate::input_gen::generate_random_bits;
use bitshield_core::bitio::{bits_to_text, text_to_bits};
use bitshield_core::metrics::{throughput_mbps, Timer};
use bitshield_core::simulation::{simulate, SimulationConfig, SimulationReport};
use bitshield_core::{Bit, Result, Scheme};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Encode a message and write the codeword stream.
pub fn encode(
    scheme: &Scheme,
    source: &Source,
    input_format: Format,
    output: Option<&Path>,
    output_format: Format,
) -> Result<Vec<Bit>> {
    let input_bits = match source {
        Source::Text(text) => text_to_bits(text),
        Source::File(path) => match input_format {
            Format::Legacy => formats::read_legacy(path)?.1,
            Format::Text => formats::read_text(path)?,
        },
    };

    let encoded = scheme.encode(&input_bits)?;
    info!(
        codec = %scheme,
        input_bits = input_bits.len(),
        encoded_bits = encoded.len(),
        "encoded"
    );

    match output {
        Some(path) => match output_format {
            Format::Legacy => match scheme {
                Scheme::Repetition { n } => formats::write_legacy(path, *n, &encoded)?,
                // Hamming bit files carry no N prefix
                Scheme::Hamming74 => formats::write_bits(path, &encoded)?,
            },
            Format::Text => {
                if encoded.len() % 8 != 0 {
                    warn!(
                        bits = encoded.len(),
                        "encoded length is not a whole number of bytes; trailing bits dropped"
                    );
                }
                formats::write_text(path, &encoded)?
            }
        },
        None => {
            let line: String = encoded.iter().map(|bit| bit.to_string()).collect();
            println!("{line}");
        }
    }

    Ok(encoded)
}

/// Decode a codeword file and write the recovered message.
pub fn decode(
    scheme: &Scheme,
    input: &Path,
    format: Format,
    output: Option<&Path>,
) -> Result<Vec<Bit>> {
    let encoded = match (format, scheme) {
        // Hamming bit files carry no N prefix
        (Format::Legacy, Scheme::Hamming74) => formats::read_bits(input)?,
        (Format::Legacy, Scheme::Repetition { n }) => {
            let (file_n, bits) = formats::read_legacy(input)?;
            if file_n != *n {
                warn!(file_n, n, "repetition factor in file differs from --n, using --n");
            }
            bits
        }
        (Format::Text, _) => formats::read_text(input)?,
    };

    let decoded = scheme.decode(&encoded)?;
    info!(
        codec = %scheme,
        encoded_bits = encoded.len(),
        decoded_bits = decoded.len(),
        "decoded"
    );

    match output {
        Some(path) => formats::write_text(path, &decoded)?,
        None => print!("{}", bits_to_text(&decoded)),
    }

    Ok(decoded)
}

/// Run a noisy-channel simulation over `text`.
pub fn run_simulation(
    scheme: Scheme,
    text: &str,
    p: f64,
    trials: u32,
    seed: Option<u32>,
) -> Result<SimulationReport> {
    let original = text_to_bits(text);
    let config = SimulationConfig {
        scheme,
        p,
        trials,
        seed,
    };

    info!(codec = %scheme, p, trials, "starting simulation");
    let report = simulate(&config, &original)?;
    report.print_summary();
    Ok(report)
}

/// Timing of one encode + decode pass.
#[derive(Debug, Clone)]
pub struct BenchResult {
    pub scheme: Scheme,
    pub bits: usize,
    pub elapsed: Duration,

    /// Whether decode reproduced the input
    pub verified: bool,
}

impl BenchResult {
    /// Encode + decode throughput in Mbit/s (input bits counted twice).
    pub fn throughput_mbps(&self) -> f64 {
        throughput_mbps(self.bits * 2, self.elapsed)
    }
}

/// Time an encode + decode pass for each scheme over the same random data.
pub fn benchmark(schemes: &[Scheme], size_bytes: usize, seed: u32) -> Result<Vec<BenchResult>> {
    let bits = generate_random_bits(seed, size_bytes);
    info!(bits = bits.len(), seed, "generated benchmark data");

    let mut results = Vec::with_capacity(schemes.len());
    for scheme in schemes {
        let mut timer = Timer::started();
        let encoded = scheme.encode(&bits)?;
        let decoded = scheme.decode(&encoded)?;
        timer.stop();

        let result = BenchResult {
            scheme: *scheme,
            bits: bits.len(),
            elapsed: timer.elapsed(),
            verified: decoded.len() >= bits.len() && decoded[..bits.len()] == bits[..],
        };

        if result.verified {
            println!(
                "{}: {:.3} ms, Throughput: {:.2} Mbps",
                result.scheme,
                timer.elapsed_milliseconds(),
                result.throughput_mbps()
            );
        } else {
            println!("{}: FAILED (decoded output differs from input)", result.scheme);
        }
        results.push(result);
    }

    Ok(results)
}

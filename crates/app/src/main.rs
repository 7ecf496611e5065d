//! bitshield: error correction lab.
//!
//! Encodes and decodes bit streams with a repetition code or Hamming(7,4),
//! simulates transmission over a noisy binary channel, and benchmarks codec
//! throughput.

mod commands;
mod config;
mod formats;
mod input_gen;

use config::{Command, Config};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: Config) -> bitshield_core::Result<()> {
    match config.command {
        Command::Encode {
            scheme,
            source,
            input_format,
            output,
            output_format,
        } => {
            commands::encode(
                &scheme,
                &source,
                input_format,
                output.as_deref(),
                output_format,
            )?;
        }
        Command::Decode {
            scheme,
            input,
            format,
            output,
        } => {
            commands::decode(&scheme, &input, format, output.as_deref())?;
        }
        Command::Simulate {
            scheme,
            text,
            p,
            trials,
            seed,
        } => {
            commands::run_simulation(scheme, &text, p, trials, seed)?;
        }
        Command::Benchmark {
            schemes,
            size_bytes,
            seed,
        } => {
            commands::benchmark(&schemes, size_bytes, seed)?;
        }
        Command::Help => config::print_help(),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            config::print_help();
            return ExitCode::FAILURE;
        }
    };

    init_logging(config.verbose);

    if config.print_config {
        config.print();
    }

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

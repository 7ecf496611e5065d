//! Configuration for the bitshield command-line tool.
//!
//! Parses `bitshield <command> [OPTIONS]` into a [`Config`]. Every option is
//! `--name value` except the boolean flags `--verbose` and `--print-config`.

use bitshield_core::Scheme;
use std::fmt;
use std::path::PathBuf;

/// On-disk representation of a bit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Raw bytes, 8 bits per byte
    Text,
    /// Space-separated `0`/`1` tokens (with a leading N for repetition input)
    Legacy,
}

impl Format {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "text" => Ok(Format::Text),
            "legacy" => Ok(Format::Legacy),
            other => Err(format!("unknown format: {other} (expected text or legacy)")),
        }
    }

    /// Hamming streams are rarely a whole number of bytes, so they default to
    /// the bit-per-token format.
    fn default_for(scheme: &Scheme) -> Self {
        match scheme {
            Scheme::Hamming74 => Format::Legacy,
            Scheme::Repetition { .. } => Format::Text,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Text => write!(f, "text"),
            Format::Legacy => write!(f, "legacy"),
        }
    }
}

/// Where encode reads its message from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Text(String),
    File(PathBuf),
}

/// A fully resolved subcommand.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Encode {
        scheme: Scheme,
        source: Source,
        /// Input file format (only used with `Source::File`)
        input_format: Format,
        output: Option<PathBuf>,
        output_format: Format,
    },
    Decode {
        scheme: Scheme,
        input: PathBuf,
        format: Format,
        output: Option<PathBuf>,
    },
    Simulate {
        scheme: Scheme,
        text: String,
        p: f64,
        trials: u32,
        seed: Option<u32>,
    },
    Benchmark {
        /// One entry per repetition factor, or a single Hamming entry
        schemes: Vec<Scheme>,
        size_bytes: usize,
        seed: u32,
    },
    Help,
}

/// Complete configuration for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub command: Command,

    /// Raise the log level to debug
    pub verbose: bool,

    /// Print the resolved configuration before running
    pub print_config: bool,
}

/// Raw `--flag value` pairs before validation.
#[derive(Debug, Default)]
struct RawArgs {
    codec: Option<String>,
    n: Option<String>,
    text: Option<String>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<String>,
    p: Option<String>,
    trials: Option<String>,
    seed: Option<String>,
    size: Option<String>,
    verbose: bool,
    print_config: bool,
    help: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (without the program
    /// name).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let Some(subcommand) = args.first() else {
            return Err("missing command".to_string());
        };

        if matches!(subcommand.as_str(), "--help" | "-h" | "help") {
            return Ok(Config {
                command: Command::Help,
                verbose: false,
                print_config: false,
            });
        }

        let raw = RawArgs::parse(&args[1..])?;
        if raw.help {
            return Ok(Config {
                command: Command::Help,
                verbose: raw.verbose,
                print_config: false,
            });
        }

        let (verbose, print_config) = (raw.verbose, raw.print_config);
        let command = match subcommand.as_str() {
            "encode" => raw.encode()?,
            "decode" => raw.decode()?,
            "simulate" => raw.simulate()?,
            "benchmark" => raw.benchmark()?,
            other => return Err(format!("unknown command: {other}")),
        };

        Ok(Config {
            command,
            verbose,
            print_config,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.command {
            Command::Encode {
                scheme,
                source,
                input_format,
                output,
                output_format,
            } => {
                println!("Command: encode");
                println!("Codec: {scheme}");
                match source {
                    Source::Text(text) => println!("Input: text ({} bytes)", text.len()),
                    Source::File(path) => {
                        println!("Input: {} ({input_format})", path.display())
                    }
                }
                println!("Output: {} ({output_format})", display_output(output));
            }
            Command::Decode {
                scheme,
                input,
                format,
                output,
            } => {
                println!("Command: decode");
                println!("Codec: {scheme}");
                println!("Input: {} ({format})", input.display());
                println!("Output: {}", display_output(output));
            }
            Command::Simulate {
                scheme,
                text,
                p,
                trials,
                seed,
            } => {
                println!("Command: simulate");
                println!("Codec: {scheme}");
                println!("Message: {} bytes", text.len());
                println!("Noise probability: {p}");
                println!("Trials: {trials}");
                match seed {
                    Some(seed) => println!("Seed: {seed}"),
                    None => println!("Seed: (entropy)"),
                }
            }
            Command::Benchmark {
                schemes,
                size_bytes,
                seed,
            } => {
                println!("Command: benchmark");
                let names: Vec<String> = schemes.iter().map(ToString::to_string).collect();
                println!("Codecs: {}", names.join(", "));
                println!("Size: {size_bytes} bytes");
                println!("Seed: {seed}");
            }
            Command::Help => println!("Command: help"),
        }
        println!();
    }
}

fn display_output(output: &Option<PathBuf>) -> String {
    output
        .as_ref()
        .map_or_else(|| "(stdout)".to_string(), |p| p.display().to_string())
}

impl RawArgs {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut raw = RawArgs::default();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let mut value = || -> Result<String, String> {
                i += 1;
                args.get(i)
                    .cloned()
                    .ok_or_else(|| format!("{flag} requires a value"))
            };

            match flag {
                "--codec" => raw.codec = Some(value()?),
                "--n" => raw.n = Some(value()?),
                "--text" => raw.text = Some(value()?),
                "--input" => raw.input = Some(PathBuf::from(value()?)),
                "--output" => raw.output = Some(PathBuf::from(value()?)),
                "--format" => raw.format = Some(value()?),
                "--p" => raw.p = Some(value()?),
                "--trials" => raw.trials = Some(value()?),
                "--seed" => raw.seed = Some(value()?),
                "--size" => raw.size = Some(value()?),
                "--verbose" | "-v" => raw.verbose = true,
                "--print-config" => raw.print_config = true,
                "--help" | "-h" => raw.help = true,
                other => return Err(format!("unknown argument: {other}")),
            }
            i += 1;
        }

        Ok(raw)
    }

    /// The codec with a single repetition factor.
    fn scheme(&self, command: &str) -> Result<Scheme, String> {
        let codec = self
            .codec
            .as_deref()
            .ok_or_else(|| format!("--codec is required for {command} command"))?;

        let n = match (codec, &self.n) {
            ("repetition", None) => {
                return Err("--n is required for repetition codec".to_string());
            }
            (_, Some(n)) => Some(n.parse::<i64>().map_err(|_| format!("invalid n: {n}"))?),
            (_, None) => None,
        };

        Scheme::parse(codec, n).map_err(|e| e.to_string())
    }

    fn format(&self, scheme: &Scheme) -> Result<Format, String> {
        match &self.format {
            Some(value) => Format::parse(value),
            None => Ok(Format::default_for(scheme)),
        }
    }

    fn encode(self) -> Result<Command, String> {
        let scheme = self.scheme("encode")?;
        let source = match (&self.text, &self.input) {
            (Some(text), _) => Source::Text(text.clone()),
            (None, Some(path)) => Source::File(path.clone()),
            (None, None) => return Err("either --text or --input is required".to_string()),
        };
        // Input files are plain text unless --format says otherwise
        let input_format = match &self.format {
            Some(value) => Format::parse(value)?,
            None => Format::Text,
        };

        Ok(Command::Encode {
            output_format: self.format(&scheme)?,
            scheme,
            source,
            input_format,
            output: self.output,
        })
    }

    fn decode(self) -> Result<Command, String> {
        let scheme = self.scheme("decode")?;
        let input = self
            .input
            .clone()
            .ok_or_else(|| "--input is required for decode command".to_string())?;

        Ok(Command::Decode {
            format: self.format(&scheme)?,
            scheme,
            input,
            output: self.output,
        })
    }

    fn simulate(self) -> Result<Command, String> {
        let scheme = self.scheme("simulate")?;
        let text = self
            .text
            .clone()
            .ok_or_else(|| "--text is required for simulate command".to_string())?;
        let p = self
            .p
            .as_deref()
            .ok_or_else(|| "--p is required for simulate command".to_string())?
            .parse::<f64>()
            .map_err(|_| "invalid p".to_string())?;
        let trials = match &self.trials {
            Some(t) => t.parse::<u32>().map_err(|_| format!("invalid trials: {t}"))?,
            None => 1,
        };
        let seed = parse_seed(self.seed.as_deref())?;

        Ok(Command::Simulate {
            scheme,
            text,
            p,
            trials,
            seed,
        })
    }

    fn benchmark(self) -> Result<Command, String> {
        let codec = self
            .codec
            .as_deref()
            .ok_or_else(|| "--codec is required for benchmark command".to_string())?;

        let schemes = match codec {
            "repetition" => {
                let list = self
                    .n
                    .as_deref()
                    .ok_or_else(|| "--n is required for repetition codec".to_string())?;
                parse_factor_list(list)?
                    .into_iter()
                    .map(|n| Scheme::Repetition { n })
                    .collect()
            }
            other => vec![Scheme::parse(other, None).map_err(|e| e.to_string())?],
        };

        let size_bytes = match &self.size {
            Some(size) => parse_size(size)?,
            None => 1024 * 1024,
        };
        let seed = parse_seed(self.seed.as_deref())?.unwrap_or(0);

        Ok(Command::Benchmark {
            schemes,
            size_bytes,
            seed,
        })
    }
}

fn parse_seed(seed: Option<&str>) -> Result<Option<u32>, String> {
    seed.map(|s| s.parse::<u32>().map_err(|_| format!("invalid seed: {s}")))
        .transpose()
}

/// Parse comma-separated repetition factors, e.g. `3,5,7`.
fn parse_factor_list(list: &str) -> Result<Vec<i64>, String> {
    list.split(',')
        .map(|token| {
            let token = token.trim();
            let n = token
                .parse::<i64>()
                .map_err(|_| format!("invalid n: {token}"))?;
            if n <= 0 {
                return Err(format!("repetition factor n must be > 0, got {n}"));
            }
            Ok(n)
        })
        .collect()
}

/// Parse a size such as `1MB`, `64KB` or a plain byte count.
fn parse_size(size: &str) -> Result<usize, String> {
    let size = size.trim();
    let (digits, multiplier) = if let Some(mb) = size.strip_suffix("MB") {
        (mb, 1024 * 1024)
    } else if let Some(kb) = size.strip_suffix("KB") {
        (kb, 1024)
    } else {
        (size, 1)
    };

    digits
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid size: {size}"))?
        .checked_mul(multiplier)
        .ok_or_else(|| format!("size too large: {size}"))
}

pub fn print_help() {
    println!("BitShield - Error correction lab");
    println!();
    println!("USAGE:");
    println!("    bitshield <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    encode      Encode bits using a codec");
    println!("    decode      Decode bits using a codec");
    println!("    simulate    Simulate noisy channel transmission");
    println!("    benchmark   Benchmark codec performance");
    println!();
    println!("OPTIONS:");
    println!("    --codec <NAME>          repetition | hamming");
    println!("    --n <N>                 Repetition factor (benchmark: comma list, e.g. 3,5,7)");
    println!("    --text <TEXT>           Message text");
    println!("    --input <PATH>          Input file");
    println!("    --output <PATH>         Output file (default: stdout)");
    println!("    --format <FMT>          text | legacy (default: legacy for hamming, text otherwise)");
    println!("    --p <P>                 Bit-flip probability 0.0-1.0");
    println!("    --trials <N>            Simulation trials (default: 1)");
    println!("    --seed <N>              Random seed for determinism");
    println!("    --size <SIZE>           Benchmark data size, e.g. 1MB, 64KB (default: 1MB)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --verbose, -v           Debug logging (or set RUST_LOG)");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    bitshield encode --codec repetition --n 5 --text \"hello\" --output encoded.txt");
    println!("    bitshield decode --codec repetition --n 5 --input encoded.txt --output out.txt");
    println!("    bitshield decode --codec hamming --input encoded.txt --output out.txt");
    println!("    bitshield simulate --codec repetition --n 5 --text \"hello\" --p 0.02 --trials 1000 --seed 42");
    println!("    bitshield benchmark --codec repetition --n 3,5,7 --size 1MB --seed 42");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_encode_text() {
        let config = Config::from_args(&args("encode --codec repetition --n 5 --text hello")).unwrap();
        assert_eq!(
            config.command,
            Command::Encode {
                scheme: Scheme::Repetition { n: 5 },
                source: Source::Text("hello".to_string()),
                input_format: Format::Text,
                output: None,
                output_format: Format::Text,
            }
        );
        assert!(!config.verbose);
    }

    #[test]
    fn test_hamming_defaults_to_legacy() {
        let config =
            Config::from_args(&args("decode --codec hamming --input enc.txt --output out.txt"))
                .unwrap();
        assert_eq!(
            config.command,
            Command::Decode {
                scheme: Scheme::Hamming74,
                input: PathBuf::from("enc.txt"),
                format: Format::Legacy,
                output: Some(PathBuf::from("out.txt")),
            }
        );
    }

    #[test]
    fn test_simulate() {
        let config = Config::from_args(&args(
            "simulate --codec repetition --n 3 --text hi --p 0.02 --trials 1000 --seed 42 --verbose",
        ))
        .unwrap();
        assert_eq!(
            config.command,
            Command::Simulate {
                scheme: Scheme::Repetition { n: 3 },
                text: "hi".to_string(),
                p: 0.02,
                trials: 1000,
                seed: Some(42),
            }
        );
        assert!(config.verbose);
    }

    #[test]
    fn test_benchmark_factor_list() {
        let config =
            Config::from_args(&args("benchmark --codec repetition --n 3,5,7 --size 2KB")).unwrap();
        assert_eq!(
            config.command,
            Command::Benchmark {
                schemes: vec![
                    Scheme::Repetition { n: 3 },
                    Scheme::Repetition { n: 5 },
                    Scheme::Repetition { n: 7 },
                ],
                size_bytes: 2048,
                seed: 0,
            }
        );
    }

    #[test]
    fn test_missing_requirements() {
        assert!(Config::from_args(&[]).is_err());
        assert!(Config::from_args(&args("encode --text hi")).is_err());
        assert!(Config::from_args(&args("encode --codec repetition --text hi")).is_err());
        assert!(Config::from_args(&args("encode --codec hamming")).is_err());
        assert!(Config::from_args(&args("decode --codec hamming")).is_err());
        assert!(Config::from_args(&args("simulate --codec hamming --text hi")).is_err());
        assert!(Config::from_args(&args("encode --codec golay --text hi")).is_err());
        assert!(Config::from_args(&args("launch")).is_err());
        assert!(Config::from_args(&args("encode --codec hamming --text")).is_err());
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_args(&args("encode --codec repetition --n 0 --text hi")).is_err());
        assert!(Config::from_args(&args("encode --codec repetition --n x --text hi")).is_err());
        assert!(Config::from_args(&args("benchmark --codec repetition --n 3,-1")).is_err());
        assert!(Config::from_args(&args("simulate --codec hamming --text hi --p abc")).is_err());
        assert!(Config::from_args(&args("encode --codec hamming --text hi --format csv")).is_err());
    }

    #[test]
    fn test_help() {
        assert_eq!(Config::from_args(&args("--help")).unwrap().command, Command::Help);
        assert_eq!(
            Config::from_args(&args("encode -h")).unwrap().command,
            Command::Help
        );
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1MB").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("64KB").unwrap(), 64 * 1024);
        assert_eq!(parse_size("100").unwrap(), 100);
        assert!(parse_size("lots").is_err());
    }
}

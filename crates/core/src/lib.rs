//! bitshield-core: error-correction experimentation toolkit
//!
//! This library provides the pieces needed to study forward error correction
//! over a noisy binary channel:
//! - Encodes bit sequences with a repetition code or Hamming(7,4)
//! - Flips bits independently with probability `p` (seedable)
//! - Measures bit error rate and message success rate
//!
//! # Architecture
//!
//! - `bitio`: bit sequences to and from bytes and text
//! - `codec`: repetition and Hamming(7,4) codecs, plus the `Scheme` selector
//! - `channel`: noisy binary channel with seeded randomness
//! - `metrics`: BER, success rate and a stopwatch
//! - `simulation`: multi-trial encode, noise, decode runs
//!
//! # Design Principles
//!
//! - **No panics**: every precondition failure is returned as an `Error`
//! - **Pure**: no shared state; each call owns its RNG and timer
//! - **Deterministic**: seeded randomness makes runs reproducible
//!
//! # Example
//! ```
//! use bitshield_core::{bitio, channel, codec::hamming74, metrics};
//!
//! let original = bitio::text_to_bits("hi");
//! let encoded = hamming74::encode_bits(&original);
//! let noisy = channel::apply_noise(&encoded, 0.0, Some(42)).unwrap();
//! let decoded = hamming74::decode_bits(&noisy).unwrap();
//!
//! assert_eq!(metrics::calculate_ber(&original, &decoded).unwrap(), 0.0);
//! ```

pub mod bitio;
pub mod channel;
pub mod codec;
pub mod error;
pub mod metrics;
pub mod simulation;

// Re-export commonly used types
pub use bitio::Bit;
pub use codec::Scheme;
pub use error::{Error, FormatError, InvalidParameter, Result};

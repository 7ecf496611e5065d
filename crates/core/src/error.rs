//! Error types for the bitshield toolkit.
//!
//! Every failure is a contract violation detected synchronously at the point
//! where a precondition breaks. Nothing is retried and nothing is logged here;
//! callers decide how to present the error.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a failure domain:
/// - Invalid parameter: a codec, channel, metric or simulation precondition
/// - Format: a bit file that does not follow the expected token layout
/// - I/O: file system operations performed by the I/O layer
#[derive(Debug, Error)]
pub enum Error {
    /// A precondition of a core operation was violated
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] InvalidParameter),

    /// A bit file could not be parsed
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Precondition violations raised by codecs, the channel, metrics and the
/// trial simulator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidParameter {
    /// Repetition factor must be strictly positive
    #[error("repetition factor n must be > 0, got {n}")]
    RepetitionFactor { n: i64 },

    /// The repetition codec was selected without a factor
    #[error("repetition codec requires a repetition factor n")]
    MissingRepetitionFactor,

    /// Codec name is neither `repetition` nor `hamming`
    #[error("unknown codec: {name}")]
    UnknownCodec { name: String },

    /// A single Hamming block had the wrong number of bits
    #[error("hamming(7,4) block requires exactly {expected} bits, got {actual}")]
    BlockLength { expected: usize, actual: usize },

    /// A Hamming codeword stream is not a whole number of codewords
    #[error("hamming(7,4) stream length {len} is not a multiple of 7")]
    CodewordStream { len: usize },

    /// Flip probability outside [0.0, 1.0] (NaN included)
    #[error("noise probability p must be between 0.0 and 1.0, got {p}")]
    Probability { p: f64 },

    /// Metrics compare sequences position by position
    #[error("bit sequences differ in length: original {original}, received {received}")]
    LengthMismatch { original: usize, received: usize },

    /// A simulation needs at least one trial
    #[error("trial count must be > 0, got {trials}")]
    TrialCount { trials: u64 },
}

/// Bit file parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Legacy files start with the repetition factor
    #[error("legacy format: cannot read repetition factor N")]
    MissingRepetitionFactor,

    /// Bit tokens must be `0` or `1`
    #[error("token {position} is {token:?}, bits must be 0 or 1")]
    InvalidToken { position: usize, token: String },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

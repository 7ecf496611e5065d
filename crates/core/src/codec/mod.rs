//! Forward error correction codecs.
//!
//! Two block codes are provided:
//! - [`repetition`]: each bit sent `n` times, majority-vote decode
//! - [`hamming74`]: 4 data bits in a 7-bit codeword, single-error correction
//!
//! [`Scheme`] picks one of them at runtime so callers can drive either code
//! through the same encode/decode calls.

pub mod hamming74;
pub mod repetition;

use crate::bitio::Bit;
use crate::error::{InvalidParameter, Result};
use std::fmt;

/// A codec together with its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Repetition code with factor `n`
    Repetition { n: i64 },
    /// Hamming(7,4)
    Hamming74,
}

impl Scheme {
    /// Build a scheme from a codec name (`repetition` or `hamming`).
    ///
    /// The repetition factor is validated here so that a bad `n` surfaces
    /// before any data is processed. Hamming ignores `n`.
    ///
    /// # Errors
    /// - `InvalidParameter::UnknownCodec` for any other name
    /// - `InvalidParameter::MissingRepetitionFactor` for repetition without `n`
    /// - `InvalidParameter::RepetitionFactor` for `n <= 0`
    pub fn parse(codec: &str, n: Option<i64>) -> Result<Self> {
        match (codec, n) {
            ("repetition", Some(n)) if n > 0 => Ok(Scheme::Repetition { n }),
            ("repetition", Some(n)) => Err(InvalidParameter::RepetitionFactor { n }.into()),
            ("repetition", None) => Err(InvalidParameter::MissingRepetitionFactor.into()),
            ("hamming" | "hamming74", _) => Ok(Scheme::Hamming74),
            (name, _) => Err(InvalidParameter::UnknownCodec {
                name: name.to_string(),
            }
            .into()),
        }
    }

    /// Encode a bit sequence.
    pub fn encode(&self, bits: &[Bit]) -> Result<Vec<Bit>> {
        match *self {
            Scheme::Repetition { n } => repetition::encode(bits, n),
            Scheme::Hamming74 => Ok(hamming74::encode_bits(bits)),
        }
    }

    /// Decode a bit sequence produced by [`Scheme::encode`].
    ///
    /// Hamming padding is not stripped.
    pub fn decode(&self, encoded: &[Bit]) -> Result<Vec<Bit>> {
        match *self {
            Scheme::Repetition { n } => repetition::decode(encoded, n),
            Scheme::Hamming74 => hamming74::decode_bits(encoded),
        }
    }

    /// Code rate: data bits per transmitted bit.
    pub fn rate(&self) -> f64 {
        match *self {
            Scheme::Repetition { n } => 1.0 / n as f64,
            Scheme::Hamming74 => hamming74::DATA_BITS as f64 / hamming74::CODEWORD_BITS as f64,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Repetition { n } => write!(f, "Repetition(n={n})"),
            Scheme::Hamming74 => write!(f, "Hamming(7,4)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse() {
        assert_eq!(
            Scheme::parse("repetition", Some(3)).unwrap(),
            Scheme::Repetition { n: 3 }
        );
        assert_eq!(Scheme::parse("hamming", None).unwrap(), Scheme::Hamming74);
        assert_eq!(Scheme::parse("hamming74", Some(5)).unwrap(), Scheme::Hamming74);
    }

    #[test]
    fn test_parse_unknown_codec() {
        let err = Scheme::parse("golay", None).unwrap_err();
        assert!(matches!(
            &err,
            Error::InvalidParameter(InvalidParameter::UnknownCodec { name }) if name == "golay"
        ));
        assert_eq!(err.to_string(), "invalid parameter: unknown codec: golay");
    }

    #[test]
    fn test_parse_rejects_bad_factor() {
        assert!(matches!(
            Scheme::parse("repetition", Some(0)),
            Err(Error::InvalidParameter(InvalidParameter::RepetitionFactor { n: 0 }))
        ));
    }

    #[test]
    fn test_parse_missing_factor_is_distinct() {
        let err = Scheme::parse("repetition", None).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter(InvalidParameter::MissingRepetitionFactor)
        ));
        assert_eq!(
            err.to_string(),
            "invalid parameter: repetition codec requires a repetition factor n"
        );
        assert!(!err.to_string().contains("got 0"));
    }

    #[test]
    fn test_dispatch() {
        let bits = [1, 0, 1, 1, 0];

        let rep = Scheme::Repetition { n: 3 };
        assert_eq!(rep.encode(&bits).unwrap().len(), 15);
        assert_eq!(rep.decode(&rep.encode(&bits).unwrap()).unwrap(), bits);

        let ham = Scheme::Hamming74;
        let encoded = ham.encode(&bits).unwrap();
        assert_eq!(encoded.len(), 14);
        assert_eq!(ham.decode(&encoded).unwrap(), vec![1, 0, 1, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_rate_and_display() {
        assert_eq!(Scheme::Repetition { n: 4 }.rate(), 0.25);
        assert_eq!(Scheme::Hamming74.rate(), 4.0 / 7.0);
        assert_eq!(Scheme::Repetition { n: 5 }.to_string(), "Repetition(n=5)");
        assert_eq!(Scheme::Hamming74.to_string(), "Hamming(7,4)");
    }
}

//! Repetition code: every bit is sent `n` times and recovered by majority
//! vote.
//!
//! Majority vote over `n` copies corrects up to `(n - 1) / 2` flipped copies
//! per group. Even `n` breaks ties toward 0.

use crate::bitio::Bit;
use crate::error::{InvalidParameter, Result};

/// Validate a repetition factor and convert it to a group size.
fn group_size(n: i64) -> Result<usize> {
    if n <= 0 {
        return Err(InvalidParameter::RepetitionFactor { n }.into());
    }
    usize::try_from(n).map_err(|_| InvalidParameter::RepetitionFactor { n }.into())
}

/// Replicate each bit `n` consecutive times.
///
/// # Errors
/// `InvalidParameter::RepetitionFactor` when `n <= 0`.
pub fn encode(bits: &[Bit], n: i64) -> Result<Vec<Bit>> {
    let n = group_size(n)?;

    let mut encoded = Vec::with_capacity(bits.len().saturating_mul(n));
    for &bit in bits {
        encoded.extend(std::iter::repeat(bit).take(n));
    }
    Ok(encoded)
}

/// Decode groups of `n` bits by majority vote.
///
/// A trailing group shorter than `n` is decoded on its own, without error.
/// A group decodes to 1 only when its 1s strictly outnumber its 0s; any
/// nonzero value counts as a 1.
///
/// # Errors
/// `InvalidParameter::RepetitionFactor` when `n <= 0`.
pub fn decode(encoded: &[Bit], n: i64) -> Result<Vec<Bit>> {
    let n = group_size(n)?;

    let decoded: Vec<Bit> = encoded.chunks(n).map(majority).collect();
    tracing::trace!(groups = decoded.len(), n, "repetition decode");
    Ok(decoded)
}

/// Majority value of a group, ties toward 0.
fn majority(group: &[Bit]) -> Bit {
    let ones = group.iter().filter(|&&bit| bit != 0).count();
    let zeros = group.len() - ones;
    Bit::from(ones > zeros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_encode_replicates_in_order() {
        assert_eq!(
            encode(&[1, 0], 5).unwrap(),
            vec![1, 1, 1, 1, 1, 0, 0, 0, 0, 0]
        );
        assert_eq!(encode(&[1, 0, 1], 1).unwrap(), vec![1, 0, 1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(encode(&[], 3).unwrap().is_empty());
        assert!(decode(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn test_corrects_single_flip() {
        let mut encoded = encode(&[1, 0], 5).unwrap();
        encoded[0] ^= 1;
        assert_eq!(decode(&encoded, 5).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_corrects_up_to_half_minus_one() {
        // n = 7 tolerates 3 flips per group
        let mut encoded = encode(&[0, 1], 7).unwrap();
        for i in [0, 2, 4, 7, 9, 13] {
            encoded[i] ^= 1;
        }
        assert_eq!(decode(&encoded, 7).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_short_final_group() {
        // [1,1,1] -> 1, [0,0] -> 0
        assert_eq!(decode(&[1, 1, 1, 0, 0], 3).unwrap(), vec![1, 0]);
        // [1,1,0] -> 1, [1] -> 1
        assert_eq!(decode(&[1, 1, 0, 1], 3).unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_tie_breaks_toward_zero() {
        assert_eq!(decode(&[1, 0, 0, 1], 4).unwrap(), vec![0]);
        assert_eq!(decode(&[1, 1, 1, 0], 4).unwrap(), vec![1]);
        assert_eq!(decode(&[1, 1, 1, 1, 0], 4).unwrap(), vec![1, 0]);
        assert_eq!(decode(&[1, 1, 1, 1, 0], 2).unwrap(), vec![1, 1, 0]);
        assert_eq!(decode(&[1, 0], 2).unwrap(), vec![0]);
    }

    #[test]
    fn test_nonzero_counts_as_one() {
        assert_eq!(decode(&[2, 5, 0], 3).unwrap(), vec![1]);
    }

    #[test]
    fn test_invalid_factor() {
        for n in [0, -1, -100] {
            assert!(matches!(
                encode(&[1], n),
                Err(Error::InvalidParameter(InvalidParameter::RepetitionFactor { .. }))
            ));
            assert!(matches!(
                decode(&[1], n),
                Err(Error::InvalidParameter(InvalidParameter::RepetitionFactor { .. }))
            ));
        }
    }
}

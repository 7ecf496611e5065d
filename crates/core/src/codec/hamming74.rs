//! Hamming(7,4) single-error-correcting code.
//!
//! Codeword layout (0-indexed): `[p1, p2, d1, p3, d2, d3, d4]`.
//!
//! Parity bits sit at the power-of-two positions (1, 2, 4 when 1-indexed), so
//! the syndrome of a codeword with one flipped bit is the 1-based position of
//! that bit. Two or more flips in one codeword are miscorrected silently; the
//! code has distance 3 and cannot do better.

use crate::bitio::Bit;
use crate::error::{InvalidParameter, Result};

/// Data bits per block.
pub const DATA_BITS: usize = 4;

/// Bits per codeword.
pub const CODEWORD_BITS: usize = 7;

/// Codeword positions holding d1..d4.
const DATA_POSITIONS: [usize; DATA_BITS] = [2, 4, 5, 6];

/// Compute the 7-bit codeword for one 4-bit block.
///
/// Any nonzero input value is treated as 1.
pub fn encode_block(data: [Bit; DATA_BITS]) -> [Bit; CODEWORD_BITS] {
    let [d1, d2, d3, d4] = data.map(|bit| Bit::from(bit != 0));

    let p1 = d1 ^ d2 ^ d4;
    let p2 = d1 ^ d3 ^ d4;
    let p3 = d2 ^ d3 ^ d4;

    [p1, p2, d1, p3, d2, d3, d4]
}

/// Syndrome of a codeword: 0 when all parity checks pass, otherwise the
/// 1-based position of the bit a single error would have flipped.
pub fn syndrome(codeword: &[Bit; CODEWORD_BITS]) -> u8 {
    let [p1, p2, d1, p3, d2, d3, d4] = codeword.map(|bit| Bit::from(bit != 0));

    let s1 = p1 ^ d1 ^ d2 ^ d4;
    let s2 = p2 ^ d1 ^ d3 ^ d4;
    let s3 = p3 ^ d2 ^ d3 ^ d4;

    (s3 << 2) | (s2 << 1) | s1
}

/// Correct at most one flipped bit and extract the data bits.
///
/// Returns the data block together with the syndrome that drove the
/// correction.
pub fn decode_block(codeword: [Bit; CODEWORD_BITS]) -> ([Bit; DATA_BITS], u8) {
    let mut corrected = codeword.map(|bit| Bit::from(bit != 0));

    let syndrome = syndrome(&corrected);
    if syndrome != 0 {
        corrected[usize::from(syndrome) - 1] ^= 1;
    }

    (DATA_POSITIONS.map(|pos| corrected[pos]), syndrome)
}

/// Encode exactly 4 data bits into a 7-bit codeword.
///
/// # Errors
/// `InvalidParameter::BlockLength` unless `data.len() == 4`.
pub fn encode(data: &[Bit]) -> Result<Vec<Bit>> {
    let block: [Bit; DATA_BITS] = data.try_into().map_err(|_| InvalidParameter::BlockLength {
        expected: DATA_BITS,
        actual: data.len(),
    })?;
    Ok(encode_block(block).to_vec())
}

/// Decode exactly 7 codeword bits into 4 data bits, correcting one error.
///
/// # Errors
/// `InvalidParameter::BlockLength` unless `codeword.len() == 7`.
pub fn decode(codeword: &[Bit]) -> Result<Vec<Bit>> {
    let block: [Bit; CODEWORD_BITS] =
        codeword.try_into().map_err(|_| InvalidParameter::BlockLength {
            expected: CODEWORD_BITS,
            actual: codeword.len(),
        })?;
    let (data, _) = decode_block(block);
    Ok(data.to_vec())
}

/// Encode an arbitrary-length bit sequence.
///
/// The input is split into 4-bit blocks; a short final block is padded with
/// zeros. Output length is `ceil(len / 4) * 7`.
pub fn encode_bits(bits: &[Bit]) -> Vec<Bit> {
    let mut encoded = Vec::with_capacity(bits.len().div_ceil(DATA_BITS) * CODEWORD_BITS);

    for chunk in bits.chunks(DATA_BITS) {
        let mut block = [0; DATA_BITS];
        block[..chunk.len()].copy_from_slice(chunk);
        encoded.extend_from_slice(&encode_block(block));
    }

    encoded
}

/// Decode a stream of 7-bit codewords.
///
/// Padding added by [`encode_bits`] surfaces as trailing zeros; stripping it
/// is up to the caller.
///
/// # Errors
/// `InvalidParameter::CodewordStream` when the length is not a multiple of 7.
pub fn decode_bits(encoded: &[Bit]) -> Result<Vec<Bit>> {
    if encoded.len() % CODEWORD_BITS != 0 {
        return Err(InvalidParameter::CodewordStream { len: encoded.len() }.into());
    }

    let mut decoded = Vec::with_capacity(encoded.len() / CODEWORD_BITS * DATA_BITS);
    let mut corrected = 0usize;

    for chunk in encoded.chunks_exact(CODEWORD_BITS) {
        let mut block = [0; CODEWORD_BITS];
        block.copy_from_slice(chunk);

        let (data, syndrome) = decode_block(block);
        if syndrome != 0 {
            corrected += 1;
        }
        decoded.extend_from_slice(&data);
    }

    tracing::trace!(
        codewords = encoded.len() / CODEWORD_BITS,
        corrected,
        "hamming(7,4) decode"
    );
    Ok(decoded)
}

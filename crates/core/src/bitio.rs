//! Conversion between byte buffers and bit sequences.
//!
//! All conversions are MSB-first: the most significant bit of each byte comes
//! first in the bit sequence.
//!
//! # Padding Rules
//! - `bits_to_bytes`: pads an incomplete trailing byte with zeros
//! - `bits_to_text`: drops an incomplete trailing byte entirely
//!
//! The text pair drops rather than pads so that a lossy decode never emits a
//! garbage trailing character. Use the byte pair when the bit count matters.
//!
//! # Example
//! ```
//! use bitshield_core::bitio::{bits_to_bytes, bytes_to_bits, text_to_bits};
//!
//! let bits = text_to_bits("A"); // 0x41
//! assert_eq!(bits, vec![0, 1, 0, 0, 0, 0, 0, 1]);
//!
//! // Three bits pad out to a whole byte
//! assert_eq!(bits_to_bytes(&[1, 0, 1]), vec![0b1010_0000]);
//! assert_eq!(bytes_to_bits(&[0b1010_0000])[..3], [1, 0, 1]);
//! ```

/// A single bit, 0 or 1.
///
/// Any nonzero value is read as 1 when packed into bytes.
pub type Bit = u8;

/// Packs bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a BitWriter sized for `bits` input bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Append one bit.
    pub fn write_bit(&mut self, bit: Bit) {
        if bit != 0 {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Append every bit of `bits` in order.
    pub fn write_bits(&mut self, bits: &[Bit]) {
        for &bit in bits {
            self.write_bit(bit);
        }
    }

    /// Finish writing, padding a partial final byte with trailing zeros.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }

    /// Finish writing, discarding a partial final byte.
    pub fn finish_truncated(self) -> Vec<u8> {
        self.bytes
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// Yields every bit of every byte; there is no notion of padding.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new BitReader for the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read a single bit, or `None` at the end of the buffer.
    pub fn read_bit(&mut self) -> Option<Bit> {
        let byte = *self.data.get(self.bit_position / 8)?;
        let shift = 7 - (self.bit_position % 8);
        self.bit_position += 1;
        Some((byte >> shift) & 1)
    }

    /// Return the number of bits remaining in the buffer.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_position
    }

    /// Check if we're at the end of the buffer.
    pub fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }
}

impl Iterator for BitReader<'_> {
    type Item = Bit;

    fn next(&mut self) -> Option<Bit> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits_remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

/// Expand a byte buffer to bits, MSB first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<Bit> {
    BitReader::new(bytes).collect()
}

/// Pack bits into bytes, MSB first, zero-padding an incomplete final byte.
pub fn bits_to_bytes(bits: &[Bit]) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(bits.len());
    writer.write_bits(bits);
    writer.finish()
}

/// Expand the bytes of `text` to bits, MSB first, in character order.
pub fn text_to_bits(text: &str) -> Vec<Bit> {
    bytes_to_bits(text.as_bytes())
}

/// Pack bits into raw text bytes, dropping trailing bits that do not
/// complete a byte.
pub fn bits_to_text_bytes(bits: &[Bit]) -> Vec<u8> {
    let whole = bits.len() - bits.len() % 8;
    let mut writer = BitWriter::with_capacity(whole);
    writer.write_bits(&bits[..whole]);
    writer.finish_truncated()
}

/// Pack bits into text, dropping trailing bits that do not complete a byte.
///
/// Bytes that are not valid UTF-8 (common after a lossy decode) are replaced
/// with U+FFFD. Use [`bits_to_text_bytes`] to keep the raw bytes.
pub fn bits_to_text(bits: &[Bit]) -> String {
    String::from_utf8_lossy(&bits_to_text_bytes(bits)).into_owned()
}

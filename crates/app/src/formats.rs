//! Bit file readers and writers.
//!
//! Three layouts are supported:
//! - Legacy: repetition factor N, then whitespace-separated `0`/`1` tokens
//! - Bit: whitespace-separated `0`/`1` tokens, written space-separated
//! - Text: raw bytes, expanded MSB-first to bits
//!
//! Readers reject any bit token other than `0` or `1`, so sequences handed to
//! the codecs from files are always strict bits.

use bitshield_core::bitio::{bits_to_text_bytes, bytes_to_bits};
use bitshield_core::{Bit, FormatError, Result};
use std::fs;
use std::path::Path;

/// Parse whitespace-separated bit tokens. `offset` shifts reported token
/// positions.
fn parse_bit_tokens<'a>(tokens: impl Iterator<Item = &'a str>, offset: usize) -> Result<Vec<Bit>> {
    tokens
        .enumerate()
        .map(|(i, token)| match token {
            "0" => Ok(0),
            "1" => Ok(1),
            other => Err(FormatError::InvalidToken {
                position: i + offset,
                token: other.to_string(),
            }
            .into()),
        })
        .collect()
}

/// Parse legacy content: the repetition factor followed by bits.
pub fn parse_legacy(content: &str) -> Result<(i64, Vec<Bit>)> {
    let mut tokens = content.split_whitespace();
    let n = tokens
        .next()
        .and_then(|token| token.parse::<i64>().ok())
        .ok_or(FormatError::MissingRepetitionFactor)?;

    Ok((n, parse_bit_tokens(tokens, 1)?))
}

/// Parse bit-per-token content.
pub fn parse_bits(content: &str) -> Result<Vec<Bit>> {
    parse_bit_tokens(content.split_whitespace(), 0)
}

/// Render bits as space-separated tokens.
pub fn render_bits(bits: &[Bit]) -> String {
    bits.iter()
        .map(|bit| bit.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read a legacy file: returns the stored repetition factor and the bits.
pub fn read_legacy(path: &Path) -> Result<(i64, Vec<Bit>)> {
    parse_legacy(&fs::read_to_string(path)?)
}

/// Read a bit-per-token file.
pub fn read_bits(path: &Path) -> Result<Vec<Bit>> {
    parse_bits(&fs::read_to_string(path)?)
}

/// Read a file's raw bytes as bits.
pub fn read_text(path: &Path) -> Result<Vec<Bit>> {
    Ok(bytes_to_bits(&fs::read(path)?))
}

/// Write bits as space-separated tokens.
pub fn write_bits(path: &Path, bits: &[Bit]) -> Result<()> {
    fs::write(path, render_bits(bits))?;
    Ok(())
}

/// Write a legacy repetition file: the factor `n` followed by the bit tokens.
pub fn write_legacy(path: &Path, n: i64, bits: &[Bit]) -> Result<()> {
    fs::write(path, format!("{n} {}", render_bits(bits)))?;
    Ok(())
}

/// Write bits as raw bytes, dropping an incomplete trailing byte.
pub fn write_text(path: &Path, bits: &[Bit]) -> Result<()> {
    fs::write(path, bits_to_text_bytes(bits))?;
    Ok(())
}

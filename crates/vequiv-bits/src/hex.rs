//! Fixed-width hex rendering and parsing.

use num_bigint::{BigInt, BigUint};

use crate::{CodecError, Result, to_twos_complement, word_count};

/// Render `value` as a `0x`-prefixed hex string of its `bit_count`-wide
/// two's-complement pattern, zero padded to `ceil(bit_count / 4)` digits.
///
/// # Errors
///
/// Returns [`CodecError::ValueOutOfRange`] if `value` does not fit.
pub fn to_hex_string(value: &BigInt, bit_count: usize) -> Result<String> {
    let pattern = to_twos_complement(value, bit_count)?;
    let digits = pattern.to_str_radix(16);
    let width = bit_count.div_ceil(4).max(1);
    let padding = "0".repeat(width.saturating_sub(digits.len()));
    Ok(format!("0x{padding}{digits}"))
}

/// Parse an unsigned hex literal into `ceil(bit_count / 64)` little-endian
/// words. The `0x` prefix and `_` separators are optional.
///
/// # Errors
///
/// Returns [`CodecError::InvalidHex`] for malformed input and
/// [`CodecError::HexTooWide`] when the literal needs more than `bit_count` bits.
pub fn parse_hex_words(hex: &str, bit_count: usize) -> Result<Vec<u64>> {
    let body = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    let digits: String = body.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        return Err(CodecError::InvalidHex(hex.to_string()));
    }
    let value = BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| CodecError::InvalidHex(hex.to_string()))?;
    if value.bits() > bit_count as u64 {
        return Err(CodecError::HexTooWide { bit_count });
    }

    let mut words = value.to_u64_digits();
    words.resize(word_count(bit_count), 0);
    Ok(words)
}

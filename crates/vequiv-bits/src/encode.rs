//! Integer -> word encoders.
//!
//! Two wide-value paths exist and must agree: [`int_to_words`] emits words
//! directly from the two's-complement pattern, [`int_to_words_via_hex`] goes
//! through the canonical fixed-width hex string.

use num_bigint::BigInt;

use crate::{
    CodecError, Result, WORD_SIZE, high_word_mask, parse_hex_words, to_hex_string,
    to_twos_complement, word_count,
};

fn check_single_word(bit_count: usize) -> Result<()> {
    if bit_count > WORD_SIZE {
        return Err(CodecError::WidthExceedsWord(bit_count));
    }
    Ok(())
}

/// Encode a non-negative integer into a single word of width `bit_count`.
///
/// # Errors
///
/// Fails if `bit_count > 64` or `value` needs more than `bit_count` bits.
pub fn encode_u64(value: u64, bit_count: usize) -> Result<u64> {
    check_single_word(bit_count)?;
    if bit_count < WORD_SIZE && value >> bit_count != 0 {
        return Err(CodecError::ValueOutOfRange {
            value: value.to_string(),
            bit_count,
        });
    }
    Ok(value)
}

/// Encode a signed integer as a `bit_count`-wide two's-complement word.
///
/// The result has every bit above `bit_count` cleared.
///
/// # Errors
///
/// Fails if `bit_count > 64` or `value` is outside `[-2^(w-1), 2^(w-1))`.
pub fn encode_i64(value: i64, bit_count: usize) -> Result<u64> {
    check_single_word(bit_count)?;
    let in_range = match bit_count {
        0 => value == 0,
        WORD_SIZE => true,
        _ => {
            let half = 1i64 << (bit_count - 1);
            (-half..half).contains(&value)
        }
    };
    if !in_range {
        return Err(CodecError::ValueOutOfRange {
            value: value.to_string(),
            bit_count,
        });
    }
    if bit_count == 0 {
        return Ok(0);
    }
    Ok(u64::from_ne_bytes(value.to_ne_bytes()) & high_word_mask(bit_count))
}

/// Encode `value` as `ceil(bit_count / 64)` little-endian words of its
/// two's-complement pattern.
///
/// # Errors
///
/// Returns [`CodecError::ValueOutOfRange`] if `value` does not fit.
pub fn int_to_words(value: &BigInt, bit_count: usize) -> Result<Vec<u64>> {
    let pattern = to_twos_complement(value, bit_count)?;
    let mut words = pattern.to_u64_digits();
    words.resize(word_count(bit_count), 0);
    Ok(words)
}

/// Encode `value` by rendering its fixed-width hex string and parsing it back.
///
/// # Errors
///
/// Returns [`CodecError::ValueOutOfRange`] if `value` does not fit.
pub fn int_to_words_via_hex(value: &BigInt, bit_count: usize) -> Result<Vec<u64>> {
    let hex = to_hex_string(value, bit_count)?;
    parse_hex_words(&hex, bit_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_u64() {
        assert_eq!(encode_u64(255, 8), Ok(255));
        assert_eq!(encode_u64(u64::MAX, 64), Ok(u64::MAX));
        assert_eq!(encode_u64(0, 0), Ok(0));
        assert!(encode_u64(256, 8).is_err());
        assert!(encode_u64(1, 0).is_err());
        assert_eq!(encode_u64(1, 65), Err(CodecError::WidthExceedsWord(65)));
    }

    #[test]
    fn test_encode_i64() {
        assert_eq!(encode_i64(-1, 8), Ok(0xff));
        assert_eq!(encode_i64(-128, 8), Ok(0x80));
        assert_eq!(encode_i64(127, 8), Ok(0x7f));
        assert_eq!(encode_i64(-1, 1), Ok(1));
        assert_eq!(encode_i64(i64::MIN, 64), Ok(1u64 << 63));
        assert!(encode_i64(128, 8).is_err());
        assert!(encode_i64(-129, 8).is_err());
        assert!(encode_i64(-1, 0).is_err());
    }

    #[test]
    fn test_int_to_words_negative_wide() {
        let words = int_to_words(&BigInt::from(-1), 65).unwrap();
        assert_eq!(words, vec![u64::MAX, 1]);
        let words = int_to_words(&BigInt::from(-2), 128).unwrap();
        assert_eq!(words, vec![u64::MAX - 1, u64::MAX]);
    }

    #[test]
    fn test_int_to_words_zero_pads() {
        assert_eq!(int_to_words(&BigInt::from(0), 256).unwrap(), vec![0; 4]);
        assert_eq!(int_to_words(&BigInt::from(3), 130).unwrap(), vec![3, 0, 0]);
    }

    #[test]
    fn test_hex_path_matches_direct_path() {
        for (value, bits) in [(-1i64, 65usize), (-12345, 128), (987_654_321, 200), (0, 66)] {
            let value = BigInt::from(value);
            assert_eq!(
                int_to_words(&value, bits),
                int_to_words_via_hex(&value, bits),
                "value {value} at {bits} bits"
            );
        }
    }
}

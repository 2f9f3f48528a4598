//! Native executor value model.

use num_bigint::BigInt;
use vequiv_bits::{
    encode_i64, encode_u64, high_bits_clear, int_to_words, int_to_words_via_hex,
    parse_hex_words, word_count, words_to_int,
};

use crate::{Result, ValueError, ValueKind};

/// A `bit_count`-wide scalar stored as little-endian 64-bit words.
///
/// Always holds exactly `ceil(bit_count / 64)` words. Bits above `bit_count`
/// in the top word are kept as handed over by the producer; use
/// [`NativeBits::is_canonical`] to check them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NativeBits {
    words: Vec<u64>,
    bit_count: usize,
}

impl NativeBits {
    /// Wrap raw words.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::WordCount`] unless `words.len() == ceil(bit_count / 64)`.
    pub fn from_words(words: Vec<u64>, bit_count: usize) -> Result<Self> {
        let expected = word_count(bit_count);
        if words.len() != expected {
            return Err(ValueError::WordCount {
                bit_count,
                expected,
                actual: words.len(),
            });
        }
        Ok(Self { words, bit_count })
    }

    /// Unsigned value that fits in one word.
    ///
    /// # Errors
    ///
    /// Fails if `bit_count > 64` or `value` does not fit.
    pub fn from_u64(value: u64, bit_count: usize) -> Result<Self> {
        let word = encode_u64(value, bit_count)?;
        Ok(Self::single(word, bit_count))
    }

    /// Signed value that fits in one word, stored as two's complement.
    ///
    /// # Errors
    ///
    /// Fails if `bit_count > 64` or `value` does not fit.
    pub fn from_i64(value: i64, bit_count: usize) -> Result<Self> {
        let word = encode_i64(value, bit_count)?;
        Ok(Self::single(word, bit_count))
    }

    /// Parse an unsigned hex literal of at most `bit_count` bits.
    ///
    /// # Errors
    ///
    /// Fails on malformed or over-wide literals.
    pub fn from_hex(hex: &str, bit_count: usize) -> Result<Self> {
        Ok(Self {
            words: parse_hex_words(hex, bit_count)?,
            bit_count,
        })
    }

    /// Encode an arbitrary-precision integer (negative means two's complement).
    ///
    /// # Errors
    ///
    /// Fails if `value` does not fit in `bit_count` bits.
    pub fn from_int(value: &BigInt, bit_count: usize) -> Result<Self> {
        Ok(Self {
            words: int_to_words(value, bit_count)?,
            bit_count,
        })
    }

    /// Same as [`NativeBits::from_int`] but through the fixed-width hex string.
    ///
    /// # Errors
    ///
    /// Fails if `value` does not fit in `bit_count` bits.
    pub fn from_int_via_hex(value: &BigInt, bit_count: usize) -> Result<Self> {
        Ok(Self {
            words: int_to_words_via_hex(value, bit_count)?,
            bit_count,
        })
    }

    #[must_use]
    pub fn zero(bit_count: usize) -> Self {
        Self {
            words: vec![0; word_count(bit_count)],
            bit_count,
        }
    }

    fn single(word: u64, bit_count: usize) -> Self {
        if bit_count == 0 {
            Self::zero(0)
        } else {
            Self {
                words: vec![word],
                bit_count,
            }
        }
    }

    #[must_use]
    pub const fn bit_count(&self) -> usize {
        self.bit_count
    }

    #[must_use]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Word `index` (least significant first).
    #[must_use]
    pub fn word(&self, index: usize) -> Option<u64> {
        self.words.get(index).copied()
    }

    /// True if no bit above `bit_count` is set.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        high_bits_clear(&self.words, self.bit_count)
    }

    /// Decode the words as an integer; see [`words_to_int`].
    #[must_use]
    pub fn to_int(&self, signed: bool) -> BigInt {
        words_to_int(&self.words, self.bit_count, signed)
    }
}

/// A value produced or consumed by the native executor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeValue {
    Bits(NativeBits),
    Array(Vec<NativeValue>),
    Tuple(Vec<NativeValue>),
}

impl NativeValue {
    /// # Errors
    ///
    /// See [`NativeBits::from_u64`].
    pub fn ubits(value: u64, bit_count: usize) -> Result<Self> {
        NativeBits::from_u64(value, bit_count).map(Self::Bits)
    }

    /// # Errors
    ///
    /// See [`NativeBits::from_i64`].
    pub fn sbits(value: i64, bit_count: usize) -> Result<Self> {
        NativeBits::from_i64(value, bit_count).map(Self::Bits)
    }

    #[must_use]
    pub const fn array(elements: Vec<Self>) -> Self {
        Self::Array(elements)
    }

    #[must_use]
    pub const fn tuple(members: Vec<Self>) -> Self {
        Self::Tuple(members)
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Bits(_) => ValueKind::Bits,
            Self::Array(_) => ValueKind::Array,
            Self::Tuple(_) => ValueKind::Tuple,
        }
    }

    #[must_use]
    pub const fn is_bits(&self) -> bool {
        matches!(self, Self::Bits(_))
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    #[must_use]
    pub const fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple(_))
    }

    #[must_use]
    pub const fn as_bits(&self) -> Option<&NativeBits> {
        match self {
            Self::Bits(bits) => Some(bits),
            _ => None,
        }
    }

    /// Array elements or tuple members.
    #[must_use]
    pub fn elements(&self) -> Option<&[Self]> {
        match self {
            Self::Array(elements) | Self::Tuple(elements) => Some(elements),
            Self::Bits(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_words_checks_length() {
        assert!(NativeBits::from_words(vec![1, 2], 128).is_ok());
        assert_eq!(
            NativeBits::from_words(vec![1], 128),
            Err(ValueError::WordCount {
                bit_count: 128,
                expected: 2,
                actual: 1
            })
        );
        assert!(NativeBits::from_words(vec![], 0).is_ok());
    }

    #[test]
    fn test_small_constructors() {
        let bits = NativeBits::from_i64(-1, 8).unwrap();
        assert_eq!(bits.words(), &[0xff]);
        assert_eq!(bits.to_int(true), BigInt::from(-1));
        assert_eq!(bits.to_int(false), BigInt::from(255));

        let bits = NativeBits::from_u64(5, 3).unwrap();
        assert_eq!(bits.word(0), Some(5));
        assert_eq!(bits.word(1), None);

        assert_eq!(NativeBits::from_u64(0, 0).unwrap().word_count(), 0);
    }

    #[test]
    fn test_from_hex_wide() {
        let bits = NativeBits::from_hex("0x1_0000_0000_0000_0002", 65).unwrap();
        assert_eq!(bits.words(), &[2, 1]);
        assert!(bits.is_canonical());
    }

    #[test]
    fn test_non_canonical_words() {
        let bits = NativeBits::from_words(vec![0x1ff], 8).unwrap();
        assert!(!bits.is_canonical());
    }

    #[test]
    fn test_from_int_paths_agree() {
        let value = BigInt::from(-42);
        assert_eq!(
            NativeBits::from_int(&value, 100),
            NativeBits::from_int_via_hex(&value, 100)
        );
    }

    #[test]
    fn test_kind() {
        let value = NativeValue::array(vec![NativeValue::ubits(1, 1).unwrap()]);
        assert_eq!(value.kind(), ValueKind::Array);
        assert_eq!(value.elements().map(<[NativeValue]>::len), Some(1));
        assert!(NativeValue::tuple(vec![]).is_tuple());
    }
}

//! Little-endian word array <-> integer.

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::{WORD_SIZE, from_twos_complement};

/// Number of 64-bit words needed to hold `bit_count` bits.
#[must_use]
pub const fn word_count(bit_count: usize) -> usize {
    bit_count.div_ceil(WORD_SIZE)
}

/// Mask covering the used bits of the most significant word.
///
/// Returns `u64::MAX` when `bit_count` is a multiple of the word size.
#[must_use]
pub const fn high_word_mask(bit_count: usize) -> u64 {
    match bit_count % WORD_SIZE {
        0 => u64::MAX,
        rem => (1u64 << rem) - 1,
    }
}

/// Reassemble an integer from little-endian 64-bit words.
///
/// Only the first `ceil(bit_count / 64)` words are read; missing words read as
/// zero. Bits of the top word above `bit_count` are NOT masked: producers must
/// hand over canonical words, or callers must run [`mask_to_width`] first.
///
/// With `signed` set the `bit_count`-wide pattern is decoded as two's
/// complement.
#[must_use]
pub fn words_to_int(words: &[u64], bit_count: usize, signed: bool) -> BigInt {
    let mut value = BigUint::zero();
    for (index, &word) in words.iter().enumerate().take(word_count(bit_count)) {
        value |= BigUint::from(word) << (index * WORD_SIZE);
    }

    if signed {
        from_twos_complement(&value, bit_count)
    } else {
        BigInt::from(value)
    }
}

/// Canonicalize words to exactly `ceil(bit_count / 64)` entries with every bit
/// above `bit_count` cleared.
#[must_use]
pub fn mask_to_width(words: &[u64], bit_count: usize) -> Vec<u64> {
    let count = word_count(bit_count);
    let mut masked: Vec<u64> = words.iter().copied().take(count).collect();
    masked.resize(count, 0);
    if let Some(top) = masked.last_mut() {
        *top &= high_word_mask(bit_count);
    }
    masked
}

/// Check that no bit above `bit_count` is set, including in surplus words.
#[must_use]
pub fn high_bits_clear(words: &[u64], bit_count: usize) -> bool {
    let count = word_count(bit_count);
    let surplus_clear = words.iter().skip(count).all(|&w| w == 0);
    let top_clear = match count.checked_sub(1).and_then(|i| words.get(i)) {
        Some(&top) => top & !high_word_mask(bit_count) == 0,
        None => true,
    };
    surplus_clear && top_clear
}

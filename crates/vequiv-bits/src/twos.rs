//! Two's-complement conversions at arbitrary widths.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Signed, Zero};

use crate::{CodecError, Result};

/// Decode a `bit_count`-wide pattern as a two's-complement integer.
///
/// If bit `bit_count - 1` is set, `2^bit_count` is subtracted. A zero-width
/// pattern decodes to zero.
#[must_use]
pub fn from_twos_complement(pattern: &BigUint, bit_count: usize) -> BigInt {
    let Some(msb) = bit_count.checked_sub(1) else {
        return BigInt::zero();
    };
    let value = BigInt::from(pattern.clone());
    if pattern.bit(msb as u64) {
        value - (BigInt::one() << bit_count)
    } else {
        value
    }
}

/// Check that `value` is representable in `bit_count` bits.
///
/// Non-negative values use the unsigned range `[0, 2^w)`; negative values use
/// the signed range `[-2^(w-1), 0)`.
#[must_use]
pub fn fits_in_width(value: &BigInt, bit_count: usize) -> bool {
    if value.is_negative() {
        // -2^(w-1) <= value  <=>  |value| - 1 < 2^(w-1)
        let Some(magnitude_bits) = bit_count.checked_sub(1) else {
            return false;
        };
        (value.magnitude().clone() - 1u32).bits() <= magnitude_bits as u64
    } else {
        value.magnitude().bits() <= bit_count as u64
    }
}

/// Encode `value` as its `bit_count`-wide two's-complement bit pattern.
///
/// # Errors
///
/// Returns [`CodecError::ValueOutOfRange`] if `value` does not fit.
pub fn to_twos_complement(value: &BigInt, bit_count: usize) -> Result<BigUint> {
    if !fits_in_width(value, bit_count) {
        return Err(CodecError::ValueOutOfRange {
            value: value.to_string(),
            bit_count,
        });
    }
    match value.sign() {
        Sign::Minus => {
            let wrapped = (BigInt::one() << bit_count) + value;
            Ok(wrapped.magnitude().clone())
        }
        Sign::NoSign | Sign::Plus => Ok(value.magnitude().clone()),
    }
}

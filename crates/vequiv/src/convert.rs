//! Interpreter value -> native value conversion.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use tracing::debug;
use vequiv_bits::{CodecError, WORD_SIZE};
use vequiv_value::{InterpValue, NativeBits, NativeValue, ValueError};

use crate::{ConvertError, UnsupportedConversion};

/// Encode an integer as native bits of exactly `bit_count` bits.
///
/// Widths up to one word go through the single-word constructors (unsigned
/// for non-negative values, signed otherwise). Wider values are rendered as a
/// fixed-width two's-complement hex string and parsed back.
///
/// # Errors
///
/// Fails if `value` does not fit in `bit_count` bits.
pub fn int_to_bits(value: &BigInt, bit_count: usize) -> Result<NativeBits, ValueError> {
    let out_of_range = || -> ValueError {
        CodecError::ValueOutOfRange {
            value: value.to_string(),
            bit_count,
        }
        .into()
    };

    if bit_count > WORD_SIZE {
        return NativeBits::from_int_via_hex(value, bit_count);
    }
    if value.is_negative() {
        let small = value.to_i64().ok_or_else(out_of_range)?;
        NativeBits::from_i64(small, bit_count)
    } else {
        let small = value.to_u64().ok_or_else(out_of_range)?;
        NativeBits::from_u64(small, bit_count)
    }
}

/// Convert an interpreter value into the equivalent native value.
///
/// Bits and enums keep their width; arrays and tuples are converted element
/// by element, in order.
///
/// # Errors
///
/// [`ConvertError::Unsupported`] for functions and tokens (anywhere in the
/// value), [`ConvertError::Value`] if a bits payload cannot be encoded.
pub fn convert(value: &InterpValue) -> Result<NativeValue, ConvertError> {
    match value {
        InterpValue::Bits(bits) | InterpValue::Enum(bits) => {
            let native = int_to_bits(&bits.value_check_sign(), bits.bit_count())?;
            Ok(NativeValue::Bits(native))
        }
        InterpValue::Array(elements) => convert_all(elements).map(NativeValue::Array),
        InterpValue::Tuple(members) => convert_all(members).map(NativeValue::Tuple),
        InterpValue::Function(_) | InterpValue::Token => {
            debug!(value = %value, "can't convert to native value");
            Err(UnsupportedConversion::new(value).into())
        }
    }
}

/// Convert a sequence of arguments, preserving order and arity.
///
/// # Errors
///
/// Stops at the first argument [`convert`] rejects.
pub fn convert_all(values: &[InterpValue]) -> Result<Vec<NativeValue>, ConvertError> {
    values.iter().map(convert).collect()
}

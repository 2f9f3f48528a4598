//! Recursive interpreter-vs-native value comparison.
//!
//! Comparison is driven by the interpreter value's variant; the native value
//! must have the matching variant. The first difference aborts the walk and
//! is reported with the path of the offending sub-value.

use num_bigint::BigInt;
use tracing::{debug, trace, warn};
use vequiv_bits::{mask_to_width, words_to_int};
use vequiv_value::{InterpBits, InterpValue, NativeBits, NativeValue, ValueKind};

use crate::{
    CompareConfig, CompareError, EquivalenceMismatch, HighBitPolicy, MismatchKind, PathSegment,
    Result, UnsupportedConversion, ValuePath,
};

/// Compare with the default [`CompareConfig`].
///
/// # Errors
///
/// [`CompareError::Unsupported`] if the interpreter value holds a function or
/// token; [`CompareError::Mismatch`] on the first difference.
pub fn compare_values(interp: &InterpValue, native: &NativeValue) -> Result<()> {
    compare_values_with(interp, native, &CompareConfig::default())
}

/// Compare an interpreter value against a native value.
///
/// # Errors
///
/// See [`compare_values`].
pub fn compare_values_with(
    interp: &InterpValue,
    native: &NativeValue,
    config: &CompareConfig,
) -> Result<()> {
    let mut path = ValuePath::root();
    compare_at(interp, native, config, &mut path)
}

/// Boolean form of [`compare_values`]; mismatches become `false`.
///
/// # Errors
///
/// Only [`UnsupportedConversion`] is returned as an error.
pub fn equivalent(
    interp: &InterpValue,
    native: &NativeValue,
) -> std::result::Result<bool, UnsupportedConversion> {
    match compare_values(interp, native) {
        Ok(()) => Ok(true),
        Err(CompareError::Mismatch(_)) => Ok(false),
        Err(CompareError::Unsupported(e)) => Err(e),
    }
}

fn mismatch(path: &ValuePath, kind: MismatchKind) -> CompareError {
    EquivalenceMismatch {
        path: path.clone(),
        kind,
    }
    .into()
}

fn compare_at(
    interp: &InterpValue,
    native: &NativeValue,
    config: &CompareConfig,
    path: &mut ValuePath,
) -> Result<()> {
    match interp {
        InterpValue::Bits(bits) | InterpValue::Enum(bits) => {
            let NativeValue::Bits(native_bits) = native else {
                return Err(variant_mismatch(interp, native, path));
            };
            // Only unsigned bits are read unsigned; enums always compare signed.
            let signed = interp.is_enum() || bits.is_signed();
            compare_bits(bits, native_bits, signed, config, path)
        }
        InterpValue::Array(elements) => {
            let NativeValue::Array(native_elements) = native else {
                return Err(variant_mismatch(interp, native, path));
            };
            compare_sequence(
                ValueKind::Array,
                elements,
                native_elements,
                config,
                path,
                PathSegment::Index,
            )
        }
        InterpValue::Tuple(members) => {
            let NativeValue::Tuple(native_members) = native else {
                return Err(variant_mismatch(interp, native, path));
            };
            compare_sequence(
                ValueKind::Tuple,
                members,
                native_members,
                config,
                path,
                PathSegment::Member,
            )
        }
        InterpValue::Function(_) | InterpValue::Token => {
            debug!(path = %path, value = %interp, "no native equivalent");
            Err(UnsupportedConversion::new(interp).into())
        }
    }
}

fn variant_mismatch(interp: &InterpValue, native: &NativeValue, path: &ValuePath) -> CompareError {
    mismatch(
        path,
        MismatchKind::Variant {
            expected: interp.kind(),
            actual: native.kind(),
        },
    )
}

fn compare_sequence(
    kind: ValueKind,
    expected: &[InterpValue],
    actual: &[NativeValue],
    config: &CompareConfig,
    path: &mut ValuePath,
    segment: fn(usize) -> PathSegment,
) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(mismatch(
            path,
            MismatchKind::Arity {
                kind,
                expected: expected.len(),
                actual: actual.len(),
            },
        ));
    }

    for (index, (e, a)) in expected.iter().zip(actual).enumerate() {
        path.push(segment(index));
        compare_at(e, a, config, path)?;
        path.pop();
    }
    Ok(())
}

fn compare_bits(
    expected: &InterpBits,
    actual: &NativeBits,
    signed: bool,
    config: &CompareConfig,
    path: &ValuePath,
) -> Result<()> {
    let bit_count = expected.bit_count();
    if bit_count != actual.bit_count() {
        return Err(mismatch(
            path,
            MismatchKind::BitCount {
                expected: bit_count,
                actual: actual.bit_count(),
            },
        ));
    }

    let actual_value = decode_native(actual, signed, config.high_bits, path)?;
    let expected_value = if signed {
        expected.signed_value()
    } else {
        expected.unsigned_value()
    };
    if expected_value != actual_value {
        return Err(mismatch(
            path,
            MismatchKind::Value {
                expected: expected_value,
                actual: actual_value,
                signed,
            },
        ));
    }

    trace!(path = %path, bit_count, "bits match");
    Ok(())
}

fn decode_native(
    bits: &NativeBits,
    signed: bool,
    policy: HighBitPolicy,
    path: &ValuePath,
) -> Result<BigInt> {
    let bit_count = bits.bit_count();
    match policy {
        HighBitPolicy::Trust => Ok(bits.to_int(signed)),
        HighBitPolicy::Mask => {
            if bits.is_canonical() {
                return Ok(bits.to_int(signed));
            }
            warn!(path = %path, bit_count, "discarding nonzero native bits above width");
            Ok(words_to_int(&mask_to_width(bits.words(), bit_count), bit_count, signed))
        }
        HighBitPolicy::Reject => {
            if bits.is_canonical() {
                Ok(bits.to_int(signed))
            } else {
                Err(mismatch(path, MismatchKind::HighBits { bit_count }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vequiv_value::{parse_interp, parse_native};

    fn check(interp: &str, native: &str) -> Result<()> {
        compare_values(&parse_interp(interp).unwrap(), &parse_native(native).unwrap())
    }

    fn mismatch_of(interp: &str, native: &str) -> EquivalenceMismatch {
        match check(interp, native) {
            Err(CompareError::Mismatch(m)) => m,
            other => panic!("expected mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_signed_bits_compare_as_integers() {
        assert!(check("s8:-1", "bits[8]:0xff").is_ok());
        assert!(check("s8:-128", "bits[8]:0x80").is_ok());
        assert!(check("s8:127", "bits[8]:0x7f").is_ok());
        assert!(check("u8:255", "bits[8]:0xff").is_ok());
    }

    #[test]
    fn test_enum_compares_signed() {
        assert!(check("enum s2:-1", "bits[2]:0b11").is_ok());
        assert!(check("enum u2:3", "bits[2]:0b11").is_ok());
        assert_eq!(
            mismatch_of("enum u2:1", "bits[2]:2").kind,
            MismatchKind::Value {
                expected: BigInt::from(1),
                actual: BigInt::from(-2),
                signed: true
            }
        );
        assert_eq!(
            mismatch_of("enum u2:2", "bits[2]:1").to_string(),
            "signed value mismatch: expected -2, got 1 at $"
        );
    }

    #[test]
    fn test_bit_count_mismatch() {
        let m = mismatch_of("u8:1", "bits[9]:1");
        assert_eq!(
            m.kind,
            MismatchKind::BitCount {
                expected: 8,
                actual: 9
            }
        );
        assert!(m.path.is_root());
    }

    #[test]
    fn test_wide_value_mismatch() {
        let m = mismatch_of("sN[128]:-1", "bits[128]{0xffffffffffffffff, 0x7fffffffffffffff}");
        assert_eq!(
            m.kind,
            MismatchKind::Value {
                expected: BigInt::from(-1),
                actual: (BigInt::from(1) << 127) - 1,
                signed: true
            }
        );
    }

    #[test]
    fn test_variant_mismatch() {
        let m = mismatch_of("[u1:1]", "(bits[1]:1,)");
        assert_eq!(
            m.kind,
            MismatchKind::Variant {
                expected: ValueKind::Array,
                actual: ValueKind::Tuple
            }
        );
        let m = mismatch_of("u1:1", "[bits[1]:1]");
        assert_eq!(
            m.kind,
            MismatchKind::Variant {
                expected: ValueKind::Bits,
                actual: ValueKind::Array
            }
        );
    }

    #[test]
    fn test_arity_mismatch_is_not_truncated() {
        let m = mismatch_of("[u2:1, u2:2, u2:3]", "[bits[2]:1, bits[2]:2]");
        assert_eq!(
            m.kind,
            MismatchKind::Arity {
                kind: ValueKind::Array,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_mismatch_path_is_localized() {
        let m = mismatch_of(
            "(u4:3, [u1:1, u1:0])",
            "(bits[4]:3, [bits[1]:1, bits[1]:1])",
        );
        assert_eq!(m.path.to_string(), "$.1[1]");
        assert_eq!(
            m.to_string(),
            "unsigned value mismatch: expected 0, got 1 at $.1[1]"
        );
    }

    #[test]
    fn test_unsupported_variants() {
        let err = check("fn f", "bits[1]:0").unwrap_err();
        assert!(err.is_unsupported());
        let err = check("(u1:0, token)", "(bits[1]:0, bits[1]:0)").unwrap_err();
        assert!(err.is_unsupported());
        assert!(err.mismatch().is_none());
    }

    #[test]
    fn test_equivalent() {
        let interp = parse_interp("[u3:5]").unwrap();
        assert_eq!(equivalent(&interp, &parse_native("[bits[3]:5]").unwrap()), Ok(true));
        assert_eq!(equivalent(&interp, &parse_native("[bits[3]:4]").unwrap()), Ok(false));
        assert!(equivalent(&InterpValue::Token, &parse_native("()").unwrap()).is_err());
    }

    #[test]
    fn test_high_bit_policies() {
        let interp = parse_interp("u8:255").unwrap();
        let dirty = parse_native("bits[8]{0x1ff}").unwrap();

        let mask = CompareConfig::with_high_bits(HighBitPolicy::Mask);
        assert!(compare_values_with(&interp, &dirty, &mask).is_ok());

        let trust = CompareConfig::with_high_bits(HighBitPolicy::Trust);
        let err = compare_values_with(&interp, &dirty, &trust).unwrap_err();
        assert!(matches!(
            err.mismatch().map(|m| &m.kind),
            Some(MismatchKind::Value { .. })
        ));

        let reject = CompareConfig::with_high_bits(HighBitPolicy::Reject);
        let err = compare_values_with(&interp, &dirty, &reject).unwrap_err();
        assert_eq!(
            err.mismatch().map(|m| &m.kind),
            Some(&MismatchKind::HighBits { bit_count: 8 })
        );
    }

    #[test]
    fn test_zero_width_bits() {
        assert!(check("u0:0", "bits[0]:0").is_ok());
        assert!(check("s0:0", "bits[0]{}").is_ok());
    }
}

//! Interpreter value model.

use num_bigint::{BigInt, BigUint};
use num_traits::Signed;
use vequiv_bits::{from_twos_complement, to_twos_complement};

use crate::{Result, ValueError, ValueKind};

/// How a bits payload is read as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signedness {
    #[default]
    Unsigned,
    Signed,
}

impl Signedness {
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Signed)
    }

    /// Type prefix used by the textual syntax (`u` / `s`).
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            Self::Unsigned => 'u',
            Self::Signed => 's',
        }
    }
}

/// A fixed-width bit pattern with a signedness.
///
/// The pattern is always stored unsigned and fits in `bit_count` bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterpBits {
    pattern: BigUint,
    bit_count: usize,
    signedness: Signedness,
}

impl InterpBits {
    /// Build from an integer.
    ///
    /// Negative values are stored as their two's-complement pattern and are
    /// only accepted for signed payloads. Non-negative values are taken as a
    /// raw pattern, so `s8` built from `255` reads back as `-1`.
    ///
    /// # Errors
    ///
    /// Fails if the value does not fit in `bit_count` bits, or is negative
    /// for an unsigned payload.
    pub fn from_int(value: &BigInt, bit_count: usize, signedness: Signedness) -> Result<Self> {
        if value.is_negative() && !signedness.is_signed() {
            return Err(ValueError::NegativeUnsigned(value.to_string()));
        }
        Ok(Self {
            pattern: to_twos_complement(value, bit_count)?,
            bit_count,
            signedness,
        })
    }

    /// Unsigned payload from a small integer.
    ///
    /// # Errors
    ///
    /// Fails if `value` needs more than `bit_count` bits.
    pub fn ubits(value: u64, bit_count: usize) -> Result<Self> {
        Self::from_int(&BigInt::from(value), bit_count, Signedness::Unsigned)
    }

    /// Signed payload from a small integer.
    ///
    /// # Errors
    ///
    /// Fails if `value` is outside the signed range of `bit_count` bits.
    pub fn sbits(value: i64, bit_count: usize) -> Result<Self> {
        let value = BigInt::from(value);
        if !value.is_negative() && bit_count > 0 && value.bits() >= bit_count as u64 {
            return Err(vequiv_bits::CodecError::ValueOutOfRange {
                value: value.to_string(),
                bit_count,
            }
            .into());
        }
        Self::from_int(&value, bit_count, Signedness::Signed)
    }

    #[must_use]
    pub const fn bit_count(&self) -> usize {
        self.bit_count
    }

    #[must_use]
    pub const fn signedness(&self) -> Signedness {
        self.signedness
    }

    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.signedness.is_signed()
    }

    /// Raw bit pattern.
    #[must_use]
    pub const fn pattern(&self) -> &BigUint {
        &self.pattern
    }

    /// Pattern read as an unsigned integer.
    #[must_use]
    pub fn unsigned_value(&self) -> BigInt {
        BigInt::from(self.pattern.clone())
    }

    /// Pattern read as a two's-complement integer.
    #[must_use]
    pub fn signed_value(&self) -> BigInt {
        from_twos_complement(&self.pattern, self.bit_count)
    }

    /// Pattern read according to the payload's own signedness.
    #[must_use]
    pub fn value_check_sign(&self) -> BigInt {
        match self.signedness {
            Signedness::Unsigned => self.unsigned_value(),
            Signedness::Signed => self.signed_value(),
        }
    }
}

/// A value computed by the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InterpValue {
    Bits(InterpBits),
    /// Enum member; behaves exactly like its underlying bits.
    Enum(InterpBits),
    Array(Vec<InterpValue>),
    Tuple(Vec<InterpValue>),
    /// Function reference, by name.
    Function(String),
    Token,
}

impl InterpValue {
    /// # Errors
    ///
    /// See [`InterpBits::ubits`].
    pub fn ubits(value: u64, bit_count: usize) -> Result<Self> {
        InterpBits::ubits(value, bit_count).map(Self::Bits)
    }

    /// # Errors
    ///
    /// See [`InterpBits::sbits`].
    pub fn sbits(value: i64, bit_count: usize) -> Result<Self> {
        InterpBits::sbits(value, bit_count).map(Self::Bits)
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
            Self::Enum(_) => ValueKind::Enum,
            Self::Array(_) => ValueKind::Array,
            Self::Tuple(_) => ValueKind::Tuple,
            Self::Function(_) => ValueKind::Function,
            Self::Token => ValueKind::Token,
        }
    }

    #[must_use]
    pub const fn is_bits(&self) -> bool {
        matches!(self, Self::Bits(_))
    }

    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    #[must_use]
    pub const fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple(_))
    }

    /// Bits payload of a bits or enum value.
    #[must_use]
    pub const fn as_bits(&self) -> Option<&InterpBits> {
        match self {
            Self::Bits(bits) | Self::Enum(bits) => Some(bits),
            _ => None,
        }
    }

    #[must_use]
    pub fn bit_count(&self) -> Option<usize> {
        self.as_bits().map(InterpBits::bit_count)
    }

    /// Array elements or tuple members.
    #[must_use]
    pub fn elements(&self) -> Option<&[Self]> {
        match self {
            Self::Array(elements) | Self::Tuple(elements) => Some(elements),
            _ => None,
        }
    }
}

use num_bigint::BigInt;
use thiserror::Error;
use vequiv_value::{InterpValue, ValueError, ValueKind};

use crate::ValuePath;

/// The interpreter value has no native counterpart (functions, tokens).
///
/// Expected and recoverable: the case is not native-comparable and should be
/// evaluated by the interpreter alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no native equivalent for {kind} value {value}")]
pub struct UnsupportedConversion {
    pub kind: ValueKind,
    /// Rendering of the offending value.
    pub value: String,
}

impl UnsupportedConversion {
    #[must_use]
    pub fn new(value: &InterpValue) -> Self {
        Self {
            kind: value.kind(),
            value: value.to_string(),
        }
    }
}

/// What differed between the interpreter and native values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
    /// Different variants (e.g. bits vs array).
    Variant { expected: ValueKind, actual: ValueKind },
    /// Same variant, different bit widths.
    BitCount { expected: usize, actual: usize },
    /// Same width, different numeric values.
    Value {
        expected: BigInt,
        actual: BigInt,
        signed: bool,
    },
    /// Arrays or tuples with different lengths.
    Arity {
        kind: ValueKind,
        expected: usize,
        actual: usize,
    },
    /// Native bits have nonzero bits above their width.
    HighBits { bit_count: usize },
}

impl std::fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variant { expected, actual } => {
                write!(f, "variant mismatch: expected {expected}, got {actual}")
            }
            Self::BitCount { expected, actual } => {
                write!(f, "bit count mismatch: expected {expected}, got {actual}")
            }
            Self::Value {
                expected,
                actual,
                signed,
            } => {
                let sign = if *signed { "signed" } else { "unsigned" };
                write!(f, "{sign} value mismatch: expected {expected}, got {actual}")
            }
            Self::Arity {
                kind,
                expected,
                actual,
            } => write!(f, "{kind} length mismatch: expected {expected}, got {actual}"),
            Self::HighBits { bit_count } => {
                write!(f, "nonzero bits above bit {bit_count}")
            }
        }
    }
}

/// The two evaluators disagree. Always a defect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {path}")]
pub struct EquivalenceMismatch {
    pub path: ValuePath,
    pub kind: MismatchKind,
}

/// Conversion errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedConversion),
    #[error("cannot encode native bits: {0}")]
    Value(#[from] ValueError),
}

impl ConvertError {
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

/// Comparison errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedConversion),
    #[error(transparent)]
    Mismatch(#[from] EquivalenceMismatch),
}

impl CompareError {
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    #[must_use]
    pub const fn mismatch(&self) -> Option<&EquivalenceMismatch> {
        match self {
            Self::Mismatch(m) => Some(m),
            Self::Unsupported(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompareError>;

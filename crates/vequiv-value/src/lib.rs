//! Value models on both sides of an interpreter / native-executor comparison.
//!
//! - [`InterpValue`]: the interpreter's sign-aware, arbitrary-precision values.
//! - [`NativeValue`]: the native executor's values, with scalars stored as
//!   little-endian 64-bit words.
//!
//! Both models are immutable snapshots and carry a textual syntax (see
//! [`parse_interp`] and [`parse_native`]) that their `Display` impls print.

mod interp;
mod native;
mod text;

pub use interp::*;
pub use native::*;
pub use text::*;

use thiserror::Error;
use vequiv_bits::CodecError;

/// Value construction errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("bits[{bit_count}] needs {expected} words, got {actual}")]
    WordCount {
        bit_count: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unsigned value cannot be negative: {0}")]
    NegativeUnsigned(String),
}

pub type Result<T> = std::result::Result<T, ValueError>;

/// Variant tag shared by both value models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bits,
    Enum,
    Array,
    Tuple,
    Function,
    Token,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bits => write!(f, "bits"),
            Self::Enum => write!(f, "enum"),
            Self::Array => write!(f, "array"),
            Self::Tuple => write!(f, "tuple"),
            Self::Function => write!(f, "function"),
            Self::Token => write!(f, "token"),
        }
    }
}

//! Word packing for wide bit values.
//!
//! Native executors store a `bit_count`-wide value as `ceil(bit_count / 64)`
//! little-endian 64-bit words. This crate converts between that layout and
//! arbitrary-precision integers, with optional two's-complement decoding.
//!
//! This crate has no knowledge of value models; see `vequiv-value`.

mod encode;
mod hex;
mod pack;
mod twos;

pub use encode::*;
pub use hex::*;
pub use pack::*;
pub use twos::*;

use thiserror::Error;

/// Bits per native word.
pub const WORD_SIZE: usize = 64;

/// Codec errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("value {value} does not fit in {bit_count} bits")]
    ValueOutOfRange { value: String, bit_count: usize },
    #[error("bit count {0} does not fit in a single 64-bit word")]
    WidthExceedsWord(usize),
    #[error("invalid hex literal: {0:?}")]
    InvalidHex(String),
    #[error("hex literal is wider than {bit_count} bits")]
    HexTooWide { bit_count: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests;

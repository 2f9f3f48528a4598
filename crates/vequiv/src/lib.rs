//! Equivalence oracle between interpreter values and native executor values.
//!
//! Checks that a tree-walking interpreter and a compiled native executor agree
//! on the same program:
//!
//! 1. [`convert_all`] turns interpreter arguments into native arguments.
//! 2. Both evaluators run (external to this crate).
//! 3. [`compare_values`] checks the two results bit-exactly, reporting the
//!    path of the first differing sub-value.
//!
//! [`harness::run_case`] wires the three steps together.
//!
//! # Example
//!
//! ```ignore
//! use vequiv::{compare_values, convert};
//! use vequiv_value::parse_interp;
//!
//! let arg = parse_interp("(u4:3, [u1:1, u1:0])")?;
//! let native = convert(&arg)?;
//! compare_values(&arg, &native)?;
//! ```

mod compare;
mod config;
mod convert;
mod error;
pub mod harness;
mod path;

pub use compare::*;
pub use config::*;
pub use convert::*;
pub use error::*;
pub use path::*;

// Re-export the value models so callers need a single dependency.
pub use vequiv_bits::{WORD_SIZE, words_to_int};
pub use vequiv_value::{
    InterpBits, InterpValue, NativeBits, NativeValue, ParseError, Signedness, ValueError,
    ValueKind, parse_interp, parse_native,
};

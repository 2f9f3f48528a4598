//! `vequiv compare`.

use vequiv::{
    CompareConfig, CompareError, HighBitPolicy, compare_values_with, parse_interp, parse_native,
};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_UNSUPPORTED};
use crate::terminal;

pub fn cmd_compare(interp: &str, native: &str, high_bits: HighBitPolicy) -> i32 {
    let interp = match parse_interp(interp) {
        Ok(v) => v,
        Err(e) => {
            terminal::error(&format!("invalid interpreter value: {e}"));
            return EXIT_FAILURE;
        }
    };
    let native = match parse_native(native) {
        Ok(v) => v,
        Err(e) => {
            terminal::error(&format!("invalid native value: {e}"));
            return EXIT_FAILURE;
        }
    };

    let config = CompareConfig::with_high_bits(high_bits);
    match compare_values_with(&interp, &native, &config) {
        Ok(()) => {
            terminal::success("values match");
            EXIT_SUCCESS
        }
        Err(CompareError::Unsupported(e)) => {
            terminal::warning(&format!("not comparable: {e}"));
            EXIT_UNSUPPORTED
        }
        Err(CompareError::Mismatch(m)) => {
            terminal::error(&m.to_string());
            terminal::dim(&format!("interpreter: {interp}"));
            terminal::dim(&format!("native:      {native}"));
            EXIT_FAILURE
        }
    }
}

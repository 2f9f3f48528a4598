//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vequiv::HighBitPolicy;

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure (mismatch or error).
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when the value has no native equivalent.
pub const EXIT_UNSUPPORTED: i32 = 2;

#[derive(Parser)]
#[command(name = "vequiv")]
#[command(about = "Check interpreter values against native executor values")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare an interpreter value against a native value
    Compare {
        /// Interpreter value, e.g. "(u4:3, [u1:1, u1:0])"
        #[arg(value_name = "INTERP")]
        interp: String,

        /// Native value, e.g. "(bits[4]:3, [bits[1]:1, bits[1]:0])"
        #[arg(value_name = "NATIVE")]
        native: String,

        #[command(flatten)]
        high_bits: HighBitArgs,
    },
    /// Convert an interpreter value to its native form
    Convert {
        /// Interpreter value
        #[arg(value_name = "INTERP")]
        value: String,
    },
    /// Decode raw 64-bit words (least significant first) as an integer
    Decode {
        /// Declared bit count
        #[arg(short, long)]
        bits: usize,

        /// Decode as two's complement
        #[arg(long)]
        signed: bool,

        /// Words, decimal or 0x-prefixed hex
        #[arg(value_name = "WORD", required = true)]
        words: Vec<String>,
    },
    /// Compare every `INTERP => NATIVE` line of a file
    Batch {
        /// Case file ('#' starts a comment line)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of parallel jobs (0 = auto)
        #[arg(short = 'j', long, default_value = "0")]
        jobs: usize,

        #[command(flatten)]
        high_bits: HighBitArgs,
    },
}

#[derive(clap::Args, Clone, Copy)]
pub struct HighBitArgs {
    /// Treatment of native bits above the declared width
    #[arg(long = "high-bits", value_enum, default_value = "mask")]
    pub policy: HighBitArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum HighBitArg {
    /// Read native words as-is
    Trust,
    /// Clear bits above the width before decoding
    Mask,
    /// Report bits above the width as a mismatch
    Reject,
}

impl From<HighBitArg> for HighBitPolicy {
    fn from(arg: HighBitArg) -> Self {
        match arg {
            HighBitArg::Trust => Self::Trust,
            HighBitArg::Mask => Self::Mask,
            HighBitArg::Reject => Self::Reject,
        }
    }
}

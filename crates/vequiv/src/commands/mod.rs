//! Command implementations.
//!
//! Each submodule handles one CLI command and returns a process exit code.

mod batch;
mod compare;
mod convert;
mod decode;

use crate::cli::{Cli, Commands};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Compare {
            interp,
            native,
            high_bits,
        } => compare::cmd_compare(interp, native, high_bits.policy.into()),
        Commands::Convert { value } => convert::cmd_convert(value),
        Commands::Decode {
            bits,
            signed,
            words,
        } => decode::cmd_decode(*bits, *signed, words),
        Commands::Batch {
            file,
            jobs,
            high_bits,
        } => batch::cmd_batch(file, *jobs, high_bits.policy.into()),
    }
}

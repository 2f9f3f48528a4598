//! `vequiv batch`: compare every `INTERP => NATIVE` line of a case file.

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};
use vequiv::harness::{CaseOutcome, HarnessReport};
use vequiv::{
    CompareConfig, HighBitPolicy, InterpValue, NativeValue, compare_values_with, parse_interp,
    parse_native,
};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal;

/// One parsed line of a case file.
#[derive(Debug)]
struct BatchCase {
    line: usize,
    interp: InterpValue,
    native: NativeValue,
}

/// Parse a case file into cases and per-line error messages.
fn parse_cases(source: &str) -> (Vec<BatchCase>, Vec<String>) {
    let mut cases = Vec::new();
    let mut errors = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let Some((interp, native)) = text.split_once("=>") else {
            errors.push(format!("line {line}: expected `INTERP => NATIVE`"));
            continue;
        };
        let interp = match parse_interp(interp) {
            Ok(v) => v,
            Err(e) => {
                errors.push(format!("line {line}: interpreter value {e}"));
                continue;
            }
        };
        match parse_native(native) {
            Ok(native) => cases.push(BatchCase {
                line,
                interp,
                native,
            }),
            Err(e) => errors.push(format!("line {line}: native value {e}")),
        }
    }

    (cases, errors)
}

fn run_cases(cases: &[BatchCase], config: &CompareConfig) -> HarnessReport {
    let outcomes: Vec<(String, CaseOutcome)> = cases
        .par_iter()
        .map(|case| {
            let outcome =
                CaseOutcome::from_compare(compare_values_with(&case.interp, &case.native, config));
            (format!("line {}", case.line), outcome)
        })
        .collect();

    let mut report = HarnessReport::default();
    for (name, outcome) in outcomes {
        report.record(name, outcome);
    }
    report
}

pub fn cmd_batch(file: &Path, jobs: usize, high_bits: HighBitPolicy) -> i32 {
    let source = match std::fs::read_to_string(file) {
        Ok(source) => source,
        Err(e) => {
            terminal::error(&format!("cannot read {}: {e}", file.display()));
            return EXIT_FAILURE;
        }
    };

    let (cases, errors) = parse_cases(&source);
    for error in &errors {
        terminal::error(error);
    }

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool,
        Err(e) => {
            terminal::error(&format!("cannot start worker pool: {e}"));
            return EXIT_FAILURE;
        }
    };
    debug!(threads = pool.current_num_threads(), %high_bits, "running batch");
    terminal::info(&format!("comparing {} cases from {}", cases.len(), file.display()));

    let config = CompareConfig::with_high_bits(high_bits);
    let report = pool.install(|| run_cases(&cases, &config));

    for (name, mismatch) in &report.divergences {
        terminal::error(&format!("{name}: {mismatch}"));
    }
    info!(file = %file.display(), %report, "batch finished");

    if report.is_clean() && errors.is_empty() {
        terminal::success(&report.to_string());
        EXIT_SUCCESS
    } else {
        terminal::warning(&report.to_string());
        EXIT_FAILURE
    }
}

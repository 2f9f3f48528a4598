//! Differential execution of one test case through both evaluators.
//!
//! Converts interpreter arguments, runs the native executor and the
//! interpreter, then compares their results. Cases whose arguments or result
//! have no native form are skipped rather than failed.

use std::fmt;

use thiserror::Error;
use tracing::{debug, debug_span, warn};
use vequiv_value::{InterpValue, NativeValue, ValueError};

use crate::{
    CompareConfig, CompareError, ConvertError, EquivalenceMismatch, UnsupportedConversion,
    compare_values_with, convert_all,
};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Tree-walking evaluator of the program under test.
pub trait Interpreter {
    /// Evaluate the entry function on `args`.
    ///
    /// # Errors
    ///
    /// Any evaluation failure.
    fn evaluate(&mut self, args: &[InterpValue]) -> Result<InterpValue, BoxError>;
}

/// Compiled evaluator of the program under test.
pub trait NativeExecutor {
    /// Run the compiled entry function on `args`.
    ///
    /// # Errors
    ///
    /// Any execution failure.
    fn run(&mut self, args: &[NativeValue]) -> Result<NativeValue, BoxError>;
}

impl<F> Interpreter for F
where
    F: FnMut(&[InterpValue]) -> Result<InterpValue, BoxError>,
{
    fn evaluate(&mut self, args: &[InterpValue]) -> Result<InterpValue, BoxError> {
        self(args)
    }
}

impl<F> NativeExecutor for F
where
    F: FnMut(&[NativeValue]) -> Result<NativeValue, BoxError>,
{
    fn run(&mut self, args: &[NativeValue]) -> Result<NativeValue, BoxError> {
        self(args)
    }
}

/// Harness errors. Distinct from divergences: these mean the case could not
/// be run at all.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("cannot convert arguments: {0}")]
    Convert(#[from] ValueError),
    #[error("interpreter failed: {0}")]
    Interpreter(#[source] BoxError),
    #[error("native executor failed: {0}")]
    Executor(#[source] BoxError),
}

/// Result of one differential case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Matched,
    /// Not native-comparable; evaluated by the interpreter alone.
    Skipped(UnsupportedConversion),
    Diverged(EquivalenceMismatch),
}

impl CaseOutcome {
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched)
    }

    /// Fold a comparison result into an outcome.
    #[must_use]
    pub fn from_compare(result: Result<(), CompareError>) -> Self {
        match result {
            Ok(()) => Self::Matched,
            Err(CompareError::Unsupported(e)) => Self::Skipped(e),
            Err(CompareError::Mismatch(m)) => Self::Diverged(m),
        }
    }
}

/// Run one case through both evaluators and compare the results.
///
/// # Errors
///
/// Returns [`HarnessError`] if an argument cannot be encoded or either
/// evaluator fails. Divergences are reported as [`CaseOutcome::Diverged`].
pub fn run_case(
    name: &str,
    args: &[InterpValue],
    interpreter: &mut dyn Interpreter,
    executor: &mut dyn NativeExecutor,
    config: &CompareConfig,
) -> Result<CaseOutcome, HarnessError> {
    let _span = debug_span!("case", case = name).entered();

    let native_args = match convert_all(args) {
        Ok(native_args) => native_args,
        Err(ConvertError::Unsupported(e)) => {
            debug!(error = %e, "arguments not native-comparable, skipping");
            return Ok(CaseOutcome::Skipped(e));
        }
        Err(ConvertError::Value(e)) => return Err(e.into()),
    };

    let actual = executor.run(&native_args).map_err(HarnessError::Executor)?;
    let expected = interpreter.evaluate(args).map_err(HarnessError::Interpreter)?;

    let outcome = CaseOutcome::from_compare(compare_values_with(&expected, &actual, config));
    match &outcome {
        CaseOutcome::Matched => debug!("results match"),
        CaseOutcome::Skipped(e) => debug!(error = %e, "result not native-comparable, skipping"),
        CaseOutcome::Diverged(m) => {
            warn!(case = name, divergence = %m, "interpreter and native results diverge");
        }
    }
    Ok(outcome)
}

/// Tally of case outcomes.
#[derive(Debug, Clone, Default)]
pub struct HarnessReport {
    pub matched: usize,
    pub skipped: usize,
    /// Diverged cases in the order they were recorded.
    pub divergences: Vec<(String, EquivalenceMismatch)>,
}

impl HarnessReport {
    pub fn record(&mut self, name: impl Into<String>, outcome: CaseOutcome) {
        match outcome {
            CaseOutcome::Matched => self.matched += 1,
            CaseOutcome::Skipped(_) => self.skipped += 1,
            CaseOutcome::Diverged(m) => self.divergences.push((name.into(), m)),
        }
    }

    #[must_use]
    pub fn diverged(&self) -> usize {
        self.divergences.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.matched + self.skipped + self.diverged()
    }

    /// True if no case diverged.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.divergences.is_empty()
    }

    #[must_use]
    pub fn first_divergence(&self) -> Option<&(String, EquivalenceMismatch)> {
        self.divergences.first()
    }
}

impl fmt::Display for HarnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cases: {} matched, {} skipped, {} diverged",
            self.total(),
            self.matched,
            self.skipped,
            self.diverged()
        )
    }
}

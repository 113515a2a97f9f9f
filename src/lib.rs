//! # tle-validator
//!
//! Layout and checksum validation of Two-Line Element (TLE) records.
//! Provides fixed-column field extraction, the modulo-10 line checksum,
//! satellite number, epoch and eccentricity checks, an orchestrating
//! validator that reports every rule's outcome, and write-through sinks
//! (SQLite, tracing) for the extracted fields.

pub mod checks;
pub mod config;
pub mod constants;
pub mod logging;
pub mod outcome;
pub mod sink;
pub mod span;
pub mod summary;
pub mod tle;
pub mod validator;

pub use config::{EpochYearRule, FieldGate, ValidatorConfig};
pub use outcome::{CheckKind, CheckOutcome, CheckStatus, Failure};
pub use tle::TleRecord;
pub use validator::{validate, ValidationResult, Validator};

#[cfg(feature = "python")]
mod pybridge;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn tle_validator(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pybridge::register(m)?;
    Ok(())
}

//! Python bindings via PyO3.
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::checks::checksum;
use crate::validator::{self, ValidationResult};

fn outcomes_to_list<'py>(py: Python<'py>, result: &ValidationResult) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty_bound(py);
    for o in &result.outcomes {
        let d = PyDict::new_bound(py);
        d.set_item("check", o.kind.name())?;
        let status = if o.is_passed() {
            "passed"
        } else if o.is_failed() {
            "failed"
        } else {
            "skipped"
        };
        d.set_item("status", status)?;
        d.set_item("failure", o.failure().map(|f| f.code()))?;
        d.set_item("value", o.value.as_deref())?;
        d.set_item("message", o.message.as_deref())?;
        list.append(d)?;
    }
    Ok(list)
}

/// Validate two TLE lines. Returns a dict with `valid`, `outcomes` and `fields`.
#[pyfunction]
#[pyo3(signature = (line1, line2, record_id=None))]
fn validate<'py>(
    py: Python<'py>,
    line1: &str,
    line2: &str,
    record_id: Option<&str>,
) -> PyResult<Bound<'py, PyDict>> {
    let result = validator::validate(line1, line2, record_id);
    let f = &result.fields;

    let fields = PyDict::new_bound(py);
    fields.set_item("line1_length", f.line1_length)?;
    fields.set_item("line2_length", f.line2_length)?;
    fields.set_item("checksum_expected", f.checksum_expected)?;
    fields.set_item("checksum_calculated", f.checksum_calculated)?;
    fields.set_item("satellite_number", f.satellite_number.as_deref())?;
    fields.set_item("epoch_year", f.epoch_year)?;
    fields.set_item("epoch_day", f.epoch_day)?;
    fields.set_item("eccentricity_token", f.eccentricity_token.as_deref())?;
    fields.set_item("eccentricity", f.eccentricity)?;

    let out = PyDict::new_bound(py);
    out.set_item("record_id", result.record_id.as_deref())?;
    out.set_item("valid", result.overall_valid)?;
    out.set_item("outcomes", outcomes_to_list(py, &result)?)?;
    out.set_item("fields", fields)?;
    Ok(out)
}

/// Mod-10 checksum of the first 68 characters of `line`.
#[pyfunction]
fn compute_checksum(line: &str) -> u8 {
    let body: String = line.chars().take(68).collect();
    checksum::compute_checksum(&body)
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(validate, m)?)?;
    m.add_function(wrap_pyfunction!(compute_checksum, m)?)?;
    Ok(())
}

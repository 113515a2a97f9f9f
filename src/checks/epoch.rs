//! Epoch, line 1 columns [18,32): `YYDDD.DDDDDDDD`.
//!
//! Only the two-digit year and the integral day of year are validated; the
//! fractional day is carried along untouched.

use crate::checks::{parse_digits, span_out_of_range};
use crate::config::EpochYearRule;
use crate::constants::EPOCH;
use crate::outcome::{CheckKind, CheckOutcome, Failure};
use crate::span::char_len;

#[derive(Debug, Clone)]
pub struct EpochCheck {
    pub outcome: CheckOutcome,
    pub year: Option<u16>,
    pub day: Option<u16>,
}

/// Parse and range-check the epoch year and day.
///
/// Both sub-fields are extracted before any range check, so a record with a
/// rejected year still reports its day.
pub fn parse_epoch(line: &str, year_rule: EpochYearRule, day_max_exclusive: u16) -> EpochCheck {
    let kind = CheckKind::Epoch;
    let Some(token) = EPOCH.extract_trimmed(line) else {
        return EpochCheck {
            outcome: CheckOutcome::failed(kind, span_out_of_range(1, EPOCH, char_len(line)), None),
            year: None,
            day: None,
        };
    };
    let value = Some(token.to_string());

    let year = sub_field(token, 0..2, "epoch_year");
    let day = sub_field(token, 2..5, "epoch_day");
    let (year_ok, day_ok) = (year.as_ref().ok().copied(), day.as_ref().ok().copied());

    let failure = match (year, day) {
        (Err(f), _) | (_, Err(f)) => Some(f),
        (Ok(y), Ok(d)) => {
            if !year_rule.accepts(y) {
                Some(Failure::InvalidEpochYear {
                    year: y,
                    rule: year_rule.to_string(),
                })
            } else if d == 0 || d >= day_max_exclusive {
                Some(Failure::InvalidEpochDay {
                    day: d,
                    max_exclusive: day_max_exclusive,
                })
            } else {
                None
            }
        }
    };

    let outcome = match failure {
        Some(f) => CheckOutcome::failed(kind, f, value),
        None => CheckOutcome::passed(kind, value),
    };
    EpochCheck {
        outcome,
        year: year_ok,
        day: day_ok,
    }
}

fn sub_field(token: &str, range: std::ops::Range<usize>, field: &'static str) -> Result<u16, Failure> {
    let raw = token.get(range.clone()).unwrap_or_default();
    let failure = |reason: String| Failure::ParseFailure {
        line: 1,
        field,
        span: EPOCH,
        token: token.to_string(),
        reason,
    };
    if raw.len() != range.len() {
        return Err(failure(format!(
            "expected {} digits at [{},{}) of the epoch",
            range.len(),
            range.start,
            range.end
        )));
    }
    let n = parse_digits(raw).map_err(failure)?;
    // Two or three digits always fit.
    Ok(n as u16)
}

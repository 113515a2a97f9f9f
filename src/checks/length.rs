//! Fixed record width check.

use crate::constants::TLE_LINE_WIDTH;
use crate::outcome::{CheckKind, CheckOutcome, Failure};
use crate::span::char_len;

/// Pass iff `line` is exactly [`TLE_LINE_WIDTH`] characters.
pub fn check_length(line: &str, line_no: u8) -> CheckOutcome {
    let kind = if line_no == 1 {
        CheckKind::Line1Length
    } else {
        CheckKind::Line2Length
    };
    let actual = char_len(line);
    let value = Some(actual.to_string());

    if actual == TLE_LINE_WIDTH {
        CheckOutcome::passed(kind, value)
    } else {
        CheckOutcome::failed(
            kind,
            Failure::LengthMismatch {
                line: line_no,
                expected: TLE_LINE_WIDTH,
                actual,
            },
            value,
        )
    }
}

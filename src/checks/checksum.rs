//! Modulo-10 line checksum.
//!
//! Each digit contributes its value, `-` contributes 1, every other
//! character contributes 0. The sum over the first 68 characters, mod 10,
//! must equal the digit in column 68.

use crate::checks::span_out_of_range;
use crate::constants::{CHECKSUM_BODY, CHECKSUM_DIGIT};
use crate::outcome::{CheckKind, CheckOutcome, Failure};
use crate::span::char_len;

/// Checksum outcome plus the digits that were compared.
#[derive(Debug, Clone)]
pub struct ChecksumCheck {
    pub outcome: CheckOutcome,
    pub expected: Option<u8>,
    pub calculated: Option<u8>,
}

/// Compute TLE checksum (mod-10 of sum of digits, '-' counts as 1).
pub fn compute_checksum(body: &str) -> u8 {
    let sum: u32 = body
        .chars()
        .map(|c| match c {
            '0'..='9' => c as u32 - '0' as u32,
            '-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

/// Parse a single ASCII digit.
fn parse_digit(token: &str) -> Option<u8> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ '0'..='9'), None) => Some(c as u8 - b'0'),
        _ => None,
    }
}

/// Verify the checksum of line 1 (or line 2 when `line_no == 2`).
pub fn verify_checksum(line: &str, line_no: u8) -> ChecksumCheck {
    let kind = if line_no == 1 {
        CheckKind::Checksum
    } else {
        CheckKind::Line2Checksum
    };

    let calculated = CHECKSUM_BODY.extract(line).map(compute_checksum);
    let Some(digit) = CHECKSUM_DIGIT.extract(line) else {
        let failure = span_out_of_range(line_no, CHECKSUM_DIGIT, char_len(line));
        return ChecksumCheck {
            outcome: CheckOutcome::failed(kind, failure, None),
            expected: None,
            calculated,
        };
    };

    let Some(expected) = parse_digit(digit) else {
        let failure = Failure::ParseFailure {
            line: line_no,
            field: CHECKSUM_DIGIT.name,
            span: CHECKSUM_DIGIT,
            token: digit.to_string(),
            reason: "checksum must be a single digit".to_string(),
        };
        return ChecksumCheck {
            outcome: CheckOutcome::failed(kind, failure, Some(digit.to_string())),
            expected: None,
            calculated,
        };
    };

    // The digit span ends at column 69, so the body is always present here.
    let calculated_digit = calculated.unwrap_or_default();
    let value = Some(expected.to_string());
    let outcome = if expected == calculated_digit {
        CheckOutcome::passed(kind, value)
    } else {
        CheckOutcome::failed(
            kind,
            Failure::ChecksumMismatch {
                line: line_no,
                expected,
                calculated: calculated_digit,
            },
            value,
        )
    };

    ChecksumCheck {
        outcome,
        expected: Some(expected),
        calculated,
    }
}

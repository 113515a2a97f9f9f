//! Record-level validation.
//!
//! Runs the field checkers in a fixed order and folds their outcomes into a
//! [`ValidationResult`]. Validation is a pure function of the two lines and
//! the configuration: no I/O, no logging, no shared state.
//!
//! # Example
//! ```
//! use tle_validator::validator::validate;
//!
//! let line1 = "1 00011U 59001A   25266.56989994  .00000842  00000-0  43621-3 0  9990";
//! let line2 = "2 00011  32.8735  13.8888 1448157 340.0672  14.8534 11.90033149503789";
//!
//! let result = validate(line1, line2, Some("explorer-7"));
//! assert!(result.overall_valid);
//! assert_eq!(result.fields.satellite_number.as_deref(), Some("00011"));
//! ```

use serde::Serialize;

use crate::checks::checksum::verify_checksum;
use crate::checks::eccentricity::parse_eccentricity;
use crate::checks::epoch::parse_epoch;
use crate::checks::length::check_length;
use crate::checks::satellite::parse_satellite_number;
use crate::config::{FieldGate, ValidatorConfig};
use crate::constants::{CHECKSUM_BODY, CHECKSUM_DIGIT, ECCENTRICITY, EPOCH, SATELLITE_NUMBER};
use crate::outcome::{CheckKind, CheckOutcome, DiagnosticEvent};
use crate::span::{char_len, FieldSpan};
use crate::tle::TleRecord;

/// Values pulled out of the record, kept whether or not it is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedFields {
    pub line1_length: usize,
    pub line2_length: usize,
    pub checksum_expected: Option<u8>,
    pub checksum_calculated: Option<u8>,
    pub satellite_number: Option<String>,
    pub epoch_year: Option<u16>,
    pub epoch_day: Option<u16>,
    pub eccentricity_token: Option<String>,
    /// Eccentricity with the implied leading decimal restored.
    pub eccentricity: Option<f64>,
    pub line2_checksum_expected: Option<u8>,
    pub line2_checksum_calculated: Option<u8>,
}

/// Aggregate result of validating one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub record_id: Option<String>,
    /// AND of every attempted check. Skipped checks do not count as passes.
    pub overall_valid: bool,
    /// One outcome per check, in execution order.
    pub outcomes: Vec<CheckOutcome>,
    pub fields: ExtractedFields,
    pub events: Vec<DiagnosticEvent>,
}

impl ValidationResult {
    pub fn outcome(&self, kind: CheckKind) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| o.is_skipped())
    }

    /// Label used in logs and sinks.
    pub fn label(&self) -> &str {
        self.record_id.as_deref().unwrap_or("<unnamed>")
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.overall_valid { "VALID" } else { "INVALID" };
        write!(f, "{}: {}", self.label(), verdict)?;
        for o in &self.outcomes {
            let status = if o.is_passed() {
                "pass"
            } else if o.is_failed() {
                "FAIL"
            } else {
                "skip"
            };
            write!(f, "\n  {:<17} {:<4}", o.kind.name(), status)?;
            if let Some(value) = &o.value {
                write!(f, " [{value}]")?;
            }
            if let Some(message) = &o.message {
                write!(f, " {message}")?;
            }
        }
        Ok(())
    }
}

/// Runs every check against a record.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Validator { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a record, using its name as the record id when none is given.
    pub fn validate(&self, record: &TleRecord, record_id: Option<&str>) -> ValidationResult {
        let record_id = record_id.or(record.name.as_deref());
        self.validate_lines(&record.line1, &record.line2, record_id)
    }

    pub fn validate_lines(&self, line1: &str, line2: &str, record_id: Option<&str>) -> ValidationResult {
        let mut fields = ExtractedFields {
            line1_length: char_len(line1),
            line2_length: char_len(line2),
            ..ExtractedFields::default()
        };
        let mut outcomes = Vec::with_capacity(7);

        // ── Line 1 ──
        let length1 = check_length(line1, 1);
        let line1_ok = length1.is_passed();
        outcomes.push(length1);

        let gate1 = Gate::new(self.config.line1_gate, 1, line1_ok, fields.line1_length);

        outcomes.push(gate1.run(CheckKind::Checksum, &[CHECKSUM_BODY, CHECKSUM_DIGIT], || {
            let check = verify_checksum(line1, 1);
            fields.checksum_expected = check.expected;
            fields.checksum_calculated = check.calculated;
            check.outcome
        }));

        outcomes.push(gate1.run(CheckKind::SatelliteNumber, &[SATELLITE_NUMBER], || {
            let check = parse_satellite_number(line1);
            fields.satellite_number = check.number;
            check.outcome
        }));

        outcomes.push(gate1.run(CheckKind::Epoch, &[EPOCH], || {
            let check = parse_epoch(
                line1,
                self.config.epoch_year_rule,
                self.config.epoch_day_max_exclusive,
            );
            fields.epoch_year = check.year;
            fields.epoch_day = check.day;
            check.outcome
        }));

        // ── Line 2 ──
        let length2 = check_length(line2, 2);
        let line2_ok = length2.is_passed();
        outcomes.push(length2);

        let gate2 = Gate::new(self.config.line2_gate, 2, line2_ok, fields.line2_length);

        outcomes.push(gate2.run(CheckKind::Eccentricity, &[ECCENTRICITY], || {
            let check = parse_eccentricity(line2);
            fields.eccentricity_token = check.token;
            fields.eccentricity = check.value;
            check.outcome
        }));

        if self.config.verify_line2_checksum {
            outcomes.push(gate2.run(CheckKind::Line2Checksum, &[CHECKSUM_BODY, CHECKSUM_DIGIT], || {
                let check = verify_checksum(line2, 2);
                fields.line2_checksum_expected = check.expected;
                fields.line2_checksum_calculated = check.calculated;
                check.outcome
            }));
        }

        let overall_valid = outcomes
            .iter()
            .filter(|o| o.is_attempted())
            .all(CheckOutcome::is_passed);
        let events = outcomes.iter().map(DiagnosticEvent::from).collect();

        ValidationResult {
            record_id: record_id.map(str::to_string),
            overall_valid,
            outcomes,
            fields,
            events,
        }
    }
}

/// Decides whether the field checks of one line may run.
struct Gate {
    mode: FieldGate,
    line: u8,
    length_ok: bool,
    line_len: usize,
}

impl Gate {
    fn new(mode: FieldGate, line: u8, length_ok: bool, line_len: usize) -> Self {
        Gate {
            mode,
            line,
            length_ok,
            line_len,
        }
    }

    fn run(&self, kind: CheckKind, spans: &[FieldSpan], check: impl FnOnce() -> CheckOutcome) -> CheckOutcome {
        match self.mode {
            FieldGate::ExactWidth if !self.length_ok => CheckOutcome::skipped(
                kind,
                format!("line {} length check failed", self.line),
            ),
            FieldGate::SpanInBounds => match spans.iter().find(|s| !s.fits(self.line_len)) {
                Some(span) => CheckOutcome::skipped(
                    kind,
                    format!(
                        "line {} is {} characters, too short for {}",
                        self.line, self.line_len, span
                    ),
                ),
                None => check(),
            },
            FieldGate::ExactWidth => check(),
        }
    }
}

/// Validate two lines with the default configuration.
pub fn validate(line1: &str, line2: &str, record_id: Option<&str>) -> ValidationResult {
    Validator::default().validate_lines(line1, line2, record_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EpochYearRule;
    use crate::outcome::{CheckStatus, Failure, Verdict};

    const LINE1: &str = "1 00011U 59001A   25266.56989994  .00000842  00000-0  43621-3 0  9990";
    const LINE2: &str = "2 00011  32.8735  13.8888 1448157 340.0672  14.8534 11.90033149503789";

    #[test]
    fn test_valid_record() {
        let r = validate(LINE1, LINE2, Some("explorer-7"));
        assert!(r.overall_valid);
        assert_eq!(r.record_id.as_deref(), Some("explorer-7"));
        assert_eq!(r.outcomes.len(), 6);
        assert!(r.outcomes.iter().all(CheckOutcome::is_passed));
        assert_eq!(r.fields.line1_length, 69);
        assert_eq!(r.fields.line2_length, 69);
        assert_eq!(r.fields.checksum_expected, Some(0));
        assert_eq!(r.fields.checksum_calculated, Some(0));
        assert_eq!(r.fields.epoch_year, Some(25));
        assert_eq!(r.fields.epoch_day, Some(266));
        assert_eq!(r.fields.eccentricity_token.as_deref(), Some("1448157"));
    }

    #[test]
    fn test_outcome_order() {
        let r = validate(LINE1, LINE2, None);
        let kinds: Vec<CheckKind> = r.outcomes.iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CheckKind::Line1Length,
                CheckKind::Checksum,
                CheckKind::SatelliteNumber,
                CheckKind::Epoch,
                CheckKind::Line2Length,
                CheckKind::Eccentricity,
            ]
        );
        assert_eq!(r.events.len(), 6);
        assert!(r.events.iter().all(|e| e.verdict == Verdict::Pass));
    }

    #[test]
    fn test_short_line1_skips_field_checks() {
        let r = validate("Invalid line1", LINE2, None);
        assert!(!r.overall_valid);
        assert!(matches!(
            r.outcome(CheckKind::Line1Length).unwrap().failure(),
            Some(Failure::LengthMismatch { line: 1, expected: 69, actual: 13 })
        ));
        for kind in [CheckKind::Checksum, CheckKind::SatelliteNumber, CheckKind::Epoch] {
            assert!(r.outcome(kind).unwrap().is_skipped(), "{kind} should be skipped");
        }
        assert!(r.outcome(CheckKind::Eccentricity).unwrap().is_passed());
        assert_eq!(r.fields.satellite_number, None);
        assert_eq!(r.skipped().count(), 3);
        assert_eq!(r.failures().count(), 1);
    }

    #[test]
    fn test_long_line2_still_checks_eccentricity() {
        let line2 = LINE2.replace("1448157", "2.1234567");
        let r = validate(LINE1, &line2, None);
        assert!(!r.overall_valid);
        assert!(r.outcome(CheckKind::Line2Length).unwrap().is_failed());
        assert!(matches!(
            r.outcome(CheckKind::Eccentricity).unwrap().failure(),
            Some(Failure::InvalidEccentricity { .. })
        ));
    }

    #[test]
    fn test_strict_gate_skips_eccentricity() {
        let validator = Validator::new(ValidatorConfig::strict());
        let line2 = LINE2.replace("1448157", "2.1234567");
        let r = validator.validate_lines(LINE1, &line2, None);
        assert!(!r.overall_valid);
        assert!(r.outcome(CheckKind::Eccentricity).unwrap().is_skipped());
        assert!(r.outcome(CheckKind::Line2Checksum).unwrap().is_skipped());
    }

    #[test]
    fn test_span_gate_skips_when_too_short() {
        let r = validate(LINE1, "2 00011  32.8735", None);
        let ecc = r.outcome(CheckKind::Eccentricity).unwrap();
        assert!(matches!(&ecc.status, CheckStatus::Skipped { reason } if reason.contains("too short")));
        assert!(!r.overall_valid);
    }

    #[test]
    fn test_line2_checksum_when_enabled() {
        let validator = Validator::new(ValidatorConfig::strict());
        let r = validator.validate_lines(LINE1, LINE2, None);
        assert!(r.overall_valid);
        assert_eq!(r.outcomes.len(), 7);
        assert_eq!(r.fields.line2_checksum_expected, Some(9));

        let bad = format!("{}0", &LINE2[..68]);
        let r = validator.validate_lines(LINE1, &bad, None);
        assert!(!r.overall_valid);
        assert!(r.outcome(CheckKind::Line2Checksum).unwrap().is_failed());
    }

    #[test]
    fn test_fields_extracted_from_invalid_record() {
        let line1 = format!("{}5", &LINE1[..68]);
        let r = validate(&line1, LINE2, None);
        assert!(!r.overall_valid);
        assert_eq!(r.fields.checksum_expected, Some(5));
        assert_eq!(r.fields.checksum_calculated, Some(0));
        assert_eq!(r.fields.satellite_number.as_deref(), Some("00011"));
        assert_eq!(r.fields.epoch_year, Some(25));
    }

    #[test]
    fn test_configured_year_rule() {
        let config = ValidatorConfig {
            epoch_year_rule: EpochYearRule::InsideBand { low: 26, high: 56 },
            ..ValidatorConfig::default()
        };
        let r = Validator::new(config).validate_lines(LINE1, LINE2, None);
        assert!(!r.overall_valid);
        assert!(matches!(
            r.outcome(CheckKind::Epoch).unwrap().failure(),
            Some(Failure::InvalidEpochYear { year: 25, .. })
        ));
    }

    #[test]
    fn test_record_name_used_as_id() {
        let record = TleRecord::with_name("EXPLORER 7", LINE1, LINE2);
        let validator = Validator::default();
        assert_eq!(validator.validate(&record, None).record_id.as_deref(), Some("EXPLORER 7"));
        assert_eq!(validator.validate(&record, Some("x")).record_id.as_deref(), Some("x"));
    }

    #[test]
    fn test_idempotent() {
        let a = validate("Invalid line1", LINE2, Some("r"));
        let b = validate("Invalid line1", LINE2, Some("r"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let text = validate("Invalid line1", LINE2, Some("r")).to_string();
        assert!(text.starts_with("r: INVALID"));
        assert!(text.contains("line1_length"));
        assert!(text.contains("skip"));
    }
}

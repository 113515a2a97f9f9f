//! End-to-end checks of the validator's observable contract.

use tle_validator::checks::checksum::compute_checksum;
use tle_validator::sink::{deliver, SqliteSink};
use tle_validator::summary::RunSummary;
use tle_validator::{validate, CheckKind, CheckStatus, Failure, TleRecord, Validator};

const LINE1: &str = "1 00011U 59001A   25266.56989994  .00000842  00000-0  43621-3 0  9990";
const LINE2: &str = "2 00011  32.8735  13.8888 1448157 340.0672  14.8534 11.90033149503789";
const ISS_LINE2: &str = "2 25544  51.6456 123.4567 0001234 123.4567 234.5678 15.12345678123456";

#[test]
fn known_good_record_is_valid() {
    let result = validate(LINE1, LINE2, None);
    assert!(result.overall_valid, "{result}");
}

#[test]
fn explicit_decimal_eccentricity_is_invalid() {
    let line2 = ISS_LINE2.replace("0001234", "2.1234567");
    let result = validate(LINE1, &line2, Some("ecc"));
    assert!(!result.overall_valid);
    let ecc = result.outcome(CheckKind::Eccentricity).unwrap();
    assert!(matches!(ecc.failure(), Some(Failure::InvalidEccentricity { .. })));
}

#[test]
fn short_line1_reports_length_and_skips_fields() {
    let result = validate("Invalid line1", ISS_LINE2, None);
    assert!(!result.overall_valid);
    assert!(matches!(
        result.outcome(CheckKind::Line1Length).unwrap().failure(),
        Some(Failure::LengthMismatch { .. })
    ));
    for kind in [CheckKind::Checksum, CheckKind::SatelliteNumber, CheckKind::Epoch] {
        let outcome = result.outcome(kind).unwrap();
        assert!(
            matches!(outcome.status, CheckStatus::Skipped { .. }),
            "{kind} was {:?}",
            outcome.status
        );
    }
}

#[test]
fn any_wrong_length_is_invalid() {
    for len in [0, 1, 68, 70, 100] {
        let line1: String = LINE1.chars().cycle().take(len).collect();
        let result = validate(&line1, LINE2, None);
        assert!(!result.overall_valid);
        assert!(matches!(
            result.outcome(CheckKind::Line1Length).unwrap().failure(),
            Some(Failure::LengthMismatch { actual, .. }) if *actual == len
        ));
    }
}

#[test]
fn checksum_passes_iff_digit_matches() {
    let body = &LINE1[..68];
    let calculated = compute_checksum(body);
    for d in 0..=9u8 {
        let line1 = format!("{body}{d}");
        let result = validate(&line1, LINE2, None);
        let passed = result.outcome(CheckKind::Checksum).unwrap().is_passed();
        assert_eq!(passed, d == calculated, "digit {d}");
    }
}

#[test]
fn single_character_mutation_is_reverified() {
    let validator = Validator::default();
    assert!(validator.validate_lines(LINE1, LINE2, None).overall_valid);

    // Bump each digit in the body; the checksum must catch every one.
    for (i, c) in LINE1[..68].char_indices() {
        let Some(d) = c.to_digit(10) else { continue };
        let replacement = char::from_digit((d + 1) % 10, 10).unwrap();
        let mut mutated = LINE1.to_string();
        mutated.replace_range(i..i + 1, &replacement.to_string());
        let result = validator.validate_lines(&mutated, LINE2, None);
        assert!(
            result.outcome(CheckKind::Checksum).unwrap().is_failed(),
            "mutation at column {i} went unnoticed"
        );
    }
}

#[test]
fn validation_is_idempotent() {
    let line2 = ISS_LINE2.replace("0001234", "2.1234567");
    for (l1, l2) in [(LINE1, LINE2), ("Invalid line1", ISS_LINE2), (LINE1, line2.as_str())] {
        assert_eq!(validate(l1, l2, Some("id")), validate(l1, l2, Some("id")));
    }
}

#[test]
fn overall_valid_is_and_of_attempted_outcomes() {
    let cases = [
        validate(LINE1, LINE2, None),
        validate("Invalid line1", LINE2, None),
        validate(LINE1, "short", None),
        validate(&format!("{}1", &LINE1[..68]), LINE2, None),
    ];
    for result in &cases {
        let expected = result
            .outcomes
            .iter()
            .filter(|o| o.is_attempted())
            .all(|o| o.is_passed());
        assert_eq!(result.overall_valid, expected);
        assert!(result.outcome(CheckKind::Line1Length).unwrap().is_attempted());
    }
}

#[test]
fn batch_to_sqlite_and_summary() {
    let input = format!(
        "EXPLORER 7\n{LINE1}\n{LINE2}\nBROKEN\n1 short line\n{ISS_LINE2}\n"
    );
    let records = TleRecord::parse_batch(&input).unwrap();
    assert_eq!(records.len(), 2);

    let validator = Validator::default();
    let mut sink = SqliteSink::open_in_memory().unwrap();
    let mut summary = RunSummary::new();
    for record in &records {
        let result = validator.validate(record, None);
        assert!(deliver(&result, &mut sink).is_accepted());
        summary.record(&result);
    }

    assert_eq!(summary.valid, 1);
    assert_eq!(summary.invalid, 1);
    let rows = sink.rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].record_id.as_deref(), Some("EXPLORER 7"));
    assert!(rows[0].overall_valid);
    assert_eq!(rows[1].record_id.as_deref(), Some("BROKEN"));
    assert!(!rows[1].overall_valid);
    assert_eq!(rows[1].eccentricity_token.as_deref(), Some("0001234"));
}

#[test]
fn result_serializes_to_json() {
    let result = validate("Invalid line1", LINE2, Some("r"));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["overall_valid"], false);
    assert_eq!(json["outcomes"][0]["kind"], "Line1Length");
    assert_eq!(json["outcomes"][0]["status"]["status"], "Failed");
    assert_eq!(json["outcomes"][0]["status"]["detail"]["kind"], "LengthMismatch");
    assert_eq!(json["outcomes"][1]["status"]["status"], "Skipped");
}

#[test]
fn malformed_record_in_batch_is_counted_invalid() {
    let input = format!("Invalid line1\n{LINE2}\n{LINE1}\n{LINE2}\n");
    let records = TleRecord::parse_batch(&input).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.name.is_none()));

    let validator = Validator::default();
    let results: Vec<_> = records.iter().map(|r| validator.validate(r, None)).collect();
    let summary: RunSummary = results.iter().collect();
    assert_eq!(summary.invalid, 1);
    assert_eq!(summary.valid, 1);
    assert!(!summary.all_valid());
    assert!(matches!(
        results[0].outcome(CheckKind::Line1Length).unwrap().failure(),
        Some(Failure::LengthMismatch { actual: 13, .. })
    ));
}

#[test]
fn orphan_line2_is_counted_invalid() {
    let input = format!("{LINE1}\n{LINE2}\n{ISS_LINE2}\n");
    let records = TleRecord::parse_batch(&input).unwrap();
    let summary: RunSummary = records
        .iter()
        .map(|r| validate(&r.line1, &r.line2, None))
        .collect::<Vec<_>>()
        .iter()
        .collect();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.invalid, 1);
    assert_eq!(summary.failures_by_check.get(&CheckKind::Line1Length), Some(&1));
}

#[test]
fn rejected_satellite_token_reaches_the_store() {
    let line1 = LINE1.replacen("00011", "A0011", 1);
    let result = validate(&line1, LINE2, Some("alpha"));
    assert!(matches!(
        result.outcome(CheckKind::SatelliteNumber).unwrap().failure(),
        Some(Failure::InvalidSatelliteNumber { .. })
    ));
    assert_eq!(result.fields.satellite_number.as_deref(), Some("A0011"));

    let mut sink = SqliteSink::open_in_memory().unwrap();
    assert!(deliver(&result, &mut sink).is_accepted());
    let rows = sink.rows().unwrap();
    assert_eq!(rows[0].satellite_number.as_deref(), Some("A0011"));
    assert!(!rows[0].overall_valid);
}

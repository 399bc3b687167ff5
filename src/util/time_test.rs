use super::*;
use chrono_tz::America::{New_York, Sao_Paulo};
use chrono_tz::UTC;

fn assert_rfc3339_shape(value: &str) {
    let bytes = value.as_bytes();
    assert_eq!(bytes.len(), 25, "{value}");
    for (i, expected) in [(4, b'-'), (7, b'-'), (10, b'T'), (13, b':'), (16, b':'), (22, b':')] {
        assert_eq!(bytes[i], expected, "{value} at {i}");
    }
    assert!(bytes[19] == b'+' || bytes[19] == b'-', "{value}");
    for (i, b) in bytes.iter().enumerate() {
        if ![4, 7, 10, 13, 16, 19, 22].contains(&i) {
            assert!(b.is_ascii_digit(), "{value} at {i}");
        }
    }
}

// =============================================================
// parse_local_input
// =============================================================

#[test]
fn parses_minutes_precision_input() {
    let naive = parse_local_input("2025-03-10T14:05").unwrap();
    assert_eq!(naive.to_string(), "2025-03-10 14:05:00");
}

#[test]
fn parses_seconds_precision_input() {
    let naive = parse_local_input(" 2025-03-10T14:05:09 ").unwrap();
    assert_eq!(naive.to_string(), "2025-03-10 14:05:09");
}

#[test]
fn blank_input_is_empty_error() {
    assert_eq!(parse_local_input("   "), Err(TimestampError::Empty));
}

#[test]
fn garbage_input_is_invalid() {
    assert_eq!(
        parse_local_input("10/03/2025 14:00"),
        Err(TimestampError::Invalid("10/03/2025 14:00".to_owned()))
    );
    assert!(parse_local_input("2025-02-30T10:00").is_err());
}

// =============================================================
// to_rfc3339_in
// =============================================================

#[test]
fn utc_zone_has_zero_offset() {
    assert_eq!(to_rfc3339_in("2025-03-10T14:05", &UTC).unwrap(), "2025-03-10T14:05:00+00:00");
}

#[test]
fn seconds_are_preserved() {
    assert_eq!(
        to_rfc3339_in("2025-07-01T08:00:30", &Sao_Paulo).unwrap(),
        "2025-07-01T08:00:30-03:00"
    );
}

#[test]
fn same_wall_time_across_us_dst_start_changes_offset() {
    let before = to_rfc3339_in("2024-03-09T12:00", &New_York).unwrap();
    let after = to_rfc3339_in("2024-03-11T12:00", &New_York).unwrap();

    assert_eq!(before, "2024-03-09T12:00:00-05:00");
    assert_eq!(after, "2024-03-11T12:00:00-04:00");
    assert_rfc3339_shape(&before);
    assert_rfc3339_shape(&after);
    assert_eq!(before[..19].replace("03-09", "03-11"), after[..19]);
}

#[test]
fn same_wall_time_across_brazil_dst_start_changes_offset() {
    // Brazil last observed DST starting 2018-11-04.
    let before = to_rfc3339_in("2018-11-03T09:00", &Sao_Paulo).unwrap();
    let after = to_rfc3339_in("2018-11-05T09:00", &Sao_Paulo).unwrap();
    assert_eq!(before, "2018-11-03T09:00:00-03:00");
    assert_eq!(after, "2018-11-05T09:00:00-02:00");
}

#[test]
fn ambiguous_time_resolves_to_earlier_instant() {
    assert_eq!(
        to_rfc3339_in("2024-11-03T01:30", &New_York).unwrap(),
        "2024-11-03T01:30:00-04:00"
    );
}

#[test]
fn gap_time_moves_forward_by_gap_length() {
    assert_eq!(
        to_rfc3339_in("2024-03-10T02:30", &New_York).unwrap(),
        "2024-03-10T03:30:00-04:00"
    );
}

#[test]
fn local_conversion_has_rfc3339_shape() {
    let value = to_rfc3339_local("2025-06-15T10:00").unwrap();
    assert_rfc3339_shape(&value);
    assert!(value.starts_with("2025-06-15T10:00:00"));
}

#[test]
fn conversion_propagates_parse_errors() {
    assert_eq!(to_rfc3339_in("", &UTC), Err(TimestampError::Empty));
}

// =============================================================
// range_to_rfc3339_in
// =============================================================

#[test]
fn range_converts_both_ends() {
    let (start, end) = range_to_rfc3339_in("2025-06-02T09:00", "2025-06-02T09:50", &Sao_Paulo).unwrap();
    assert_eq!(start, "2025-06-02T09:00:00-03:00");
    assert_eq!(end, "2025-06-02T09:50:00-03:00");
}

#[test]
fn range_requires_both_ends() {
    assert_eq!(range_to_rfc3339_in("", "2025-06-02T09:50", &UTC), Err(RangeError::Missing));
    assert_eq!(range_to_rfc3339_in("2025-06-02T09:00", "  ", &UTC), Err(RangeError::Missing));
}

#[test]
fn range_rejects_end_not_after_start() {
    assert_eq!(
        range_to_rfc3339_in("2025-06-02T10:00", "2025-06-02T10:00", &UTC),
        Err(RangeError::EndNotAfterStart)
    );
    assert_eq!(
        range_to_rfc3339_in("2025-06-02T10:00", "2025-06-02T09:00", &UTC),
        Err(RangeError::EndNotAfterStart)
    );
}

#[test]
fn range_reports_malformed_input() {
    let err = range_to_rfc3339_in("amanhã", "2025-06-02T09:00", &UTC).unwrap_err();
    assert_eq!(err, RangeError::Timestamp(TimestampError::Invalid("amanhã".to_owned())));
}

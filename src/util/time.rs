//! Local wall-clock form input → RFC 3339 timestamps.
//!
//! `<input type="datetime-local">` yields `YYYY-MM-DDTHH:MM` with no zone.
//! The backend and Google Calendar want an explicit offset, so the input is
//! resolved against the runtime's timezone rules *for that date*: the same
//! wall-clock time can serialize with different offsets on either side of a
//! DST change.
//!
//! Resolution rules match what browsers do with `new Date(local)`:
//! ambiguous times (clocks going back) pick the earlier instant, and times
//! inside a spring-forward gap are pushed forward by the gap length.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

use std::fmt::Display;

use chrono::{Local, NaiveDateTime, Offset, TimeDelta, TimeZone};

const INPUT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("informe data e hora")]
    Empty,
    #[error("data e hora inválidas: {0}")]
    Invalid(String),
    #[error("horário fora do fuso local: {0}")]
    Unresolvable(String),
}

/// Parse a `datetime-local` value (with or without seconds).
///
/// # Errors
///
/// [`TimestampError::Empty`] for blank input, [`TimestampError::Invalid`]
/// when neither accepted format matches.
pub fn parse_local_input(input: &str) -> Result<NaiveDateTime, TimestampError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::Empty);
    }
    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| TimestampError::Invalid(trimmed.to_owned()))
}

/// Convert form input to RFC 3339 using the runtime's local timezone.
///
/// # Errors
///
/// See [`to_rfc3339_in`].
pub fn to_rfc3339_local(input: &str) -> Result<String, TimestampError> {
    to_rfc3339_in(input, &Local)
}

/// Convert form input to `YYYY-MM-DDTHH:MM:SS±HH:MM` in `tz`.
///
/// # Errors
///
/// Propagates parse errors; [`TimestampError::Unresolvable`] if the wall
/// time cannot be mapped even after gap adjustment.
pub fn to_rfc3339_in<Tz>(input: &str, tz: &Tz) -> Result<String, TimestampError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let naive = parse_local_input(input)?;
    let resolved = match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => dt,
        None => skip_gap(naive, tz).ok_or_else(|| TimestampError::Unresolvable(naive.to_string()))?,
    };
    Ok(resolved.format(OUTPUT_FORMAT).to_string())
}

/// Map a wall time inside a spring-forward gap using the pre-gap offset.
fn skip_gap<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<chrono::DateTime<Tz>> {
    let before = naive.checked_sub_signed(TimeDelta::days(1))?;
    let offset = tz.from_local_datetime(&before).earliest()?.offset().fix();
    let utc = naive.checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))?;
    Some(tz.from_utc_datetime(&utc))
}

/// Why a start/end pair from a booking or event form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Informe início e fim.")]
    Missing,
    #[error("{0}")]
    Timestamp(#[from] TimestampError),
    #[error("O fim deve ser depois do início.")]
    EndNotAfterStart,
}

/// Validate a `datetime-local` start/end pair and convert both in `tz`.
///
/// Ordering is checked on wall-clock values, before zone resolution.
///
/// # Errors
///
/// [`RangeError::Missing`] if either side is blank, then parse errors, then
/// [`RangeError::EndNotAfterStart`].
pub fn range_to_rfc3339_in<Tz>(start: &str, end: &str, tz: &Tz) -> Result<(String, String), RangeError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if start.trim().is_empty() || end.trim().is_empty() {
        return Err(RangeError::Missing);
    }
    if parse_local_input(end)? <= parse_local_input(start)? {
        return Err(RangeError::EndNotAfterStart);
    }
    Ok((to_rfc3339_in(start, tz)?, to_rfc3339_in(end, tz)?))
}

/// [`range_to_rfc3339_in`] against the runtime's local zone.
///
/// # Errors
///
/// See [`range_to_rfc3339_in`].
pub fn range_to_rfc3339_local(start: &str, end: &str) -> Result<(String, String), RangeError> {
    range_to_rfc3339_in(start, end, &Local)
}

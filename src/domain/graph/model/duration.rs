//! Prometheus-style duration strings ("10m", "1h30m", "2w")

use chrono::Duration;
use serde::Serializer;
use thiserror::Error;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;
const MS_PER_YEAR: i64 = 365 * MS_PER_DAY;

/// Units in the only order they may appear. The flag marks units that are
/// rendered only when they divide the value exactly.
const UNITS: [(&str, i64, bool); 7] = [
    ("y", MS_PER_YEAR, true),
    ("w", MS_PER_WEEK, true),
    ("d", MS_PER_DAY, false),
    ("h", MS_PER_HOUR, false),
    ("m", MS_PER_MINUTE, false),
    ("s", MS_PER_SECOND, false),
    ("ms", 1, false),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("empty duration string")]
    Empty,

    #[error("not a valid duration string: {0:?}")]
    Invalid(String),

    #[error("duration out of range: {0:?}")]
    Overflow(String),
}

/// Parse a duration such as `90s`, `1h30m` or `0`.
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    if input.is_empty() {
        return Err(DurationParseError::Empty);
    }
    if input == "0" {
        return Ok(Duration::zero());
    }

    let invalid = || DurationParseError::Invalid(input.to_string());
    let bytes = input.as_bytes();
    let mut pos = 0;
    let mut total_ms: i64 = 0;
    // index into UNITS of the last unit seen; units must strictly descend
    let mut last_unit: Option<usize> = None;

    while pos < bytes.len() {
        let digits_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == digits_start {
            return Err(invalid());
        }
        let value: i64 = input[digits_start..pos]
            .parse()
            .map_err(|_| DurationParseError::Overflow(input.to_string()))?;

        let unit_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        let unit = &input[unit_start..pos];
        let unit_idx = UNITS
            .iter()
            .position(|(name, _, _)| *name == unit)
            .ok_or_else(invalid)?;

        if last_unit.is_some_and(|last| unit_idx <= last) {
            return Err(invalid());
        }
        last_unit = Some(unit_idx);

        total_ms = value
            .checked_mul(UNITS[unit_idx].1)
            .and_then(|ms| total_ms.checked_add(ms))
            .ok_or_else(|| DurationParseError::Overflow(input.to_string()))?;
    }

    Duration::try_milliseconds(total_ms).ok_or_else(|| DurationParseError::Overflow(input.to_string()))
}

/// Render a duration in the grammar accepted by [`parse_duration`].
pub fn format_duration(duration: Duration) -> String {
    let mut ms = duration.num_milliseconds();
    if ms == 0 {
        return "0s".to_string();
    }

    let mut out = String::new();
    if ms < 0 {
        out.push('-');
        ms = ms.saturating_abs();
    }

    for (name, unit_ms, exact) in UNITS {
        if exact && ms % unit_ms != 0 {
            continue;
        }
        let count = ms / unit_ms;
        if count > 0 {
            out.push_str(&count.to_string());
            out.push_str(name);
            ms -= count * unit_ms;
        }
    }

    out
}

/// serde helper: emit a duration as whole seconds.
pub fn serialize_as_seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_seconds())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("10m").unwrap(), Duration::minutes(10));
        assert_eq!(parse_duration("90s").unwrap(), Duration::seconds(90));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::milliseconds(250));
        assert_eq!(parse_duration("2d").unwrap(), Duration::days(2));
        assert_eq!(parse_duration("1w").unwrap(), Duration::weeks(1));
        assert_eq!(parse_duration("1y").unwrap(), Duration::days(365));
        assert_eq!(parse_duration("0").unwrap(), Duration::zero());
    }

    #[test]
    fn parses_compound_durations() {
        assert_eq!(
            parse_duration("1h30m").unwrap(),
            Duration::hours(1) + Duration::minutes(30)
        );
        assert_eq!(
            parse_duration("1m30s500ms").unwrap(),
            Duration::milliseconds(90_500)
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "m", "10", "10x", "-5m", "1.5h", "30m1h", "1m1m", " 5m", "5m "] {
            assert!(parse_duration(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn rejects_overflow() {
        assert!(matches!(
            parse_duration("99999999999999999999y"),
            Err(DurationParseError::Overflow(_))
        ));
    }

    #[test]
    fn formats_like_it_parses() {
        assert_eq!(format_duration(Duration::minutes(10)), "10m");
        assert_eq!(format_duration(Duration::minutes(90)), "1h30m");
        assert_eq!(format_duration(Duration::days(8)), "8d");
        assert_eq!(format_duration(Duration::days(14)), "2w");
        assert_eq!(format_duration(Duration::zero()), "0s");
        assert_eq!(format_duration(Duration::seconds(-300)), "-5m");
    }

    #[test]
    fn reparsing_a_rendered_duration_is_stable() {
        for input in ["10m", "1h30m", "8d", "2w", "1y", "45s", "1m30s500ms", "3d4h"] {
            let parsed = parse_duration(input).unwrap();
            let reparsed = parse_duration(&format_duration(parsed)).unwrap();
            assert_eq!(parsed, reparsed, "{input}");
        }
    }
}

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::utils::error::{QuireError, QuireResult};

/// Format of the `PubTime` field handed to templates
pub const PUB_TIME_FORMAT: &str = "%Y-%m-%d";

/// Format of the `ModTime` field handed to templates
pub const MOD_TIME_FORMAT: &str = "%H:%M";

/// Parse the `Date` front matter field. The format is chosen by the
/// length of the value:
///
/// | length | format |
/// |--------|--------|
/// | 10     | `2006-01-02` |
/// | 13, 14 | `2006-01-02 15h` (one or two hour digits) |
/// | 15, 16 | `2006-01-02 15:04` (one or two hour digits) |
/// | 25     | RFC 3339 with a numeric offset |
///
/// Month, day and minutes are two digits; the hour may be one. Values
/// without an offset are taken as UTC.
pub fn parse_pub_date(value: &str) -> QuireResult<DateTime<FixedOffset>> {
    let len = value.chars().count();
    if (10..=25).contains(&len) && !has_date_prefix(value) {
        return Err(QuireError::DateParse(format!("cannot parse date {:?}", value)));
    }

    let parsed = match len {
        10 => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(utc),
        13 | 14 => parse_date_hour(value).map(utc),
        15 | 16 if has_minutes_suffix(value) => NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
            .ok()
            .map(utc),
        15 | 16 => None,
        25 if value.as_bytes()[10] == b'T' => DateTime::parse_from_rfc3339(value).ok(),
        25 => None,
        len => {
            return Err(QuireError::DateParse(format!(
                "unsupported date length {} in {:?}", len, value
            )))
        }
    };

    parsed.ok_or_else(|| QuireError::DateParse(format!("cannot parse date {:?}", value)))
}

/// `2006-01-02` at the start of the value
fn has_date_prefix(value: &str) -> bool {
    match value.as_bytes().get(..10) {
        Some(date) => date.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        }),
        None => false,
    }
}

/// `:04` at the end of the value
fn has_minutes_suffix(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() >= 3 && bytes[bytes.len() - 3] == b':' && bytes[bytes.len() - 2..].iter().all(u8::is_ascii_digit)
}

/// `2006-01-02 15h`
fn parse_date_hour(value: &str) -> Option<NaiveDateTime> {
    let (date, hour) = value.split_once(' ')?;
    let hour = hour.strip_suffix('h')?;
    if hour.is_empty() || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(hour.parse().ok()?, 0, 0)
}

fn utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&naive).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_supported_lengths_round_trip() {
        let test_cases = vec![
            ("2023-06-01", "%Y-%m-%d"),
            ("2023-06-01 9h", "%Y-%m-%d %-Hh"),
            ("2023-06-01 09h", "%Y-%m-%d %Hh"),
            ("2023-06-01 9:05", "%Y-%m-%d %-H:%M"),
            ("2023-06-01 21:05", "%Y-%m-%d %H:%M"),
            ("2023-06-01T21:05:09+02:00", "%Y-%m-%dT%H:%M:%S%:z"),
        ];

        for (input, pattern) in test_cases {
            let parsed = parse_pub_date(input).unwrap();
            assert_eq!(parsed.format(pattern).to_string(), input);
            assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2023, 6, 1));
        }
    }

    #[test]
    fn test_zone_less_dates_are_utc() {
        let parsed = parse_pub_date("2023-06-01 21:05").unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert_eq!(parsed.hour(), 21);
    }

    #[test]
    fn test_offset_is_kept() {
        let parsed = parse_pub_date("2023-01-01T00:30:00+02:00").unwrap();
        assert_eq!(parsed.format(PUB_TIME_FORMAT).to_string(), "2023-01-01");
    }

    #[test]
    fn test_unsupported_lengths() {
        for input in ["2023-6-1", "2023-06-01T10:00:00Z", "2023-06-01 10:00:00", "yesterday"] {
            let err = parse_pub_date(input).unwrap_err();
            assert!(matches!(err, QuireError::DateParse(_)), "{}", input);
        }
    }

    #[test]
    fn test_malformed_supported_lengths() {
        for input in ["2023-13-01", "2023-06-01 25h", "2023-06-01 xxh", "2023-06-01 9-05"] {
            assert!(parse_pub_date(input).is_err(), "{}", input);
        }
    }

    #[test]
    fn test_single_digit_fields_rejected() {
        let test_cases = vec![
            "2023-6-01 09h",
            "2023-06-1 09h",
            "2023-6-01 09:05",
            "2023-06-01 21:5",
            "2023-6-1 9:05",
            "2023-06-01 21:05:09+02:00",
            "2023-06-01T21:05:09 02:00",
        ];

        for input in test_cases {
            let err = parse_pub_date(input).unwrap_err();
            assert!(matches!(err, QuireError::DateParse(_)), "{}", input);
        }
    }
}

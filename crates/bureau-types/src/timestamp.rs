//! Bureau log timestamps: `YYYY/MM/DD HH:MM:SS:mmm`.
//!
//! Parsing is positional. Field shape (digits, separators, length) is
//! checked here; calendar validity is left to `chrono` when the date is
//! built, so `2024/13/01 ...` fails at construction rather than earlier.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::TimestampError;

/// Length in bytes of a well-formed timestamp.
pub const TIMESTAMP_LEN: usize = 23;

/// `(start, end)` byte ranges of year, month, day, hour, minute, second, millis.
const FIELDS: [(usize, usize); 7] = [
    (0, 4),
    (5, 7),
    (8, 10),
    (11, 13),
    (14, 16),
    (17, 19),
    (20, 23),
];

/// `(index, expected byte)` for every separator between fields.
const SEPARATORS: [(usize, u8); 6] = [
    (4, b'/'),
    (7, b'/'),
    (10, b' '),
    (13, b':'),
    (16, b':'),
    (19, b':'),
];

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Parse a bureau log timestamp into an absolute (zone-less) time.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, TimestampError> {
    let malformed = || TimestampError::Malformed {
        text: text.to_string(),
    };

    let bytes = text.as_bytes();
    if bytes.len() != TIMESTAMP_LEN {
        return Err(malformed());
    }
    if SEPARATORS.iter().any(|&(i, sep)| bytes[i] != sep) {
        return Err(malformed());
    }

    let mut values = [0u32; 7];
    for (value, &(start, end)) in values.iter_mut().zip(FIELDS.iter()) {
        let field = &bytes[start..end];
        if !field.iter().all(u8::is_ascii_digit) {
            return Err(malformed());
        }
        *value = field
            .iter()
            .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0'));
    }
    let [year, month, day, hour, minute, second, millis] = values;

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|date| date.and_hms_milli_opt(hour, minute, second, millis))
        .ok_or_else(|| TimestampError::OutOfRange {
            text: text.to_string(),
        })
}

/// Render an elapsed time as a single coarse unit, truncating.
///
/// Days win over hours, hours over minutes, minutes over seconds. Units are
/// never combined. Negative deltas render as `0 seconds`.
pub fn describe_duration(delta: TimeDelta) -> String {
    let total = delta.num_seconds().max(0);
    let days = total / SECONDS_PER_DAY;
    let seconds = total % SECONDS_PER_DAY;

    if days > 0 {
        format!("{days} days")
    } else if seconds >= SECONDS_PER_HOUR {
        format!("{} hours", seconds / SECONDS_PER_HOUR)
    } else if seconds >= SECONDS_PER_MINUTE {
        format!("{} minutes", seconds / SECONDS_PER_MINUTE)
    } else {
        format!("{seconds} seconds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_every_field() {
        let t = parse_timestamp("2024/01/15 10:30:00:500").unwrap();
        assert_eq!(
            (t.year(), t.month(), t.day(), t.hour(), t.minute(), t.second()),
            (2024, 1, 15, 10, 30, 0)
        );
        assert_eq!(t.nanosecond() / 1_000_000, 500);
    }

    #[test]
    fn parsed_times_compare_chronologically() {
        let earlier = parse_timestamp("2024/01/15 10:30:00:500").unwrap();
        let later = parse_timestamp("2024/01/15 10:30:00:501").unwrap();
        assert!(earlier < later);
        assert_eq!((later - earlier).num_milliseconds(), 1);
    }

    #[test]
    fn rejects_bad_shape() {
        for text in [
            "",
            "2024/01/15 10:30:00",
            "2024-01-15 10:30:00:500",
            "2024/01/15T10:30:00:500",
            "2024/0a/15 10:30:00:500",
            "2024/01/15 10:30:00:5000",
            " 2024/01/15 10:30:00:500",
        ] {
            assert!(
                matches!(parse_timestamp(text), Err(TimestampError::Malformed { .. })),
                "expected Malformed for {text:?}"
            );
        }
    }

    #[test]
    fn calendar_errors_come_from_date_construction() {
        for text in [
            "2024/13/01 00:00:00:000",
            "2023/02/29 00:00:00:000",
            "2024/01/15 24:00:00:000",
        ] {
            assert_eq!(
                parse_timestamp(text),
                Err(TimestampError::OutOfRange {
                    text: text.to_string()
                })
            );
        }
        assert!(parse_timestamp("2024/02/29 23:59:59:999").is_ok());
    }

    #[test]
    fn duration_picks_one_coarse_unit() {
        assert_eq!(describe_duration(TimeDelta::seconds(3661)), "1 hours");
        assert_eq!(describe_duration(TimeDelta::seconds(3600)), "1 hours");
        assert_eq!(describe_duration(TimeDelta::seconds(5400)), "1 hours");
        assert_eq!(describe_duration(TimeDelta::seconds(125)), "2 minutes");
        assert_eq!(describe_duration(TimeDelta::seconds(60)), "1 minutes");
        assert_eq!(describe_duration(TimeDelta::seconds(45)), "45 seconds");
        assert_eq!(describe_duration(TimeDelta::days(2)), "2 days");
        assert_eq!(
            describe_duration(TimeDelta::days(1) + TimeDelta::hours(23)),
            "1 days"
        );
    }

    #[test]
    fn duration_truncates_sub_second_and_negative() {
        assert_eq!(describe_duration(TimeDelta::milliseconds(999)), "0 seconds");
        assert_eq!(describe_duration(TimeDelta::seconds(-30)), "0 seconds");
    }
}

//! Time utilities

use chrono::{DateTime, NaiveDate, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Parse a datetime string in ISO 8601 format
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Calendar day (UTC) a timestamp falls on
pub fn calendar_day(dt: DateTime<Utc>) -> NaiveDate {
    dt.date_naive()
}

/// `YYYY-MM-DD` stamp used in download file names
pub fn date_stamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Check if a datetime lies within an inclusive range
pub fn is_within(dt: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    dt >= start && dt <= end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime() {
        let dt = parse_datetime("2024-01-15T12:00:00Z");
        assert!(dt.is_some());

        let offset = parse_datetime("2024-01-15T14:00:00+02:00").unwrap();
        assert_eq!(offset, dt.unwrap());

        let invalid = parse_datetime("not a date");
        assert!(invalid.is_none());
    }

    #[test]
    fn test_date_stamp() {
        let dt = parse_datetime("2024-01-05T23:59:59Z").unwrap();
        assert_eq!(date_stamp(dt), "2024-01-05");
        assert_eq!(calendar_day(dt), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_is_within_inclusive() {
        let start = parse_datetime("2024-01-01T00:00:00Z").unwrap();
        let end = parse_datetime("2024-01-31T00:00:00Z").unwrap();
        assert!(is_within(start, start, end));
        assert!(is_within(end, start, end));
        assert!(!is_within(parse_datetime("2024-02-01T00:00:00Z").unwrap(), start, end));
    }
}

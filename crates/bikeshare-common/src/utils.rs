//! Date canonicalisation and display helpers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parses a day value into its canonical calendar date.
///
/// Accepts plain dates, naive date-times and RFC 3339 timestamps. Time of day
/// and offsets are dropped, so `2011-01-01`, `2011-01-01 00:00:00` and
/// `2011-01-01T18:30:00+02:00` all map to the same key.
pub fn canonical_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(day) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(day);
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Formats an optional statistic with two decimals; absent values show as zero.
pub fn format_stat(value: Option<f64>) -> String {
    format!("{:.2}", value.unwrap_or(0.0))
}

/// Formats a rental count the way the dashboard metrics print it.
pub fn format_units(count: u64) -> String {
    format!("{count} Unit")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_canonical_day_formats() {
        let expected = date(2011, 1, 1);
        assert_eq!(canonical_day("2011-01-01"), Some(expected));
        assert_eq!(canonical_day(" 2011-01-01 "), Some(expected));
        assert_eq!(canonical_day("2011-01-01 00:00:00"), Some(expected));
        assert_eq!(canonical_day("2011-01-01T23:59:59"), Some(expected));
        assert_eq!(canonical_day("2011-01-01 08:15"), Some(expected));
        assert_eq!(canonical_day("2011-01-01T18:30:00+02:00"), Some(expected));
    }

    #[test]
    fn test_canonical_day_rejects_garbage() {
        assert_eq!(canonical_day(""), None);
        assert_eq!(canonical_day("not a date"), None);
        assert_eq!(canonical_day("2011-13-01"), None);
        assert_eq!(canonical_day("01/01/2011"), None);
    }

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(Some(0.344_167)), "0.34");
        assert_eq!(format_stat(Some(5.0)), "5.00");
        assert_eq!(format_stat(None), "0.00");
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(0), "0 Unit");
        assert_eq!(format_units(3_292_679), "3292679 Unit");
    }
}

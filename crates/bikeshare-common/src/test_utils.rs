//! Test utilities and shared fixtures for the bikeshare workspace.
//!
//! Enabled for this crate's own tests and, through the `testing` feature, for
//! every other crate's unit and integration tests.

use chrono::NaiveDate;
use std::sync::Once;

use crate::types::DailyRecord;

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Shorthand for a calendar date in tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Record fixtures.
pub mod record_fixtures {
    use super::*;

    /// The two-day scenario used throughout the docs:
    /// 2024-01-01 (10 = 4 + 6, temp 5.0, wind 2.0) and
    /// 2024-01-02 (20 = 8 + 12, temp 7.0, wind 1.0).
    pub fn scenario_records() -> Vec<DailyRecord> {
        vec![
            DailyRecord::new(date(2024, 1, 1), 10, 4, 6, 5.0, 2.0),
            DailyRecord::new(date(2024, 1, 2), 20, 8, 12, 7.0, 1.0),
        ]
    }

    /// `count` consecutive one-per-day records starting at `start`, with
    /// consistent counts and deterministic covariates.
    pub fn sample_records(count: usize, start: NaiveDate) -> Vec<DailyRecord> {
        (0..count)
            .map(|i| {
                let casual = 100 + (i as u32 * 37) % 400;
                let registered = 1_000 + (i as u32 * 53) % 2_500;
                let step = i as f64;
                DailyRecord::new(
                    start + chrono::Duration::days(i as i64),
                    casual + registered,
                    casual,
                    registered,
                    0.2 + (step * 0.7).sin().abs() * 0.6,
                    0.05 + (step * 1.3).cos().abs() * 0.3,
                )
            })
            .collect()
    }

    /// Serialises records in the `day.csv` column layout.
    pub fn records_to_csv(records: &[DailyRecord]) -> String {
        let mut out = String::from(
            "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt\n",
        );
        for (i, record) in records.iter().enumerate() {
            out.push_str(&format!(
                "{},{},1,0,1,0,6,0,2,{},{},0.8,{},{},{},{}\n",
                i + 1,
                record.day.format("%Y-%m-%d"),
                record.temperature,
                record.temperature,
                record.wind_speed,
                record.casual_count,
                record.registered_count,
                record.rental_count,
            ));
        }
        out
    }

    /// Writes records to a temporary `day.csv` file.
    #[cfg(feature = "tempfile")]
    pub fn write_csv_fixture(records: &[DailyRecord]) -> tempfile::NamedTempFile {
        use std::io::Write;

        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("Failed to create temporary csv file");
        file.write_all(records_to_csv(records).as_bytes())
            .expect("Failed to write csv fixture");
        file.flush().expect("Failed to flush csv fixture");
        file
    }
}

/// Property-based testing strategies.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for a single consistent record on a day within 2011-2012.
    pub fn record_strategy() -> impl Strategy<Value = DailyRecord> {
        (0i64..731, 0u32..5_000, 0u32..10_000, -1.0f64..1.5, 0.0f64..1.0).prop_map(
            |(offset, casual, registered, temperature, wind_speed)| {
                DailyRecord::new(
                    date(2011, 1, 1) + chrono::Duration::days(offset),
                    casual + registered,
                    casual,
                    registered,
                    temperature,
                    wind_speed,
                )
            },
        )
    }

    /// Strategy for a table of records, possibly with several rows per day
    /// and in arbitrary order.
    pub fn records_strategy(max_len: usize) -> impl Strategy<Value = Vec<DailyRecord>> {
        proptest::collection::vec(record_strategy(), 0..max_len)
    }

    /// Strategy for a table with at most one row per day, in arbitrary order.
    pub fn unique_day_records_strategy(max_len: usize) -> impl Strategy<Value = Vec<DailyRecord>> {
        records_strategy(max_len).prop_map(|records| {
            let mut seen = std::collections::HashSet::new();
            records
                .into_iter()
                .filter(|record| seen.insert(record.day))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::record_fixtures::*;
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_sample_records_are_consecutive_and_consistent() {
        let records = sample_records(30, date(2011, 1, 1));
        assert_eq!(records.len(), 30);
        assert_eq!(records[29].day, date(2011, 1, 30));
        assert!(records.iter().all(DailyRecord::counts_consistent));
        assert!(records.windows(2).all(|w| w[0].day < w[1].day));
    }

    #[test]
    fn test_records_to_csv_layout() {
        let csv = records_to_csv(&scenario_records());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("instant,dteday,"));
        assert_eq!(lines[1], "1,2024-01-01,1,0,1,0,6,0,2,5,5,0.8,2,4,6,10");
    }
}

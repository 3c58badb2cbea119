//! Integration tests for loading and filtering the record store.

use bikeshare_common::test_utils::property_testing::*;
use bikeshare_common::test_utils::record_fixtures::*;
use bikeshare_common::test_utils::{date, init_test_logging};
use bikeshare_common::{BikeshareError, DateRange};
use bikeshare_data::{filter_records, RecordStore};
use chrono::Duration;
use proptest::prelude::*;

#[test]
fn test_store_from_csv_file() {
    init_test_logging();
    let records = sample_records(31, date(2011, 1, 1));
    let file = write_csv_fixture(&records);

    let store = RecordStore::from_csv_path(file.path()).unwrap();

    assert_eq!(store.len(), 31);
    assert_eq!(store.records(), records.as_slice());
    assert_eq!(
        store.bounds(),
        Some(DateRange::new(date(2011, 1, 1), date(2011, 1, 31)).unwrap())
    );
    assert_eq!(store.summary_check(), 0);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = RecordStore::from_csv_path("/nonexistent/bikeshare/day.csv").unwrap_err();
    assert!(matches!(err, BikeshareError::Io(_)));
}

#[test]
fn test_malformed_row_fails_whole_load() {
    let mut csv = records_to_csv(&sample_records(3, date(2011, 1, 1)));
    csv.push_str("4,2011-01-04,1,0,1,0,6,0,2,hot,0.3,0.8,0.1,10,20,30\n");

    let err = RecordStore::from_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, BikeshareError::MalformedRecord { line: 5, .. }));
}

#[test]
fn test_shared_store_is_readable_from_threads() {
    let store = RecordStore::from_records(sample_records(60, date(2011, 1, 1))).into_shared();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || {
                let start = date(2011, 1, 1) + Duration::days(i * 10);
                let range = DateRange::new(start, start + Duration::days(9)).unwrap();
                store.filter(&range).len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 10);
    }
}

proptest! {
    #[test]
    fn prop_filter_returns_exactly_the_range(
        records in records_strategy(60),
        from in 0i64..731,
        span in 0i64..120,
    ) {
        let start = date(2011, 1, 1) + Duration::days(from);
        let end = start + Duration::days(span);

        let selected = filter_records(&records, start, end).unwrap();

        let expected: Vec<_> = records
            .iter()
            .filter(|r| start <= r.day && r.day <= end)
            .cloned()
            .collect();
        prop_assert_eq!(selected, expected);
    }

    #[test]
    fn prop_reversed_range_always_rejected(
        records in records_strategy(20),
        from in 1i64..731,
        back in 1i64..30,
    ) {
        let start = date(2011, 1, 1) + Duration::days(from);
        let end = start - Duration::days(back);

        let result = filter_records(&records, start, end);
        prop_assert!(
            matches!(result, Err(BikeshareError::InvalidRange { .. })),
            "expected InvalidRange"
        );
    }

    #[test]
    fn prop_single_day_selects_one_day_only(
        records in records_strategy(60),
        offset in 0i64..731,
    ) {
        let day = date(2011, 1, 1) + Duration::days(offset);
        let selected = filter_records(&records, day, day).unwrap();

        prop_assert!(selected.iter().all(|r| r.day == day));
        prop_assert_eq!(selected.len(), records.iter().filter(|r| r.day == day).count());
    }

    #[test]
    fn prop_resolved_range_stays_inside_bounds(records in records_strategy(40)) {
        prop_assume!(!records.is_empty());
        let store = RecordStore::from_records(records);
        let bounds = store.bounds().unwrap();

        let range = store.resolve_range(None, None).unwrap();
        prop_assert_eq!(range, bounds);
        prop_assert_eq!(store.filter(&range).len(), store.len());
    }
}

//! The immutable record store.
//!
//! A store is built once at startup and only ever read afterwards. Share it
//! through [`SharedStore`]; there is no interior mutability to guard.

use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use bikeshare_common::{BikeshareError, DailyRecord, DateRange, Result};

use crate::filter::filter_in_range;
use crate::loader::{load_csv_path, load_csv_reader};

/// Read-only handle to a loaded store.
pub type SharedStore = Arc<RecordStore>;

/// All raw records of the dataset together with their day bounds.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<DailyRecord>,
    bounds: Option<DateRange>,
}

impl RecordStore {
    /// Builds a store from records already in memory.
    pub fn from_records(records: Vec<DailyRecord>) -> Self {
        let bounds = compute_bounds(&records);
        let store = Self { records, bounds };

        let inconsistent = store.summary_check();
        if inconsistent > 0 {
            warn!(
                "{} of {} records have rental_count != casual_count + registered_count",
                inconsistent,
                store.len()
            );
        }
        store
    }

    /// Loads a store from a `day.csv` style file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self::from_records(load_csv_path(path)?);
        match store.bounds {
            Some(bounds) => info!("Record store covers {}", bounds),
            None => warn!("Record store is empty"),
        }
        Ok(store)
    }

    /// Loads a store from CSV text with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_records(load_csv_reader(reader)?))
    }

    /// Wraps the store for sharing across tasks.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(self)
    }

    /// Every record, in load order.
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Number of raw records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest day present, `None` for an empty store.
    pub fn bounds(&self) -> Option<DateRange> {
        self.bounds
    }

    /// Number of records whose total differs from casual plus registered.
    pub fn summary_check(&self) -> usize {
        self.records
            .iter()
            .filter(|record| !record.counts_consistent())
            .count()
    }

    /// Turns an optional user selection into a concrete range.
    ///
    /// Missing ends default to the dataset bounds. Either end falling
    /// outside the bounds is `OutOfBounds`; a reversed selection is
    /// `InvalidRange`.
    pub fn resolve_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DateRange> {
        let available = self
            .bounds
            .ok_or_else(|| BikeshareError::empty("the record store holds no records"))?;

        let start = start.unwrap_or_else(|| available.start());
        let end = end.unwrap_or_else(|| available.end());

        let range = DateRange::new(start, end)?;

        for requested in [start, end] {
            if !available.contains(requested) {
                return Err(BikeshareError::OutOfBounds {
                    requested,
                    available,
                });
            }
        }

        Ok(range)
    }

    /// Records whose day lies in `range`, in load order.
    pub fn filter(&self, range: &DateRange) -> Vec<DailyRecord> {
        filter_in_range(&self.records, range)
    }
}

fn compute_bounds(records: &[DailyRecord]) -> Option<DateRange> {
    let first = records.iter().map(|r| r.day).min()?;
    let last = records.iter().map(|r| r.day).max()?;
    Some(DateRange::new(first, last).unwrap_or_else(|_| DateRange::single_day(first)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_common::test_utils::{date, record_fixtures::*};

    #[test]
    fn test_bounds_from_unordered_records() {
        let mut records = sample_records(5, date(2011, 3, 1));
        records.swap(0, 4);
        let store = RecordStore::from_records(records);

        let bounds = store.bounds().unwrap();
        assert_eq!(bounds.start(), date(2011, 3, 1));
        assert_eq!(bounds.end(), date(2011, 3, 5));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::from_records(Vec::new());
        assert!(store.is_empty());
        assert!(store.bounds().is_none());

        let err = store.resolve_range(None, None).unwrap_err();
        assert!(matches!(err, BikeshareError::EmptyResult { .. }));
    }

    #[test]
    fn test_resolve_defaults_to_bounds() {
        let store = RecordStore::from_records(scenario_records());
        let range = store.resolve_range(None, None).unwrap();
        assert_eq!(range.start(), date(2024, 1, 1));
        assert_eq!(range.end(), date(2024, 1, 2));

        let range = store.resolve_range(Some(date(2024, 1, 2)), None).unwrap();
        assert_eq!(range, DateRange::single_day(date(2024, 1, 2)));
    }

    #[test]
    fn test_resolve_rejects_reversed() {
        let store = RecordStore::from_records(scenario_records());
        let err = store
            .resolve_range(Some(date(2024, 1, 2)), Some(date(2024, 1, 1)))
            .unwrap_err();
        assert!(matches!(err, BikeshareError::InvalidRange { .. }));
    }

    #[test]
    fn test_resolve_rejects_out_of_bounds() {
        let store = RecordStore::from_records(scenario_records());
        let err = store
            .resolve_range(Some(date(2023, 12, 31)), Some(date(2024, 1, 2)))
            .unwrap_err();
        match err {
            BikeshareError::OutOfBounds {
                requested,
                available,
            } => {
                assert_eq!(requested, date(2023, 12, 31));
                assert_eq!(available.end(), date(2024, 1, 2));
            }
            other => panic!("expected OutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn test_summary_check_counts_inconsistent_rows() {
        let mut records = scenario_records();
        records.push(DailyRecord::new(date(2024, 1, 3), 99, 4, 6, 5.0, 2.0));
        let store = RecordStore::from_records(records);
        assert_eq!(store.summary_check(), 1);
    }

    #[test]
    fn test_reader_and_filter() {
        let csv = records_to_csv(&sample_records(14, date(2012, 5, 1)));
        let store = RecordStore::from_reader(csv.as_bytes()).unwrap();

        let week = DateRange::new(date(2012, 5, 3), date(2012, 5, 9)).unwrap();
        let selected = store.filter(&week);
        assert_eq!(selected.len(), 7);
        assert!(selected.iter().all(|r| week.contains(r.day)));
    }
}

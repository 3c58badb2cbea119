//! Filter, aggregate and merge composed into one request

use bikeshare_common::{DailyRecord, DateRange, Result};
use bikeshare_data::{filter_in_range, RecordStore};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::aggregator::{DailyAggregator, ExtremesAggregator, UsageTotalsAggregator};
use crate::merger::merge;
use crate::UnifiedDailySummary;

/// The unified table computed for one range. Owned by the caller and
/// dropped once presented.
///
/// `range` is `None` only for a table drawn from a dataset without records
/// when no explicit window was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummaryTable {
    range: Option<DateRange>,
    rows: Vec<UnifiedDailySummary>,
}

impl DailySummaryTable {
    pub fn new(range: DateRange, rows: Vec<UnifiedDailySummary>) -> Self {
        Self {
            range: Some(range),
            rows,
        }
    }

    /// An empty table, the neutral view for a failed or empty selection.
    pub fn empty(range: DateRange) -> Self {
        Self::new(range, Vec::new())
    }

    /// An empty table with no range, for a dataset holding no records.
    pub fn unbounded() -> Self {
        Self {
            range: None,
            rows: Vec::new(),
        }
    }

    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn rows(&self) -> &[UnifiedDailySummary] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Days present in the table, ascending.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|row| row.day).collect()
    }

    /// Writes the table as CSV with a header row. Absent extremes are empty
    /// fields.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the table as CSV to `path`, replacing any existing file.
    pub fn write_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_csv(file)?;
        info!("Exported {} rows to {}", self.len(), path.as_ref().display());
        Ok(())
    }

    /// Serialises the table as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the three aggregations over one filtered input and merges them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DailySummaryPipeline {
    usage: UsageTotalsAggregator,
}

impl DailySummaryPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the unified table of `range` over the store.
    ///
    /// A range without records yields an empty table, not an error.
    #[instrument(skip_all, fields(range = %range))]
    pub fn run(&self, store: &RecordStore, range: DateRange) -> Result<DailySummaryTable> {
        let filtered = store.filter(&range);
        let table = self.summarise(&filtered, range);
        info!(
            "Computed {} daily rows from {} records",
            table.len(),
            filtered.len()
        );
        Ok(table)
    }

    /// Resolves an optional selection against the store bounds, then runs.
    ///
    /// A store without records has no bounds to check against; the result is
    /// an empty table over whatever window was requested. A reversed window
    /// is still `InvalidRange`.
    pub fn run_selection(
        &self,
        store: &RecordStore,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DailySummaryTable> {
        if store.is_empty() {
            warn!("Record store is empty, returning an empty table");
            return Ok(match (start, end) {
                (Some(start), Some(end)) => DailySummaryTable::empty(DateRange::new(start, end)?),
                (Some(day), None) | (None, Some(day)) => {
                    DailySummaryTable::empty(DateRange::single_day(day))
                }
                (None, None) => DailySummaryTable::unbounded(),
            });
        }

        let range = store.resolve_range(start, end)?;
        self.run(store, range)
    }

    /// Same as [`run`](Self::run) over a plain record slice.
    pub fn run_records(&self, records: &[DailyRecord], range: DateRange) -> DailySummaryTable {
        self.summarise(&filter_in_range(records, &range), range)
    }

    fn summarise(&self, filtered: &[DailyRecord], range: DateRange) -> DailySummaryTable {
        // all three passes read the same filtered slice
        let usage = self.usage.aggregate(filtered);
        let temperature = ExtremesAggregator::temperature().aggregate(filtered);
        let wind = ExtremesAggregator::wind_speed().aggregate(filtered);

        DailySummaryTable::new(range, merge(&usage, &temperature, &wind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_common::test_utils::{date, record_fixtures::*};
    use bikeshare_common::BikeshareError;

    fn scenario_store() -> RecordStore {
        RecordStore::from_records(scenario_records())
    }

    #[test]
    fn test_full_range_scenario() {
        let store = scenario_store();
        let range = store.resolve_range(None, None).unwrap();
        let table = DailySummaryPipeline::new().run(&store, range).unwrap();

        assert_eq!(table.days(), vec![date(2024, 1, 1), date(2024, 1, 2)]);
        let total: u64 = table.rows().iter().map(|row| row.total_usage).sum();
        assert_eq!(total, 30);
    }

    #[test]
    fn test_range_without_records_is_empty_table() {
        let mut records = scenario_records();
        records.push(DailyRecord::new(date(2024, 1, 10), 5, 2, 3, 1.0, 1.0));
        let store = RecordStore::from_records(records);

        let range = DateRange::new(date(2024, 1, 4), date(2024, 1, 8)).unwrap();
        let table = DailySummaryPipeline::new().run(&store, range).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.range(), Some(range));
    }

    #[test]
    fn test_empty_store_gives_empty_table() {
        let store = RecordStore::from_records(Vec::new());
        let pipeline = DailySummaryPipeline::new();

        let table = pipeline.run_selection(&store, None, None).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.range(), None);

        let table = pipeline
            .run_selection(&store, Some(date(2024, 1, 1)), Some(date(2024, 1, 3)))
            .unwrap();
        assert!(table.is_empty());
        assert_eq!(table.range().map(|r| r.end()), Some(date(2024, 1, 3)));

        let reversed = pipeline
            .run_selection(&store, Some(date(2024, 1, 3)), Some(date(2024, 1, 1)))
            .unwrap_err();
        assert!(matches!(reversed, BikeshareError::InvalidRange { .. }));
    }

    #[test]
    fn test_selection_errors_propagate() {
        let store = scenario_store();
        let pipeline = DailySummaryPipeline::new();

        let reversed = pipeline
            .run_selection(&store, Some(date(2024, 1, 2)), Some(date(2024, 1, 1)))
            .unwrap_err();
        assert!(matches!(reversed, BikeshareError::InvalidRange { .. }));

        let outside = pipeline
            .run_selection(&store, Some(date(2023, 6, 1)), None)
            .unwrap_err();
        assert!(matches!(outside, BikeshareError::OutOfBounds { .. }));
    }

    #[test]
    fn test_write_csv() {
        let records = scenario_records();
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 2)).unwrap();
        let table = DailySummaryPipeline::new().run_records(&records, range);

        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "day,total_usage,total_casual,total_registered,average_temperature,average_windspeed,minimum_temp,maximum_temp,minimum_wind,maximum_wind"
        );
        assert_eq!(lines[1], "2024-01-01,10,4,6,5.0,2.0,5.0,5.0,2.0,2.0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_json_carries_range_and_rows() {
        let records = scenario_records();
        let range = DateRange::single_day(date(2024, 1, 2));
        let table = DailySummaryPipeline::new().run_records(&records, range);

        let json: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();
        assert_eq!(json["range"]["start"], "2024-01-02");
        assert_eq!(json["rows"].as_array().unwrap().len(), 1);
        assert_eq!(json["rows"][0]["total_usage"], 20);
    }
}

//! Date-range selection over raw records.

use chrono::NaiveDate;
use tracing::{debug, instrument};

use bikeshare_common::{DailyRecord, DateRange, Result};

/// Returns the records whose day lies in `start..=end`, in input order.
///
/// Fails with `InvalidRange` when `start > end`. A range that matches nothing
/// is not an error; the result is simply empty.
pub fn filter_records(
    records: &[DailyRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DailyRecord>> {
    let range = DateRange::new(start, end)?;
    Ok(filter_in_range(records, &range))
}

/// Same as [`filter_records`] for an already validated range.
#[instrument(skip(records), fields(records = records.len()))]
pub fn filter_in_range(records: &[DailyRecord], range: &DateRange) -> Vec<DailyRecord> {
    let selected: Vec<DailyRecord> = records
        .iter()
        .filter(|record| range.contains(record.day))
        .cloned()
        .collect();

    debug!(
        "Selected {} of {} records for {}",
        selected.len(),
        records.len(),
        range
    );
    selected
}

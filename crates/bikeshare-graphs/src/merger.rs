//! Left join of the usage table with the two extremes tables

use std::collections::HashMap;
use tracing::{debug, instrument, warn};

use chrono::NaiveDate;

use crate::{DailyExtremes, DailyUsageSummary, UnifiedDailySummary};

/// Joins `usage` with `temp_extremes`, then with `wind_extremes`, on `day`.
///
/// Every usage row appears exactly once and in the same order. Extremes with
/// no usage row are dropped; usage rows with no extremes row keep `None`.
#[instrument(skip_all, fields(days = usage.len()))]
pub fn merge(
    usage: &[DailyUsageSummary],
    temp_extremes: &[DailyExtremes],
    wind_extremes: &[DailyExtremes],
) -> Vec<UnifiedDailySummary> {
    let mut merged: Vec<UnifiedDailySummary> =
        usage.iter().map(UnifiedDailySummary::from_usage).collect();

    let unmatched_temp = left_join(&mut merged, temp_extremes, |row, extremes| {
        row.minimum_temp = Some(extremes.minimum);
        row.maximum_temp = Some(extremes.maximum);
    });
    let unmatched_wind = left_join(&mut merged, wind_extremes, |row, extremes| {
        row.minimum_wind = Some(extremes.minimum);
        row.maximum_wind = Some(extremes.maximum);
    });

    if unmatched_temp + unmatched_wind > 0 {
        warn!(
            "{} usage days had no temperature extremes and {} had no windspeed extremes",
            unmatched_temp, unmatched_wind
        );
    }

    debug!("Merged {} daily summary rows", merged.len());
    merged
}

/// Applies the matching right-hand row to each left row, returning how many
/// left rows found no match.
fn left_join<F>(left: &mut [UnifiedDailySummary], right: &[DailyExtremes], apply: F) -> usize
where
    F: Fn(&mut UnifiedDailySummary, &DailyExtremes),
{
    let by_day: HashMap<NaiveDate, &DailyExtremes> =
        right.iter().map(|extremes| (extremes.day, extremes)).collect();

    let mut unmatched = 0;
    for row in left.iter_mut() {
        match by_day.get(&row.day) {
            Some(extremes) => apply(row, extremes),
            None => unmatched += 1,
        }
    }
    unmatched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{aggregate_extremes, aggregate_usage, Covariate};
    use bikeshare_common::test_utils::{date, record_fixtures::*};

    #[test]
    fn test_merge_scenario() {
        let records = scenario_records();
        let merged = merge(
            &aggregate_usage(&records),
            &aggregate_extremes(&records, Covariate::Temperature),
            &aggregate_extremes(&records, Covariate::WindSpeed),
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].minimum_temp, Some(5.0));
        assert_eq!(merged[0].maximum_temp, Some(5.0));
        assert_eq!(merged[1].minimum_wind, Some(1.0));
        assert_eq!(merged[1].maximum_wind, Some(1.0));
    }

    #[test]
    fn test_missing_extremes_stay_absent() {
        let records = scenario_records();
        let usage = aggregate_usage(&records);
        let temp = aggregate_extremes(&records[..1], Covariate::Temperature);

        let merged = merge(&usage, &temp, &[]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].maximum_temp, Some(5.0));
        assert_eq!(merged[1].maximum_temp, None);
        assert!(merged.iter().all(|row| row.minimum_wind.is_none()));
    }

    #[test]
    fn test_extra_extremes_days_are_dropped() {
        let records = scenario_records();
        let usage = aggregate_usage(&records[1..]);
        let temp = aggregate_extremes(&records, Covariate::Temperature);
        let wind = aggregate_extremes(&records, Covariate::WindSpeed);

        let merged = merge(&usage, &temp, &wind);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].day, date(2024, 1, 2));
        assert_eq!(merged[0].minimum_temp, Some(7.0));
    }

    #[test]
    fn test_merge_of_empty_tables() {
        assert!(merge(&[], &[], &[]).is_empty());
    }
}

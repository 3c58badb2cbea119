//! Day-bucket aggregation of raw records into the derived daily tables

use bikeshare_common::DailyRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::{DailyExtremes, DailyUsageSummary};

/// The weather covariate an extremes pass summarises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Covariate {
    Temperature,
    WindSpeed,
}

impl Covariate {
    /// Reads this covariate off a record.
    pub fn value(self, record: &DailyRecord) -> f64 {
        match self {
            Covariate::Temperature => record.temperature,
            Covariate::WindSpeed => record.wind_speed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Covariate::Temperature => "temperature",
            Covariate::WindSpeed => "windspeed",
        }
    }
}

/// Trait for turning filtered records into one derived daily table.
///
/// Implementations group by `day` and emit one row per day present in the
/// input, in ascending day order. Days without records are absent.
pub trait DailyAggregator {
    type Output;

    fn aggregate(&self, records: &[DailyRecord]) -> Vec<Self::Output>;

    fn name(&self) -> &'static str;
}

/// Groups records by day, keeping input order within each bucket.
fn day_buckets(records: &[DailyRecord]) -> BTreeMap<NaiveDate, Vec<&DailyRecord>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&DailyRecord>> = BTreeMap::new();
    for record in records {
        buckets.entry(record.day).or_default().push(record);
    }
    buckets
}

fn mean<I: Iterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    // buckets are never empty
    sum / count as f64
}

/// Sums the counts and averages the covariates per day.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsageTotalsAggregator;

impl DailyAggregator for UsageTotalsAggregator {
    type Output = DailyUsageSummary;

    #[instrument(skip_all, fields(records = records.len()))]
    fn aggregate(&self, records: &[DailyRecord]) -> Vec<DailyUsageSummary> {
        let result: Vec<DailyUsageSummary> = day_buckets(records)
            .into_iter()
            .map(|(day, bucket)| DailyUsageSummary {
                day,
                total_usage: bucket.iter().map(|r| u64::from(r.rental_count)).sum(),
                total_casual: bucket.iter().map(|r| u64::from(r.casual_count)).sum(),
                total_registered: bucket.iter().map(|r| u64::from(r.registered_count)).sum(),
                average_temperature: mean(bucket.iter().map(|r| r.temperature)),
                average_windspeed: mean(bucket.iter().map(|r| r.wind_speed)),
            })
            .collect();

        debug!("Aggregated {} daily usage rows", result.len());
        result
    }

    fn name(&self) -> &'static str {
        "usage_totals"
    }
}

/// Minimum and maximum of one covariate per day.
#[derive(Debug, Clone, Copy)]
pub struct ExtremesAggregator {
    covariate: Covariate,
}

impl ExtremesAggregator {
    pub fn new(covariate: Covariate) -> Self {
        Self { covariate }
    }

    pub fn temperature() -> Self {
        Self::new(Covariate::Temperature)
    }

    pub fn wind_speed() -> Self {
        Self::new(Covariate::WindSpeed)
    }

    pub fn covariate(&self) -> Covariate {
        self.covariate
    }
}

impl DailyAggregator for ExtremesAggregator {
    type Output = DailyExtremes;

    #[instrument(skip_all, fields(covariate = self.covariate.label(), records = records.len()))]
    fn aggregate(&self, records: &[DailyRecord]) -> Vec<DailyExtremes> {
        let result: Vec<DailyExtremes> = day_buckets(records)
            .into_iter()
            .map(|(day, bucket)| {
                let (minimum, maximum) = bucket
                    .iter()
                    .map(|r| self.covariate.value(r))
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                        (lo.min(v), hi.max(v))
                    });
                DailyExtremes {
                    day,
                    minimum,
                    maximum,
                }
            })
            .collect();

        debug!("Aggregated {} daily extremes rows", result.len());
        result
    }

    fn name(&self) -> &'static str {
        match self.covariate {
            Covariate::Temperature => "temperature_extremes",
            Covariate::WindSpeed => "windspeed_extremes",
        }
    }
}

/// Daily usage totals of `records`.
pub fn aggregate_usage(records: &[DailyRecord]) -> Vec<DailyUsageSummary> {
    UsageTotalsAggregator.aggregate(records)
}

/// Daily extremes of `covariate` over `records`.
pub fn aggregate_extremes(records: &[DailyRecord], covariate: Covariate) -> Vec<DailyExtremes> {
    ExtremesAggregator::new(covariate).aggregate(records)
}

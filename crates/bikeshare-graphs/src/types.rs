//! Derived daily tables

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Usage totals and covariate means of one day bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsageSummary {
    pub day: NaiveDate,
    pub total_usage: u64,
    pub total_casual: u64,
    pub total_registered: u64,
    pub average_temperature: f64,
    pub average_windspeed: f64,
}

/// Minimum and maximum of one covariate over a day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyExtremes {
    pub day: NaiveDate,
    pub minimum: f64,
    pub maximum: f64,
}

/// One row of the merged, analysis-ready table.
///
/// The extremes fields are `None` only when the extremes tables were built
/// from a different input than the usage table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedDailySummary {
    pub day: NaiveDate,
    pub total_usage: u64,
    pub total_casual: u64,
    pub total_registered: u64,
    pub average_temperature: f64,
    pub average_windspeed: f64,
    pub minimum_temp: Option<f64>,
    pub maximum_temp: Option<f64>,
    pub minimum_wind: Option<f64>,
    pub maximum_wind: Option<f64>,
}

impl UnifiedDailySummary {
    /// A row carrying only the usage side of the join.
    pub fn from_usage(usage: &DailyUsageSummary) -> Self {
        Self {
            day: usage.day,
            total_usage: usage.total_usage,
            total_casual: usage.total_casual,
            total_registered: usage.total_registered,
            average_temperature: usage.average_temperature,
            average_windspeed: usage.average_windspeed,
            minimum_temp: None,
            maximum_temp: None,
            minimum_wind: None,
            maximum_wind: None,
        }
    }
}

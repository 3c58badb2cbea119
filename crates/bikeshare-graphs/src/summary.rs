//! Scalar rollups over the unified table for the metrics panel

use bikeshare_common::{format_stat, format_units};
use serde::Serialize;
use std::fmt;

use crate::UnifiedDailySummary;

/// Headline numbers of one selection.
///
/// Statistics that are undefined on an empty table are `None` and print
/// as `0.00`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub days: usize,
    pub total_usage: u64,
    pub total_casual: u64,
    pub total_registered: u64,
    pub average_temperature: Option<f64>,
    pub average_windspeed: Option<f64>,
    pub max_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub max_windspeed: Option<f64>,
    pub min_windspeed: Option<f64>,
}

impl DashboardMetrics {
    pub fn from_table(rows: &[UnifiedDailySummary]) -> Self {
        Self {
            days: rows.len(),
            total_usage: rows.iter().map(|r| r.total_usage).sum(),
            total_casual: rows.iter().map(|r| r.total_casual).sum(),
            total_registered: rows.iter().map(|r| r.total_registered).sum(),
            average_temperature: mean(rows.iter().map(|r| r.average_temperature)),
            average_windspeed: mean(rows.iter().map(|r| r.average_windspeed)),
            max_temperature: rows.iter().filter_map(|r| r.maximum_temp).reduce(f64::max),
            min_temperature: rows.iter().filter_map(|r| r.minimum_temp).reduce(f64::min),
            max_windspeed: rows.iter().filter_map(|r| r.maximum_wind).reduce(f64::max),
            min_windspeed: rows.iter().filter_map(|r| r.minimum_wind).reduce(f64::min),
        }
    }

    /// Casual and registered totals, in chart order.
    pub fn user_type_breakdown(&self) -> [(&'static str, u64); 2] {
        [
            ("Casual", self.total_casual),
            ("Registered", self.total_registered),
        ]
    }
}

fn mean<I: Iterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

impl fmt::Display for DashboardMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total usage: {}", format_units(self.total_usage))?;
        writeln!(f, "Casual usage: {}", format_units(self.total_casual))?;
        writeln!(f, "Registered usage: {}", format_units(self.total_registered))?;
        writeln!(
            f,
            "Average temperature: {} °C",
            format_stat(self.average_temperature)
        )?;
        writeln!(f, "Max temperature: {} °C", format_stat(self.max_temperature))?;
        writeln!(f, "Min temperature: {} °C", format_stat(self.min_temperature))?;
        writeln!(f, "Average windspeed: {}", format_stat(self.average_windspeed))?;
        writeln!(f, "Max windspeed: {}", format_stat(self.max_windspeed))?;
        write!(f, "Min windspeed: {}", format_stat(self.min_windspeed))
    }
}

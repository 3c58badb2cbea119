//! Daily aggregation, merge and chart generation for the bikeshare dashboard
//!
//! Raw records of a date range are grouped into day buckets three times
//! (usage totals, temperature extremes, windspeed extremes), the results are
//! left-joined into one unified table, and that table feeds the metrics
//! panel and the PNG charts.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod covariate_usage;
pub mod daily_usage;
pub mod merger;
pub mod pipeline;
pub mod renderer;
pub mod summary;
pub mod types;
pub mod user_types;

pub use aggregator::{
    aggregate_extremes, aggregate_usage, Covariate, DailyAggregator, ExtremesAggregator,
    UsageTotalsAggregator,
};
pub use covariate_usage::CovariateUsageChart;
pub use daily_usage::DailyUsageChart;
pub use merger::merge;
pub use pipeline::{DailySummaryPipeline, DailySummaryTable};
pub use renderer::{parse_color, ChartRenderer, ChartStyle};
pub use summary::DashboardMetrics;
pub use types::*;
pub use user_types::UserTypesChart;

/// The four dashboard charts in display order.
pub fn dashboard_charts(style: &ChartStyle) -> Vec<Box<dyn ChartRenderer>> {
    vec![
        Box::new(DailyUsageChart::new(style.clone())),
        Box::new(UserTypesChart::new(style.clone())),
        Box::new(CovariateUsageChart::temperature(style.clone())),
        Box::new(CovariateUsageChart::wind_speed(style.clone())),
    ]
}

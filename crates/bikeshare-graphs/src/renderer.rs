//! Chart rendering trait and shared drawing helpers

use async_trait::async_trait;
use bikeshare_common::{BikeshareError, Result};
use chrono::NaiveDate;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

use crate::pipeline::DailySummaryTable;
use crate::UnifiedDailySummary;

/// Canvas size, palette and fonts shared by every chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub background_color: String,
    pub usage_color: String,
    pub usage_overlay_color: String,
    pub casual_color: String,
    pub registered_color: String,
    pub average_color: String,
    pub maximum_color: String,
    pub minimum_color: String,
    pub font_family: String,
    pub font_size: u32,
    pub show_grid: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 600,
            background_color: "#FFFFFF".to_string(),
            usage_color: "#0000FF".to_string(),
            usage_overlay_color: "#FF0000".to_string(),
            casual_color: "#FF0000".to_string(),
            registered_color: "#0000FF".to_string(),
            average_color: "#0000FF".to_string(),
            maximum_color: "#008000".to_string(),
            minimum_color: "#800080".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 16,
            show_grid: true,
        }
    }
}

impl ChartStyle {
    pub fn background(&self) -> RGBColor {
        parse_color(&self.background_color)
    }

    /// Font for captions, a few points above the axis font.
    pub fn caption_font(&self) -> (&str, u32) {
        (self.font_family.as_str(), self.font_size + 8)
    }

    pub fn label_font(&self) -> (&str, u32) {
        (self.font_family.as_str(), self.font_size)
    }
}

/// Trait for the dashboard charts.
///
/// Each implementation draws one PNG from a unified table. Drawing runs on
/// the blocking pool. An empty table is rejected with `EmptyResult` before
/// any file is touched.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Human readable chart name for logs.
    fn name(&self) -> &'static str;

    /// File name the chart is written to inside the output directory.
    fn file_name(&self) -> &'static str;

    /// Render the chart to `path`.
    async fn render_to_file(&self, table: &DailySummaryTable, path: &Path) -> Result<()>;
}

/// Parse a color string (hex format) to RGBColor
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    // Default to black if parsing fails
    RGBColor(0, 0, 0)
}

/// Rejects an empty table for the named chart.
pub(crate) fn ensure_rows(table: &DailySummaryTable, chart: &str) -> Result<()> {
    if table.is_empty() {
        let context = match table.range() {
            Some(range) => format!("no daily rows in {range} for the {chart} chart"),
            None => format!("no daily rows for the {chart} chart"),
        };
        return Err(BikeshareError::empty(context));
    }
    Ok(())
}

/// Runs a drawing closure on the blocking pool.
pub(crate) async fn render_blocking<F>(chart: &'static str, draw: F) -> Result<()>
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    tokio::task::spawn_blocking(draw)
        .await
        .map_err(|e| BikeshareError::graph_with_source(format!("{chart} chart task failed"), e))?
}

/// X axis covering every day of the rows. A single day is widened by one
/// so the axis never collapses.
pub(crate) fn day_axis(rows: &[UnifiedDailySummary]) -> Range<NaiveDate> {
    let first = rows.first().map_or(NaiveDate::MIN, |row| row.day);
    let last = rows.last().map_or(first, |row| row.day);
    let end = if last > first {
        last
    } else {
        last.succ_opt().unwrap_or(last)
    };
    first..end
}

/// Value axis from zero to the largest value plus 10% headroom.
pub(crate) fn count_axis<I: Iterator<Item = f64>>(values: I) -> Range<f64> {
    let max = values.fold(0.0, f64::max);
    if max > 0.0 {
        0.0..max * 1.1
    } else {
        0.0..1.0
    }
}

/// Value axis spanning every value with 10% padding on both sides.
pub(crate) fn value_axis<I: Iterator<Item = f64>>(values: I) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let padding = if hi > lo { (hi - lo) * 0.1 } else { 0.5 };
    (lo - padding)..(hi + padding)
}

//! Daily total usage line chart

use async_trait::async_trait;
use bikeshare_common::Result;
use chrono::NaiveDate;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::pipeline::DailySummaryTable;
use crate::renderer::{
    count_axis, day_axis, ensure_rows, parse_color, render_blocking, ChartRenderer, ChartStyle,
};
use crate::UnifiedDailySummary;

/// Line of `total_usage` per day with a marker on every day.
#[derive(Debug, Clone, Default)]
pub struct DailyUsageChart {
    style: ChartStyle,
}

impl DailyUsageChart {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    fn points(rows: &[UnifiedDailySummary]) -> Vec<(NaiveDate, f64)> {
        rows.iter()
            .map(|row| (row.day, row.total_usage as f64))
            .collect()
    }

    fn draw(style: &ChartStyle, rows: &[UnifiedDailySummary], path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
        root.fill(&style.background())?;

        let points = Self::points(rows);
        let color = parse_color(&style.usage_color);

        let mut chart = ChartBuilder::on(&root)
            .caption("Daily Usage", style.caption_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(day_axis(rows), count_axis(points.iter().map(|p| p.1)))?;

        let day_label = |day: &NaiveDate| day.format("%Y-%m-%d").to_string();
        let mut mesh = chart.configure_mesh();
        mesh.x_desc("Day")
            .y_desc("Total usage")
            .label_style(style.label_font())
            .x_label_formatter(&day_label);
        if !style.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
        chart.draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 3, color.filled())),
        )?;

        root.present()?;
        Ok(())
    }
}

#[async_trait]
impl ChartRenderer for DailyUsageChart {
    fn name(&self) -> &'static str {
        "daily usage"
    }

    fn file_name(&self) -> &'static str {
        "daily_usage.png"
    }

    async fn render_to_file(&self, table: &DailySummaryTable, path: &Path) -> Result<()> {
        ensure_rows(table, self.name())?;

        let style = self.style.clone();
        let rows = table.rows().to_vec();
        let target: PathBuf = path.to_path_buf();
        render_blocking(self.name(), move || Self::draw(&style, &rows, &target)).await?;

        info!("Rendered daily usage chart to {}", path.display());
        Ok(())
    }
}

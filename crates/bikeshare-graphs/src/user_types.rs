//! Casual versus registered bar chart

use async_trait::async_trait;
use bikeshare_common::Result;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::pipeline::DailySummaryTable;
use crate::renderer::{count_axis, ensure_rows, parse_color, render_blocking, ChartRenderer, ChartStyle};
use crate::summary::DashboardMetrics;

/// Two bars: total casual and total registered usage of the selection.
#[derive(Debug, Clone, Default)]
pub struct UserTypesChart {
    style: ChartStyle,
}

impl UserTypesChart {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    fn draw(style: &ChartStyle, breakdown: [(&'static str, u64); 2], path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
        root.fill(&style.background())?;

        let colors = [
            parse_color(&style.casual_color),
            parse_color(&style.registered_color),
        ];

        let mut chart = ChartBuilder::on(&root)
            .caption("Casual vs Registered Usage", style.caption_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(
                (0usize..breakdown.len()).into_segmented(),
                count_axis(breakdown.iter().map(|(_, total)| *total as f64)),
            )?;

        let category_label = |value: &SegmentValue<usize>| match value {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => breakdown
                .get(*i)
                .map(|(label, _)| (*label).to_string())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        };

        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_desc("User type")
            .y_desc("Total usage")
            .label_style(style.label_font())
            .x_label_formatter(&category_label);
        if !style.show_grid {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;

        chart.draw_series(breakdown.iter().enumerate().map(|(i, (_, total))| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), *total as f64),
                ],
                colors[i % colors.len()].filled(),
            );
            bar.set_margin(0, 0, 30, 30);
            bar
        }))?;

        root.present()?;
        Ok(())
    }
}

#[async_trait]
impl ChartRenderer for UserTypesChart {
    fn name(&self) -> &'static str {
        "user types"
    }

    fn file_name(&self) -> &'static str {
        "user_types.png"
    }

    async fn render_to_file(&self, table: &DailySummaryTable, path: &Path) -> Result<()> {
        ensure_rows(table, self.name())?;

        let breakdown = DashboardMetrics::from_table(table.rows()).user_type_breakdown();
        let style = self.style.clone();
        let target: PathBuf = path.to_path_buf();
        render_blocking(self.name(), move || Self::draw(&style, breakdown, &target)).await?;

        info!("Rendered user types chart to {}", path.display());
        Ok(())
    }
}

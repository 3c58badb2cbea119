//! Usage against a weather covariate on two value axes

use async_trait::async_trait;
use bikeshare_common::Result;
use chrono::NaiveDate;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::aggregator::Covariate;
use crate::pipeline::DailySummaryTable;
use crate::renderer::{
    count_axis, day_axis, ensure_rows, parse_color, render_blocking, value_axis, ChartRenderer,
    ChartStyle,
};
use crate::UnifiedDailySummary;

/// One day of the covariate series. Absent extremes are skipped when drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CovariatePoint {
    day: NaiveDate,
    usage: f64,
    average: f64,
    maximum: Option<f64>,
    minimum: Option<f64>,
}

impl CovariatePoint {
    fn from_row(row: &UnifiedDailySummary, covariate: Covariate) -> Self {
        let (average, minimum, maximum) = match covariate {
            Covariate::Temperature => (row.average_temperature, row.minimum_temp, row.maximum_temp),
            Covariate::WindSpeed => (row.average_windspeed, row.minimum_wind, row.maximum_wind),
        };
        Self {
            day: row.day,
            usage: row.total_usage as f64,
            average,
            maximum,
            minimum,
        }
    }
}

const MARKER_SIZE: i32 = 3;

/// Points of one series, skipping days where `value` is absent.
fn series<F>(points: &[CovariatePoint], value: F) -> Vec<(NaiveDate, f64)>
where
    F: Fn(&CovariatePoint) -> Option<f64>,
{
    points
        .iter()
        .filter_map(|p| value(p).map(|v| (p.day, v)))
        .collect()
}

/// Total usage on the left axis; average (solid), maximum and minimum
/// (dashed) of the covariate on the right axis. Every point is marked.
#[derive(Debug, Clone)]
pub struct CovariateUsageChart {
    covariate: Covariate,
    style: ChartStyle,
}

impl CovariateUsageChart {
    pub fn new(covariate: Covariate, style: ChartStyle) -> Self {
        Self { covariate, style }
    }

    pub fn temperature(style: ChartStyle) -> Self {
        Self::new(Covariate::Temperature, style)
    }

    pub fn wind_speed(style: ChartStyle) -> Self {
        Self::new(Covariate::WindSpeed, style)
    }

    fn title(covariate: Covariate) -> &'static str {
        match covariate {
            Covariate::Temperature => "Temperature and Usage",
            Covariate::WindSpeed => "Windspeed and Usage",
        }
    }

    fn axis_label(covariate: Covariate) -> &'static str {
        match covariate {
            Covariate::Temperature => "Temperature",
            Covariate::WindSpeed => "Windspeed",
        }
    }

    fn draw(
        style: &ChartStyle,
        covariate: Covariate,
        rows: &[UnifiedDailySummary],
        path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
        root.fill(&style.background())?;

        let points: Vec<CovariatePoint> = rows
            .iter()
            .map(|row| CovariatePoint::from_row(row, covariate))
            .collect();

        let usage_color = parse_color(&style.usage_overlay_color);
        let average_color = parse_color(&style.average_color);
        let maximum_color = parse_color(&style.maximum_color);
        let minimum_color = parse_color(&style.minimum_color);

        let covariate_values = points.iter().flat_map(|p| {
            std::iter::once(p.average)
                .chain(p.maximum)
                .chain(p.minimum)
        });

        let x_axis = day_axis(rows);
        let mut chart = ChartBuilder::on(&root)
            .caption(Self::title(covariate), style.caption_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .right_y_label_area_size(70)
            .build_cartesian_2d(x_axis.clone(), count_axis(points.iter().map(|p| p.usage)))?
            .set_secondary_coord(x_axis, value_axis(covariate_values));

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

        chart
            .configure_secondary_axes()
            .y_desc(Self::axis_label(covariate))
            .label_style(style.label_font())
            .draw()?;

        let usage = series(&points, |p| Some(p.usage));
        let average = series(&points, |p| Some(p.average));
        let maximum = series(&points, |p| p.maximum);
        let minimum = series(&points, |p| p.minimum);
        let name = Self::axis_label(covariate).to_lowercase();

        chart
            .draw_series(LineSeries::new(usage.clone(), usage_color.stroke_width(2)))?
            .label("Total usage")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], usage_color));
        chart.draw_series(
            usage
                .into_iter()
                .map(|point| Circle::new(point, MARKER_SIZE, usage_color.filled())),
        )?;

        chart
            .draw_secondary_series(LineSeries::new(
                average.clone(),
                average_color.stroke_width(2),
            ))?
            .label(format!("Average {name}"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], average_color));

        chart
            .draw_secondary_series(DashedLineSeries::new(
                maximum.clone(),
                8,
                4,
                maximum_color.stroke_width(2),
            ))?
            .label(format!("Max {name}"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], maximum_color));

        chart
            .draw_secondary_series(DashedLineSeries::new(
                minimum.clone(),
                8,
                4,
                minimum_color.stroke_width(2),
            ))?
            .label(format!("Min {name}"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], minimum_color));

        for (values, color) in [
            (average, average_color),
            (maximum, maximum_color),
            (minimum, minimum_color),
        ] {
            chart.draw_secondary_series(
                values
                    .into_iter()
                    .map(move |point| Circle::new(point, MARKER_SIZE, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(style.label_font())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

#[async_trait]
impl ChartRenderer for CovariateUsageChart {
    fn name(&self) -> &'static str {
        match self.covariate {
            Covariate::Temperature => "temperature usage",
            Covariate::WindSpeed => "windspeed usage",
        }
    }

    fn file_name(&self) -> &'static str {
        match self.covariate {
            Covariate::Temperature => "temperature_usage.png",
            Covariate::WindSpeed => "windspeed_usage.png",
        }
    }

    async fn render_to_file(&self, table: &DailySummaryTable, path: &Path) -> Result<()> {
        ensure_rows(table, self.name())?;

        let style = self.style.clone();
        let covariate = self.covariate;
        let rows = table.rows().to_vec();
        let target: PathBuf = path.to_path_buf();
        render_blocking(self.name(), move || Self::draw(&style, covariate, &rows, &target))
            .await?;

        info!("Rendered {} chart to {}", self.name(), path.display());
        Ok(())
    }
}

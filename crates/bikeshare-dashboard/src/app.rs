//! One dashboard run: load, select, summarise, present

use anyhow::{Context, Result};
use bikeshare_common::{BikeshareError, DateRange};
use bikeshare_config::{ChartsConfig, Config};
use bikeshare_data::{RecordStore, SharedStore};
use bikeshare_graphs::{
    dashboard_charts, ChartStyle, DailySummaryPipeline, DailySummaryTable, DashboardMetrics,
};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// File name of the exported daily summary table.
pub const TABLE_FILE_NAME: &str = "daily_summary.csv";

/// What a run produced for the presentation layer.
///
/// A recoverable selection error leaves `table` empty and sets `notice`;
/// the metrics then show the neutral all-zero view.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub range: Option<DateRange>,
    pub metrics: DashboardMetrics,
    pub notice: Option<String>,
    #[serde(skip)]
    pub table: Option<DailySummaryTable>,
}

impl DashboardView {
    fn from_table(table: DailySummaryTable) -> Self {
        let metrics = DashboardMetrics::from_table(table.rows());
        let range = table.range();
        let notice = table.is_empty().then(|| match range {
            Some(range) => format!("No records between {} and {}", range.start(), range.end()),
            None => "No records in the dataset".to_string(),
        });
        Self {
            range,
            metrics,
            notice,
            table: Some(table),
        }
    }

    fn neutral(error: &BikeshareError) -> Self {
        Self {
            range: None,
            metrics: DashboardMetrics::from_table(&[]),
            notice: Some(error.to_string()),
            table: None,
        }
    }
}

/// Files written by a run.
#[derive(Debug, Default)]
pub struct RunOutputs {
    pub charts: Vec<PathBuf>,
    pub skipped_charts: Vec<&'static str>,
    pub table: Option<PathBuf>,
}

/// Translates the chart section into the renderer style.
pub fn chart_style(charts: &ChartsConfig) -> ChartStyle {
    ChartStyle {
        width: charts.width,
        height: charts.height,
        background_color: charts.background_color.clone(),
        usage_color: charts.usage_color.clone(),
        usage_overlay_color: charts.usage_overlay_color.clone(),
        casual_color: charts.casual_color.clone(),
        registered_color: charts.registered_color.clone(),
        average_color: charts.average_color.clone(),
        maximum_color: charts.maximum_color.clone(),
        minimum_color: charts.minimum_color.clone(),
        font_family: charts.font_family.clone(),
        font_size: charts.font_size,
        show_grid: charts.show_grid,
    }
}

/// Loads the dataset. Any failure here is fatal.
pub fn load_store(config: &Config) -> Result<SharedStore> {
    let store = RecordStore::from_csv_path(&config.data.csv_path)
        .with_context(|| format!("Failed to load rental data from {}", config.data.csv_path))?;
    Ok(store.into_shared())
}

/// Computes the view for the configured selection.
///
/// Range problems and empty selections degrade to a neutral view; anything
/// else is returned as an error.
#[instrument(skip_all)]
pub fn build_view(store: &RecordStore, config: &Config) -> Result<DashboardView> {
    let pipeline = DailySummaryPipeline::new();
    match pipeline.run_selection(store, config.data.start_date, config.data.end_date) {
        Ok(table) => Ok(DashboardView::from_table(table)),
        Err(e) if e.is_recoverable() => {
            warn!("Showing empty dashboard: {}", e);
            Ok(DashboardView::neutral(&e))
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes the metrics panel as text or JSON.
pub fn write_report<W: Write>(view: &DashboardView, json: bool, out: &mut W) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, view)?;
        writeln!(out)?;
        return Ok(());
    }

    if let Some(range) = view.range {
        writeln!(out, "Bike Sharing Dashboard: {} to {}", range.start(), range.end())?;
    }
    if let Some(notice) = &view.notice {
        writeln!(out, "Note: {notice}")?;
    }
    writeln!(out, "{}", view.metrics)?;
    Ok(())
}

/// Renders every chart into `dir`. Charts that cannot be drawn are logged
/// and skipped.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub async fn render_charts(
    table: &DailySummaryTable,
    style: &ChartStyle,
    dir: &Path,
) -> Result<RunOutputs> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut outputs = RunOutputs::default();
    for chart in dashboard_charts(style) {
        let path = dir.join(chart.file_name());
        match chart.render_to_file(table, &path).await {
            Ok(()) => outputs.charts.push(path),
            Err(e @ BikeshareError::EmptyResult { .. }) => {
                warn!("Skipping {} chart: {}", chart.name(), e);
                outputs.skipped_charts.push(chart.name());
            }
            Err(e) => {
                error!("Failed to render {} chart: {}", chart.name(), e);
                outputs.skipped_charts.push(chart.name());
            }
        }
    }
    Ok(outputs)
}

/// Runs the dashboard once against a loaded configuration.
pub async fn run<W: Write>(config: &Config, json: bool, out: &mut W) -> Result<RunOutputs> {
    let store = load_store(config)?;
    let view = build_view(&store, config)?;
    write_report(&view, json, out)?;

    let dir = Path::new(&config.output.directory);
    let mut outputs = RunOutputs::default();

    if let Some(table) = &view.table {
        if config.output.render_charts {
            outputs = render_charts(table, &chart_style(&config.charts), dir).await?;
        }

        if config.output.export_table {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
            let path = dir.join(TABLE_FILE_NAME);
            table.write_csv_path(&path)?;
            outputs.table = Some(path);
        }
    }

    info!(
        "Dashboard run complete: {} charts written, {} skipped",
        outputs.charts.len(),
        outputs.skipped_charts.len()
    );
    Ok(outputs)
}

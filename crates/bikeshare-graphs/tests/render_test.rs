//! Renders every dashboard chart from real tables into a scratch directory.

use bikeshare_common::test_utils::record_fixtures::*;
use bikeshare_common::test_utils::{date, init_test_logging};
use bikeshare_common::DateRange;
use bikeshare_graphs::{dashboard_charts, ChartStyle, DailySummaryPipeline, DailySummaryTable};
use std::path::Path;

async fn render_all(table: &DailySummaryTable, dir: &Path) -> Vec<String> {
    let mut written = Vec::new();
    for chart in dashboard_charts(&ChartStyle::default()) {
        let path = dir.join(chart.file_name());
        chart
            .render_to_file(table, &path)
            .await
            .unwrap_or_else(|e| panic!("{} chart failed: {e}", chart.name()));

        let size = std::fs::metadata(&path).unwrap().len();
        assert!(size > 0, "{} is empty", path.display());
        written.push(chart.file_name().to_string());
    }
    written
}

#[tokio::test]
async fn test_two_day_table_renders_every_chart() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 2)).unwrap();
    let table = DailySummaryPipeline::new().run_records(&scenario_records(), range);

    let written = render_all(&table, dir.path()).await;
    assert_eq!(
        written,
        vec![
            "daily_usage.png",
            "user_types.png",
            "temperature_usage.png",
            "windspeed_usage.png"
        ]
    );
}

#[tokio::test]
async fn test_single_day_table_renders_every_chart() {
    let dir = tempfile::tempdir().unwrap();
    let range = DateRange::single_day(date(2024, 1, 2));
    let table = DailySummaryPipeline::new().run_records(&scenario_records(), range);
    assert_eq!(table.len(), 1);

    let written = render_all(&table, dir.path()).await;
    assert_eq!(written.len(), 4);
}

#[tokio::test]
async fn test_rendering_replaces_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    for chart in dashboard_charts(&ChartStyle::default()) {
        std::fs::write(dir.path().join(chart.file_name()), b"").unwrap();
    }

    let records = sample_records(30, date(2011, 1, 1));
    let range = DateRange::new(date(2011, 1, 1), date(2011, 1, 30)).unwrap();
    let table = DailySummaryPipeline::new().run_records(&records, range);

    render_all(&table, dir.path()).await;
}

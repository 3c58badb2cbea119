//! Command line arguments

use bikeshare_config::Config;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Daily rental CSV (day.csv layout)
    #[arg(short, long)]
    pub data: Option<String>,

    /// First day of the selection (YYYY-MM-DD); defaults to the first day in the data
    #[arg(short, long)]
    pub start: Option<NaiveDate>,

    /// Last day of the selection (YYYY-MM-DD); defaults to the last day in the data
    #[arg(short, long)]
    pub end: Option<NaiveDate>,

    /// Directory for charts and the exported table
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Skip chart rendering
    #[arg(long)]
    pub no_charts: bool,

    /// Write the daily summary table as CSV
    #[arg(long)]
    pub export_table: bool,

    /// Print the metrics as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Layers the flags over a loaded configuration. Flags win.
    pub fn apply(&self, config: &mut Config) {
        if let Some(data) = &self.data {
            config.data.csv_path.clone_from(data);
        }
        if self.start.is_some() {
            config.data.start_date = self.start;
        }
        if self.end.is_some() {
            config.data.end_date = self.end;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory.clone_from(dir);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if self.no_charts {
            config.output.render_charts = false;
        }
        if self.export_table {
            config.output.export_table = true;
        }
    }
}

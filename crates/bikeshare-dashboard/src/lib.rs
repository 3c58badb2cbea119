//! Bikeshare dashboard: command line front end
//!
//! Loads the daily rental CSV once, summarises the selected date range and
//! presents the result as a metrics panel, PNG charts and an optional CSV
//! export of the unified daily table.

pub mod app;
pub mod cli;

pub use app::{build_view, chart_style, load_store, render_charts, run, DashboardView, RunOutputs};
pub use cli::Args;

use anyhow::Result;
use bikeshare_common::BikeshareError;
use bikeshare_config::{Config, ConfigLoader};

/// Loads the configuration file (explicit path or the default search), then
/// layers the command line flags over it and re-validates.
pub fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    args.apply(&mut config);
    config.validate_all().map_err(BikeshareError::from)?;
    Ok(config)
}

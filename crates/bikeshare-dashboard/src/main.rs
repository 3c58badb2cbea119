//! Bikeshare Dashboard - Main Entry Point

use anyhow::Result;
use bikeshare_common::init_logging;
use bikeshare_dashboard::{resolve_config, run, Args};
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = resolve_config(&args)?;
    init_logging(config.logging_config())?;

    info!("Starting bikeshare dashboard");
    info!("Data source: {}", config.data.csv_path);

    let mut stdout = std::io::stdout();
    let outputs = run(&config, args.json, &mut stdout).await?;

    for path in &outputs.charts {
        info!("Chart written: {}", path.display());
    }
    if let Some(path) = &outputs.table {
        info!("Table written: {}", path.display());
    }

    Ok(())
}

//! Configuration loading utilities

use chrono::NaiveDate;
use std::env;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

use crate::schema::Config;
use bikeshare_common::{BikeshareError, Result as BikeshareResult};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "BIKESHARE_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for BikeshareError {
    fn from(err: ConfigError) -> Self {
        BikeshareError::config_with_source("Configuration loading failed", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config = Self::parse_yaml(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load configuration from the first location that exists:
    /// `BIKESHARE_CONFIG_PATH`, `config.yaml`, `config.yml`, else defaults.
    pub fn load() -> BikeshareResult<Config> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            debug!("No configuration file found, using defaults");
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all()?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BikeshareResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Parse YAML without overrides or validation. An empty document
    /// yields the defaults.
    pub fn parse_yaml(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BIKESHARE_DATA_PATH") {
            config.data.csv_path = path;
        }

        if let Some(start) = parse_var::<NaiveDate, _>(&lookup, "BIKESHARE_START_DATE")? {
            config.data.start_date = Some(start);
        }

        if let Some(end) = parse_var::<NaiveDate, _>(&lookup, "BIKESHARE_END_DATE")? {
            config.data.end_date = Some(end);
        }

        if let Some(directory) = lookup("BIKESHARE_OUTPUT_DIR") {
            config.output.directory = directory;
        }

        if let Some(render) = parse_var(&lookup, "BIKESHARE_RENDER_CHARTS")? {
            config.output.render_charts = render;
        }

        if let Some(export) = parse_var(&lookup, "BIKESHARE_EXPORT_TABLE")? {
            config.output.export_table = export;
        }

        if let Some(width) = parse_var(&lookup, "BIKESHARE_CHART_WIDTH")? {
            config.charts.width = width;
        }

        if let Some(height) = parse_var(&lookup, "BIKESHARE_CHART_HEIGHT")? {
            config.charts.height = height;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(json) = parse_var(&lookup, "LOG_JSON")? {
            config.logging.json = json;
        }

        if let Some(file) = lookup("LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::EnvParseError {
                var: var.to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
}

//! Configuration schema definitions using serde with validation attributes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::loader::ConfigError;

/// Main configuration structure for the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Dataset location and the default date window.
    #[validate]
    pub data: DataConfig,
    /// Where results are written.
    #[validate]
    pub output: OutputConfig,
    /// Chart rendering settings.
    #[validate]
    pub charts: ChartsConfig,
    /// Logging settings.
    #[validate]
    pub logging: LoggingSettings,
}

/// Dataset configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the daily CSV export.
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "Data path must be a valid file path"
    ))]
    pub csv_path: String,

    /// First day of the default window; the dataset's first day when unset.
    pub start_date: Option<NaiveDate>,

    /// Last day of the default window; the dataset's last day when unset.
    pub end_date: Option<NaiveDate>,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving charts and exported tables.
    #[validate(custom(
        function = "crate::validation::validate_file_path",
        message = "Output directory must be a valid path"
    ))]
    pub directory: String,

    /// Whether to render the PNG charts.
    pub render_charts: bool,

    /// Whether to write the unified daily table as CSV.
    pub export_table: bool,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartsConfig {
    /// Chart width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be valid hex color"))]
    pub background_color: String,

    /// Line color of the daily usage chart
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Usage color must be valid hex color"))]
    pub usage_color: String,

    /// Usage line color on the covariate charts
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Usage overlay color must be valid hex color"))]
    pub usage_overlay_color: String,

    /// Casual bar color
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Casual color must be valid hex color"))]
    pub casual_color: String,

    /// Registered bar color
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Registered color must be valid hex color"))]
    pub registered_color: String,

    /// Daily average line color
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Average color must be valid hex color"))]
    pub average_color: String,

    /// Daily maximum line color
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Maximum color must be valid hex color"))]
    pub maximum_color: String,

    /// Daily minimum line color
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Minimum color must be valid hex color"))]
    pub minimum_color: String,

    /// Font family for captions and labels
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,

    /// Font size for axis labels
    #[validate(range(min = 8, max = 72, message = "Font size must be between 8 and 72"))]
    pub font_size: u32,

    /// Whether to draw grid lines
    pub show_grid: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level or filter directive
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,

    /// Emit JSON lines instead of text
    pub json: bool,

    /// Optional log file path
    pub file: Option<String>,
}

impl Config {
    /// Field validation of every section.
    ///
    /// The date window is a selection, not a setting: a reversed window is
    /// accepted here and rejected when the selection is resolved.
    pub fn validate_all(&self) -> Result<(), ConfigError> {
        self.validate()?;
        Ok(())
    }

    /// Translates the logging section into the subscriber configuration.
    pub fn logging_config(&self) -> bikeshare_common::LoggingConfig {
        bikeshare_common::LoggingConfig {
            level: self.logging.level.clone(),
            json_format: self.logging.json,
            file_path: self.logging.file.clone(),
            ..bikeshare_common::LoggingConfig::default()
        }
    }
}

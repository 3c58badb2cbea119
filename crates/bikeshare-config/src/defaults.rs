//! Default values for every configuration section.
//!
//! The chart palette: a blue usage line,
//! red casual and blue registered bars, and a red usage line against blue
//! average, green maximum and purple minimum covariate lines.

use crate::schema::*;

/// Dataset path used when nothing else is configured.
pub const DEFAULT_CSV_PATH: &str = "dashboard/day.csv";

/// Output directory used when nothing else is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: DEFAULT_CSV_PATH.to_string(),
            start_date: None,
            end_date: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_OUTPUT_DIR.to_string(),
            render_charts: true,
            export_table: false,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 600,
            background_color: "#FFFFFF".to_string(),
            usage_color: "#0000FF".to_string(),
            usage_overlay_color: "#FF0000".to_string(),
            casual_color: "#FF0000".to_string(),
            registered_color: "#0000FF".to_string(),
            average_color: "#0000FF".to_string(),
            maximum_color: "#008000".to_string(),
            minimum_color: "#800080".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 16,
            show_grid: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = Config::default();
        assert_eq!(config.data.csv_path, "dashboard/day.csv");
        assert_eq!(config.output.directory, "output");
        assert!(config.output.render_charts);
        assert!(!config.output.export_table);
        assert!(config.data.start_date.is_none());
        assert!(config.data.end_date.is_none());
    }

    #[test]
    fn test_default_palette() {
        let charts = ChartsConfig::default();
        assert_eq!(charts.casual_color, "#FF0000");
        assert_eq!(charts.registered_color, "#0000FF");
        assert_eq!(charts.maximum_color, "#008000");
        assert_eq!(charts.minimum_color, "#800080");
    }
}

//! Error types and utilities for the bikeshare dashboard

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::DateRange;

/// Result type alias for bikeshare operations
pub type Result<T> = std::result::Result<T, BikeshareError>;

/// Main error type for bikeshare operations
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A date range whose start lies after its end
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A requested day outside the loaded dataset
    #[error("Requested date {requested} is outside the available range {available}")]
    OutOfBounds {
        requested: NaiveDate,
        available: DateRange,
    },

    /// Nothing to work with (empty dataset, empty table handed to a chart)
    #[error("No data available: {context}")]
    EmptyResult { context: String },

    /// A raw row that cannot be turned into a record
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV reading or writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Chart rendering errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BikeshareError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid range error
    pub fn invalid_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self::InvalidRange { start, end }
    }

    /// Create an empty result error
    pub fn empty(context: impl Into<String>) -> Self {
        Self::EmptyResult {
            context: context.into(),
        }
    }

    /// Create a malformed record error for a 1-based input line
    pub fn malformed_record(line: u64, msg: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: msg.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether the presentation layer can fall back to an empty view
    /// instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidRange { .. }
                | Self::OutOfBounds { .. }
                | Self::EmptyResult { .. }
                | Self::Validation { .. }
        )
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to BikeshareError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for BikeshareError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_error_creation() {
        let error = BikeshareError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = BikeshareError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let range_error = BikeshareError::invalid_range(date(2024, 1, 5), date(2024, 1, 1));
        assert_eq!(
            range_error.to_string(),
            "Invalid date range: start 2024-01-05 is after end 2024-01-01"
        );

        let malformed = BikeshareError::malformed_record(7, "missing field `cnt`");
        assert_eq!(
            malformed.to_string(),
            "Malformed record at line 7: missing field `cnt`"
        );

        let validation_error = BikeshareError::validation_field("Invalid width", "charts.width");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Invalid width"));
    }

    #[test]
    fn test_out_of_bounds_display() {
        let available = DateRange::new(date(2011, 1, 1), date(2012, 12, 31)).unwrap();
        let error = BikeshareError::OutOfBounds {
            requested: date(2013, 1, 1),
            available,
        };
        assert_eq!(
            error.to_string(),
            "Requested date 2013-01-01 is outside the available range 2011-01-01..=2012-12-31"
        );
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(BikeshareError::invalid_range(date(2024, 2, 1), date(2024, 1, 1)).is_recoverable());
        assert!(BikeshareError::empty("no rows").is_recoverable());
        assert!(BikeshareError::validation("bad").is_recoverable());

        assert!(!BikeshareError::malformed_record(2, "bad date").is_recoverable());
        assert!(!BikeshareError::config("missing").is_recoverable());
        assert!(!BikeshareError::graph("font").is_recoverable());
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped_error = BikeshareError::with_source("Failed to read file", io_error);

        assert!(wrapped_error.to_string().contains("Failed to read file"));
        assert!(wrapped_error.source().is_some());

        let config_source_error = BikeshareError::config_with_source(
            "Config loading failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        assert!(config_source_error.to_string().contains("Configuration error"));
        assert!(config_source_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: BikeshareError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let invalid_json = r#"{"invalid": json}"#;
        let serde_error = serde_json::from_str::<serde_json::Value>(invalid_json).unwrap_err();
        let error: BikeshareError = serde_error.into();

        assert!(error.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_chain_preservation() {
        let root_error = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let middle_error = BikeshareError::config_with_source("Middle layer", root_error);
        let top_error = BikeshareError::with_source("Top layer", middle_error);

        let mut current_error: &dyn std::error::Error = &top_error;
        let mut error_count = 0;

        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }

        assert_eq!(error_count, 2);
    }
}

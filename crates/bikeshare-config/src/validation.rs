//! Validation utilities and regex patterns

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #FF0000)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a log level.
///
/// Accepts a bare level or a comma-separated filter whose every directive
/// ends in a known level (`info,bikeshare_graphs=debug`).
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if level.trim().is_empty() {
        return Err(ValidationError::new("empty_log_level"));
    }

    let all_known = level.split(',').map(str::trim).all(|directive| {
        let level = directive.rsplit('=').next().unwrap_or(directive);
        LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
    });

    if all_known {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon stays allowed for Windows drive letters
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_regex() {
        assert!(HEX_COLOR_REGEX.is_match("#FFFFFF"));
        assert!(HEX_COLOR_REGEX.is_match("#008000"));
        assert!(HEX_COLOR_REGEX.is_match("#abc123"));

        assert!(!HEX_COLOR_REGEX.is_match("FFFFFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#FFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#FFFFFFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#GGGGGG"));
        assert!(!HEX_COLOR_REGEX.is_match(""));
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_log_level("info").is_ok());
        assert!(validate_log_level("DEBUG").is_ok());
        assert!(validate_log_level("info,bikeshare_graphs=trace").is_ok());

        assert!(validate_log_level("").is_err());
        assert!(validate_log_level("verbose").is_err());
        assert!(validate_log_level("info,bikeshare_data=loud").is_err());
    }

    #[test]
    fn test_validate_file_path() {
        assert!(validate_file_path("dashboard/day.csv").is_ok());
        assert!(validate_file_path("/var/data/day.csv").is_ok());
        assert!(validate_file_path("C:\\data\\day.csv").is_ok());

        assert!(validate_file_path("").is_err());
        assert!(validate_file_path("day<1>.csv").is_err());
        assert!(validate_file_path("day?.csv").is_err());
    }
}

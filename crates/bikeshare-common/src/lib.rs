//! # Bikeshare Common
//!
//! Shared types, errors and utilities for the bikeshare dashboard.
//!
//! This crate provides the record type every other crate aggregates over,
//! the error taxonomy used across the workspace, and the logging bootstrap.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{BikeshareError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
pub use types::*;
pub use utils::*;

//! # Bikeshare Config
//!
//! Type-safe configuration for the bikeshare dashboard.
//!
//! Configuration is read from YAML, overridden from the environment and
//! validated before anything else starts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::*;

//! # Bikeshare Data
//!
//! The raw side of the dashboard: loading the daily CSV once, holding it as
//! an immutable [`RecordStore`], and selecting the records of a date range.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod filter;
pub mod loader;
pub mod store;

pub use filter::{filter_in_range, filter_records};
pub use loader::{load_csv_path, load_csv_reader};
pub use store::{RecordStore, SharedStore};

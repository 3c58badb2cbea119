//! Core record and range types shared across the workspace.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BikeshareError, Result};

/// One raw observation row: the rental activity and weather of a single day.
///
/// `day` is always a canonical calendar date. Loaders strip time-of-day and
/// offsets before constructing a record, so two records for the same day
/// always compare equal on `day`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Calendar day of the observation.
    pub day: NaiveDate,
    /// Total rentals; expected to equal `casual_count + registered_count`.
    pub rental_count: u32,
    /// Rentals by casual (unregistered) users.
    pub casual_count: u32,
    /// Rentals by registered users.
    pub registered_count: u32,
    /// Normalized temperature.
    pub temperature: f64,
    /// Normalized wind speed.
    pub wind_speed: f64,
}

impl DailyRecord {
    /// Creates a record.
    pub fn new(
        day: NaiveDate,
        rental_count: u32,
        casual_count: u32,
        registered_count: u32,
        temperature: f64,
        wind_speed: f64,
    ) -> Self {
        Self {
            day,
            rental_count,
            casual_count,
            registered_count,
            temperature,
            wind_speed,
        }
    }

    /// Whether the rental count equals the casual plus registered counts.
    pub fn counts_consistent(&self) -> bool {
        u64::from(self.rental_count)
            == u64::from(self.casual_count) + u64::from(self.registered_count)
    }
}

/// An inclusive range of calendar days, `start <= end` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end` with `InvalidRange`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(BikeshareError::invalid_range(start, end));
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `day` lies in `start..=end`.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Whether `other` lies entirely inside this range.
    pub fn covers(&self, other: &DateRange) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    /// Number of calendar days in the range, both ends included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

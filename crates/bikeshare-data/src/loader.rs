//! CSV loading for the daily rental export.
//!
//! The loader is strict: one bad row fails the whole load, so the rest of the
//! application never sees a partial dataset. Day values are canonicalised to
//! calendar dates here and nowhere else.

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument};

use bikeshare_common::{canonical_day, BikeshareError, DailyRecord, Result};

/// Required columns as `(canonical name, alias used by day.csv)`.
const REQUIRED_COLUMNS: [(&str, &str); 6] = [
    ("day", "dteday"),
    ("rental_count", "cnt"),
    ("casual_count", "casual"),
    ("registered_count", "registered"),
    ("temperature", "temp"),
    ("wind_speed", "windspeed"),
];

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "dteday")]
    day: String,
    #[serde(alias = "cnt")]
    rental_count: i64,
    #[serde(alias = "casual")]
    casual_count: i64,
    #[serde(alias = "registered")]
    registered_count: i64,
    #[serde(alias = "temp")]
    temperature: f64,
    #[serde(alias = "windspeed")]
    wind_speed: f64,
}

impl RawRow {
    fn into_record(self, line: u64) -> Result<DailyRecord> {
        let day = canonical_day(&self.day).ok_or_else(|| {
            BikeshareError::malformed_record(line, format!("unparseable date '{}'", self.day))
        })?;

        let rental_count = count(line, "rental_count", self.rental_count)?;
        let casual_count = count(line, "casual_count", self.casual_count)?;
        let registered_count = count(line, "registered_count", self.registered_count)?;
        let temperature = finite(line, "temperature", self.temperature)?;
        let wind_speed = finite(line, "wind_speed", self.wind_speed)?;

        Ok(DailyRecord {
            day,
            rental_count,
            casual_count,
            registered_count,
            temperature,
            wind_speed,
        })
    }
}

fn count(line: u64, field: &str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        BikeshareError::malformed_record(
            line,
            format!("{field} must be a non-negative integer, got {value}"),
        )
    })
}

fn finite(line: u64, field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BikeshareError::malformed_record(
            line,
            format!("{field} must be finite, got {value}"),
        ))
    }
}

/// Loads every record of a CSV file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_csv_path<P: AsRef<Path>>(path: P) -> Result<Vec<DailyRecord>> {
    let file = File::open(path.as_ref())?;
    let records = load_csv_reader(file)?;
    info!("Loaded {} daily records", records.len());
    Ok(records)
}

/// Loads every record from CSV text with a header row.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Vec<DailyRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    check_required_columns(&headers)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        // header is line 1
        let fallback_line = index as u64 + 2;
        let row = row.map_err(|e| {
            let line = e.position().map_or(fallback_line, csv::Position::line);
            BikeshareError::malformed_record(line, e.to_string())
        })?;
        let line = row.position().map_or(fallback_line, csv::Position::line);

        let raw: RawRow = row
            .deserialize(Some(&headers))
            .map_err(|e| BikeshareError::malformed_record(line, e.to_string()))?;
        records.push(raw.into_record(line)?);
    }

    debug!("Parsed {} rows", records.len());
    Ok(records)
}

fn check_required_columns(headers: &csv::StringRecord) -> Result<()> {
    for (canonical, alias) in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == canonical || h == alias) {
            return Err(BikeshareError::malformed_record(
                1,
                format!("missing required column '{alias}' (or '{canonical}')"),
            ));
        }
    }
    Ok(())
}

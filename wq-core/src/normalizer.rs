//! Raw row to [`MeasurementRecord`] conversion.
//!
//! This is the lenient path used for bulk loads: every field degrades to
//! absent on its own and a record is always produced. The strict path for
//! new entries lives in [`crate::entry`].

use crate::parse::{parse_coordinates, parse_date, parse_number, parse_ph};
use crate::raw_row::{self, RawRow, RawValue};
use crate::record::{MeasurementRecord, Metric, Metrics};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Knobs for the normaliser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Year given to dates written without one (`DD-MM`, `DD-Mon`).
    pub default_year: i32,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            default_year: Local::now().year(),
        }
    }
}

impl NormalizeOptions {
    pub fn with_default_year(default_year: i32) -> Self {
        Self { default_year }
    }
}

/// Free-text cell content; numbers and dates are rendered as text.
fn text_cell(row: &RawRow, column: &str) -> Option<String> {
    match row.get(column)? {
        RawValue::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        RawValue::Number(n) => Some(n.to_string()),
        RawValue::Date(d) => Some(d.format("%d-%m-%Y").to_string()),
        _ => None,
    }
}

fn date_cell(row: &RawRow, column: &str, options: &NormalizeOptions) -> Option<NaiveDate> {
    row.get(column)
        .and_then(|value| parse_date(value, options.default_year))
}

/// Normalise one raw row.
///
/// The display date comes from `Datum`. Only a row without a `Datum`
/// column falls back to `Meetdag`; an empty or unreadable `Datum` cell
/// leaves the record undated. Unknown columns are ignored.
pub fn normalize(row: &RawRow, options: &NormalizeOptions) -> MeasurementRecord {
    let measurement_day = date_cell(row, raw_row::MEASUREMENT_DAY, options);
    let measurement_date = match row.get(raw_row::DISPLAY_DATE) {
        Some(value) => parse_date(value, options.default_year),
        None => measurement_day,
    };

    let metrics: Metrics = Metric::ALL
        .into_iter()
        .filter_map(|metric| {
            let value = row.get(metric.column()).and_then(parse_number)?;
            Some((metric, value))
        })
        .collect();

    MeasurementRecord {
        location: row.text(raw_row::LOCATION).map(str::to_string),
        measurement_day,
        measurement_date,
        time_of_day: text_cell(row, raw_row::TIME_OF_DAY),
        coordinates: row.get(raw_row::COORDINATES).and_then(parse_coordinates),
        ph: row.get(raw_row::PH).and_then(parse_ph),
        metrics,
        exposure: text_cell(row, raw_row::EXPOSURE),
        sample_point: text_cell(row, raw_row::SAMPLE_POINT),
    }
}

/// Normalise a bulk load. Every row produces a record, blank rows excepted.
pub fn normalize_all(rows: &[RawRow], options: &NormalizeOptions) -> Vec<MeasurementRecord> {
    let records: Vec<MeasurementRecord> = rows
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| normalize(row, options))
        .collect();
    let undated = records
        .iter()
        .filter(|r| r.measurement_date.is_none())
        .count();
    let unplaced = records.iter().filter(|r| r.coordinates.is_none()).count();
    log::info!(
        "normalizer: Normalized {} of {} rows ({} without date, {} without coordinates)",
        records.len(),
        rows.len(),
        undated,
        unplaced
    );
    records
}

//! CSV loading of the measurement spreadsheet.
//!
//! The first line holds the column names; they are trimmed before use.
//! Every cell becomes text (or empty) and is left to the normaliser, so a
//! malformed cell never fails a load. Only a broken CSV structure does.
//!
//! # Example CSV
//! ```text
//! Locatie,Meetdag,Datum,Coordinaten,PH,Temperatuur
//! Amstel,12-06-2024,12-06-2024,"52,3633, 4,9021",8.3-8.7,19.5
//! ```
//!
//! Sheets exported with a Dutch locale use `;` as delimiter; this is
//! detected from the header line.

use std::io::Read;
use wq_core::normalizer::{normalize_all, NormalizeOptions};
use wq_core::raw_row::{RawRow, RawValue};
use wq_core::record::MeasurementRecord;

/// Pick `;` when the header line uses it and has no commas.
pub fn sniff_delimiter(csv_data: &str) -> u8 {
    let header = csv_data.lines().next().unwrap_or("");
    if header.contains(';') && !header.contains(',') {
        b';'
    } else {
        b','
    }
}

/// Read raw rows from any reader using `delimiter`.
pub fn read_rows<R: Read>(reader: R, delimiter: u8) -> anyhow::Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row = RawRow::new();
        for (column, cell) in headers.iter().zip(record.iter()) {
            if column.is_empty() {
                continue;
            }
            row.insert(column, RawValue::text(cell));
        }
        rows.push(row);
    }
    log::info!("loader: Read {} rows with {} columns", rows.len(), headers.len());
    Ok(rows)
}

/// Read raw rows from CSV text.
pub fn load_rows(csv_data: &str) -> anyhow::Result<Vec<RawRow>> {
    read_rows(csv_data.as_bytes(), sniff_delimiter(csv_data))
}

/// Read and normalise CSV text in one go (lenient bulk-load path).
pub fn load_records(
    csv_data: &str,
    options: &NormalizeOptions,
) -> anyhow::Result<Vec<MeasurementRecord>> {
    let rows = load_rows(csv_data)?;
    Ok(normalize_all(&rows, options))
}

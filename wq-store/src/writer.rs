//! Writing records back into the spreadsheet column layout.
//!
//! Output always carries the full [`COLUMN_LAYOUT`] header. Dates are
//! written day first, coordinates as `"lat, lon"`, absent fields as empty
//! cells, so a written file loads back into equal records.

use std::io::Write;
use wq_core::raw_row::{self, RawRow, RawValue, COLUMN_LAYOUT};
use wq_core::record::{MeasurementRecord, Metric};
use wq_utils::dates::format_display_date;

/// Render one record as a row of text cells.
pub fn record_to_row(record: &MeasurementRecord) -> RawRow {
    let mut row = RawRow::new();
    row.insert(raw_row::LOCATION, RawValue::from(record.location.clone()));
    row.insert(
        raw_row::MEASUREMENT_DAY,
        RawValue::from(record.measurement_day.as_ref().map(format_display_date)),
    );
    row.insert(
        raw_row::DISPLAY_DATE,
        RawValue::from(record.measurement_date.as_ref().map(format_display_date)),
    );
    row.insert(raw_row::TIME_OF_DAY, RawValue::from(record.time_of_day.clone()));
    row.insert(
        raw_row::COORDINATES,
        RawValue::from(record.coordinates.map(|c| c.to_string())),
    );
    row.insert(raw_row::PH, RawValue::from(record.ph.map(|v| v.to_string())));
    for metric in Metric::ALL {
        row.insert(
            metric.column(),
            RawValue::from(record.metric(metric).map(|v| v.to_string())),
        );
    }
    row.insert(raw_row::EXPOSURE, RawValue::from(record.exposure.clone()));
    row.insert(raw_row::SAMPLE_POINT, RawValue::from(record.sample_point.clone()));
    row
}

/// Write `records` as comma separated CSV with a header line.
pub fn write_records<W: Write>(writer: W, records: &[MeasurementRecord]) -> anyhow::Result<()> {
    write_delimited(writer, records, b',')
}

/// Write `records` as CSV using `delimiter`.
pub fn write_delimited<W: Write>(
    writer: W,
    records: &[MeasurementRecord],
    delimiter: u8,
) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    wtr.write_record(COLUMN_LAYOUT)?;
    for record in records {
        let row = record_to_row(record);
        wtr.write_record(
            COLUMN_LAYOUT
                .iter()
                .map(|column| row.text(column).unwrap_or("")),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

/// CSV text for a selection of records, e.g. for a download.
pub fn export_csv(records: &[MeasurementRecord]) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, records)?;
    Ok(String::from_utf8(buffer)?)
}

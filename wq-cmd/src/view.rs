//! Read-only commands: listing, map output, export and day counts.

use anyhow::Context;
use chrono::NaiveDate;
use log::info;
use std::path::PathBuf;
use wq_core::date_range::DateRange;
use wq_store::models::{PopupField, RecordRow};
use wq_store::{writer, RecordStore};
use wq_utils::dates::export_file_name;

/// Resolve an optional `from`/`to` pair against the store's own date bounds.
///
/// Returns `None` when neither end was given.
pub fn selection_range(
    store: &RecordStore,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> anyhow::Result<Option<DateRange>> {
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let start = from.or(store.earliest_date()).or(to);
    let end = to.or(store.latest_date()).or(from);
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(DateRange::new(start, end)?)),
        _ => Ok(None),
    }
}

fn format_row(row: &RecordRow) -> String {
    let number = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
    format!(
        "{:>4}  {:<10}  {:<28}  {:<22}  pH {:<5}  {} C",
        row.ordinal,
        row.date,
        row.location,
        row.coordinates,
        number(row.ph),
        number(row.temperature)
    )
}

pub fn run_list(
    store: &RecordStore,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    let range = selection_range(store, from, to)?;
    let rows = store.record_rows(range.as_ref());
    info!("Listing {} of {} measurements", rows.len(), store.len());
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            println!("{}", format_row(row));
        }
    }
    Ok(())
}

pub fn run_map(
    store: &RecordStore,
    date: Option<NaiveDate>,
    fields: &[PopupField],
) -> anyhow::Result<()> {
    let Some(date) = date.or(store.earliest_date()) else {
        anyhow::bail!("no dated measurements, pass --date");
    };
    let view = store.map_view(date, fields);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

pub fn run_export(
    store: &RecordStore,
    from: NaiveDate,
    to: NaiveDate,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let range = DateRange::new(from, to)?;
    let selected: Vec<_> = store
        .filter_by_range(&range)
        .into_iter()
        .map(|(_, record)| record.clone())
        .collect();
    let out = out.unwrap_or_else(|| PathBuf::from(export_file_name(&from, &to)));
    let csv = writer::export_csv(&selected)?;
    std::fs::write(&out, csv).with_context(|| format!("failed to write {}", out.display()))?;
    info!("Exported {} measurements to {}", selected.len(), out.display());
    Ok(())
}

pub fn run_days(store: &RecordStore, from: NaiveDate, to: NaiveDate) -> anyhow::Result<()> {
    let range = DateRange::new(from, to)?;
    for day in store.daily_counts(&range) {
        println!("{}  {}", day.date, day.count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wq_core::record::MeasurementRecord;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> RecordStore {
        let dated = |location: &str, date| MeasurementRecord {
            location: Some(location.to_string()),
            measurement_date: Some(date),
            ..Default::default()
        };
        RecordStore::from_records(vec![
            dated("A", ymd(2024, 1, 5)),
            dated("B", ymd(2024, 3, 1)),
        ])
    }

    #[test]
    fn open_ended_selection_uses_store_bounds() {
        let store = store();
        assert_eq!(selection_range(&store, None, None).unwrap(), None);

        let range = selection_range(&store, Some(ymd(2024, 2, 1)), None)
            .unwrap()
            .unwrap();
        assert_eq!(range.start(), ymd(2024, 2, 1));
        assert_eq!(range.end(), ymd(2024, 3, 1));

        let range = selection_range(&store, None, Some(ymd(2024, 1, 31)))
            .unwrap()
            .unwrap();
        assert_eq!(range.start(), ymd(2024, 1, 5));
    }

    #[test]
    fn reversed_selection_is_an_error() {
        let store = store();
        assert!(selection_range(&store, Some(ymd(2024, 3, 1)), Some(ymd(2024, 1, 1))).is_err());
    }

    #[test]
    fn export_writes_only_the_selection() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export.csv");
        run_export(&store(), ymd(2024, 1, 1), ymd(2024, 1, 31), Some(out.clone())).unwrap();
        let written = std::fs::read_to_string(out).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Locatie,"));
        assert!(lines[1].starts_with("A,"));
    }
}

//! In-memory record store for water quality measurements.
//!
//! A [`RecordStore`] holds the normalised records of one user session in
//! load order. A record's identity is its ordinal position; batch deletes
//! are resolved against the ordinals as they were before the call.
//!
//! Around the store:
//! - [`loader`] / [`writer`] read and write the spreadsheet column layout as CSV
//! - [`persistence`] is the backing-file collaborator ([`persistence::RecordSource`])
//! - [`cache`] memoises a normalised load and can be invalidated explicitly
//! - [`session`] pairs a store with its cache and persists every mutation
//! - [`queries`] produce serialisable views ([`models`]) for map and table output
//!
//! # Usage
//!
//! ```rust
//! use wq_core::normalizer::NormalizeOptions;
//! use wq_store::{loader, RecordStore};
//!
//! let csv = "Locatie,Meetdag,Coordinaten,PH\nAmstel,01-01-2024,\"52.36, 4.90\",7.2\n";
//! let records = loader::load_records(csv, &NormalizeOptions::with_default_year(2024)).unwrap();
//! let store = RecordStore::from_records(records);
//! assert_eq!(store.len(), 1);
//! ```

pub mod cache;
pub mod loader;
pub mod models;
pub mod persistence;
pub mod queries;
pub mod session;
pub mod writer;

pub use queries::{map_center, popup_text, DEFAULT_CENTER};

use chrono::NaiveDate;
use std::collections::BTreeSet;
use wq_core::date_range::DateRange;
use wq_core::record::MeasurementRecord;

/// Ordered collection of the records of one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<MeasurementRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<MeasurementRecord>) -> Self {
        Self { records }
    }

    /// Add a record at the end and return its ordinal.
    pub fn append(&mut self, record: MeasurementRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, ordinal: usize) -> Option<&MeasurementRecord> {
        self.records.get(ordinal)
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    /// All records with their ordinals.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &MeasurementRecord)> {
        self.records.iter().enumerate()
    }

    /// Records measured exactly on `date`. Undated records never match.
    pub fn filter_by_date(&self, date: NaiveDate) -> Vec<(usize, &MeasurementRecord)> {
        self.iter()
            .filter(|(_, r)| r.measurement_date == Some(date))
            .collect()
    }

    /// Records measured within `range`, both ends included. Undated records
    /// never match.
    pub fn filter_by_range(&self, range: &DateRange) -> Vec<(usize, &MeasurementRecord)> {
        self.iter()
            .filter(|(_, r)| r.measurement_date.is_some_and(|d| range.contains(d)))
            .collect()
    }

    /// Remove the records at the given ordinals in one pass.
    ///
    /// Ordinals refer to positions before the call. Duplicates and
    /// out-of-range ordinals are ignored. Returns the number removed.
    pub fn delete<I: IntoIterator<Item = usize>>(&mut self, ordinals: I) -> usize {
        let doomed: BTreeSet<usize> = ordinals
            .into_iter()
            .filter(|ordinal| *ordinal < self.records.len())
            .collect();
        if doomed.is_empty() {
            return 0;
        }
        let mut position = 0usize;
        self.records.retain(|_| {
            let keep = !doomed.contains(&position);
            position += 1;
            keep
        });
        log::info!("store: Deleted {} records, {} left", doomed.len(), self.records.len());
        doomed.len()
    }

    /// Earliest measurement date, the default date selection.
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.records.iter().filter_map(|r| r.measurement_date).min()
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.records.iter().filter_map(|r| r.measurement_date).max()
    }

    /// Swap in a freshly loaded collection.
    pub fn replace_all(&mut self, records: Vec<MeasurementRecord>) {
        self.records = records;
    }
}

//! Memoised normalised load of a [`RecordSource`].
//!
//! The first read loads and normalises; later reads return the cached
//! collection until [`RecordCache::invalidate`] is called.

use crate::persistence::RecordSource;
use wq_core::normalizer::{normalize_all, NormalizeOptions};
use wq_core::record::MeasurementRecord;

#[derive(Debug)]
pub struct RecordCache<S> {
    source: S,
    options: NormalizeOptions,
    records: Option<Vec<MeasurementRecord>>,
}

impl<S: RecordSource> RecordCache<S> {
    pub fn new(source: S, options: NormalizeOptions) -> Self {
        Self {
            source,
            options,
            records: None,
        }
    }

    /// The normalised collection, loading it on first use.
    pub fn records(&mut self) -> anyhow::Result<&[MeasurementRecord]> {
        if self.records.is_none() {
            let rows = self.source.load()?;
            let records = normalize_all(&rows, &self.options);
            log::info!("cache: Loaded {} records", records.len());
            self.records = Some(records);
        }
        Ok(self.records.as_deref().unwrap_or_default())
    }

    /// Drop the cached collection; the next read goes to the source.
    pub fn invalidate(&mut self) {
        if self.records.take().is_some() {
            log::debug!("cache: invalidated");
        }
    }

    /// Invalidate and load again.
    pub fn reload(&mut self) -> anyhow::Result<&[MeasurementRecord]> {
        self.invalidate();
        self.records()
    }

    pub fn is_loaded(&self) -> bool {
        self.records.is_some()
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

//! One user's working set: a [`RecordStore`] backed by a [`RecordCache`].
//!
//! Every mutation is written through to the backing store right away. When
//! that write fails the in-memory change stays and the outcome says so.

use crate::cache::RecordCache;
use crate::persistence::RecordSource;
use crate::RecordStore;
use chrono::NaiveDate;
use wq_core::entry::NewEntry;
use wq_core::error::ValidationError;

/// What happened to the backing store after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    Saved,
    /// The in-memory change was kept; the backing store is behind.
    SaveFailed(String),
    /// Nothing changed, nothing was written.
    Unchanged,
}

impl Persisted {
    pub fn is_saved(&self) -> bool {
        matches!(self, Persisted::Saved)
    }
}

#[derive(Debug)]
pub struct Session<S> {
    cache: RecordCache<S>,
    store: RecordStore,
}

impl<S: RecordSource> Session<S> {
    /// Load the cached collection into a fresh store.
    pub fn open(mut cache: RecordCache<S>) -> anyhow::Result<Self> {
        let records = cache.records()?.to_vec();
        Ok(Self {
            cache,
            store: RecordStore::from_records(records),
        })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn cache(&self) -> &RecordCache<S> {
        &self.cache
    }

    /// Validate `entry`, append it and persist the collection.
    ///
    /// Returns the new record's ordinal.
    pub fn submit(
        &mut self,
        entry: NewEntry,
        today: NaiveDate,
    ) -> Result<(usize, Persisted), ValidationError> {
        let record = entry.validate(today, self.cache.options())?;
        let ordinal = self.store.append(record);
        log::info!("session: Added record {}", ordinal);
        Ok((ordinal, self.persist()))
    }

    /// Delete the records at `ordinals` (positions before the call) and
    /// persist. Returns how many were removed.
    pub fn delete<I: IntoIterator<Item = usize>>(&mut self, ordinals: I) -> (usize, Persisted) {
        let removed = self.store.delete(ordinals);
        if removed == 0 {
            return (0, Persisted::Unchanged);
        }
        (removed, self.persist())
    }

    /// Discard the in-memory store and load again from the backing store.
    pub fn refresh(&mut self) -> anyhow::Result<()> {
        let records = self.cache.reload()?.to_vec();
        self.store.replace_all(records);
        Ok(())
    }

    fn persist(&mut self) -> Persisted {
        match self.cache.source_mut().save(self.store.records()) {
            Ok(()) => {
                self.cache.invalidate();
                Persisted::Saved
            }
            Err(err) => {
                log::warn!("session: Could not save measurements: {:#}", err);
                Persisted::SaveFailed(format!("{:#}", err))
            }
        }
    }
}

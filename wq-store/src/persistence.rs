//! Backing-store collaborators.
//!
//! A [`RecordSource`] hands raw rows to the normaliser and takes the full
//! record collection back for saving. [`CsvFile`] is the file-backed
//! implementation; [`MemorySource`] keeps everything in memory.

use crate::{loader, writer};
use anyhow::Context;
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use wq_core::raw_row::RawRow;
use wq_core::record::MeasurementRecord;

pub trait RecordSource {
    /// Read every row of the backing store.
    fn load(&self) -> anyhow::Result<Vec<RawRow>>;

    /// Replace the backing store contents with `records`.
    fn save(&mut self, records: &[MeasurementRecord]) -> anyhow::Result<()>;
}

/// A CSV file in the spreadsheet column layout.
///
/// The delimiter found on load is reused on save, so a `;` separated sheet
/// stays `;` separated. A file that did not exist yet is written with `,`.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvFile {
    path: PathBuf,
    delimiter: Cell<u8>,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: Cell::new(b','),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delimiter used by the next save.
    pub fn delimiter(&self) -> u8 {
        self.delimiter.get()
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn write_and_replace(&self, tmp: &Path, records: &[MeasurementRecord]) -> anyhow::Result<()> {
        let file =
            fs::File::create(tmp).with_context(|| format!("failed to create {}", tmp.display()))?;
        writer::write_delimited(file, records, self.delimiter())
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))
    }
}

impl RecordSource for CsvFile {
    /// A file that does not exist yet loads as an empty collection.
    fn load(&self) -> anyhow::Result<Vec<RawRow>> {
        if !self.path.exists() {
            log::info!(
                "persistence: {} not found, starting with no measurements",
                self.path.display()
            );
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let delimiter = loader::sniff_delimiter(&data);
        let rows = loader::read_rows(data.as_bytes(), delimiter)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        self.delimiter.set(delimiter);
        Ok(rows)
    }

    /// Written to a sibling temporary file first, then renamed over the
    /// target, so a failed write leaves the previous file intact. The
    /// temporary file is removed when the write fails.
    fn save(&mut self, records: &[MeasurementRecord]) -> anyhow::Result<()> {
        let tmp = self.temp_path();
        if let Err(err) = self.write_and_replace(&tmp, records) {
            if tmp.exists() {
                if let Err(cleanup) = fs::remove_file(&tmp) {
                    log::warn!("persistence: Could not remove {}: {}", tmp.display(), cleanup);
                }
            }
            return Err(err);
        }
        log::info!(
            "persistence: Saved {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-memory backing store. Saves can be made to fail on purpose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySource {
    rows: Vec<RawRow>,
    saves: usize,
    fail_saves: bool,
}

impl MemorySource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    /// Make every following save fail (or succeed again).
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }
}

impl RecordSource for MemorySource {
    fn load(&self) -> anyhow::Result<Vec<RawRow>> {
        Ok(self.rows.clone())
    }

    fn save(&mut self, records: &[MeasurementRecord]) -> anyhow::Result<()> {
        if self.fail_saves {
            anyhow::bail!("backing store is read-only");
        }
        self.rows = records.iter().map(writer::record_to_row).collect();
        self.saves += 1;
        Ok(())
    }
}

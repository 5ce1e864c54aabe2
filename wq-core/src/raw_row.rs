//! The untyped boundary between a spreadsheet loader and the normaliser.
//!
//! A [`RawRow`] is what a data loader hands over: trimmed column names mapped
//! to loosely typed cell values. Nothing past the normaliser touches these.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const LOCATION: &str = "Locatie";
pub const MEASUREMENT_DAY: &str = "Meetdag";
pub const DISPLAY_DATE: &str = "Datum";
pub const TIME_OF_DAY: &str = "Tijdstip";
pub const COORDINATES: &str = "Coordinaten";
pub const PH: &str = "PH";
pub const TEMPERATURE: &str = "Temperatuur";
pub const ORP: &str = "ORP";
pub const EC: &str = "EC";
pub const CF: &str = "CF";
pub const TDS: &str = "TDS";
pub const HUMIDITY: &str = "Humidity";
pub const OUTDOOR_TEMPERATURE: &str = "Buitentemperatuur";
pub const EXPOSURE: &str = "zon/schaduw";
pub const SAMPLE_POINT: &str = "meetpunt";

/// Column order used when a collection is written back out.
pub const COLUMN_LAYOUT: [&str; 15] = [
    LOCATION,
    MEASUREMENT_DAY,
    DISPLAY_DATE,
    TIME_OF_DAY,
    COORDINATES,
    PH,
    TEMPERATURE,
    ORP,
    EC,
    CF,
    TDS,
    HUMIDITY,
    OUTDOOR_TEMPERATURE,
    EXPOSURE,
    SAMPLE_POINT,
];

/// A single spreadsheet cell as delivered by a loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Empty,
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl RawValue {
    /// Wrap a text cell, collapsing blank text to [`RawValue::Empty`].
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.trim().is_empty() {
            RawValue::Empty
        } else {
            RawValue::Text(s)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed text content, if this cell holds non-blank text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::text(value)
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(value: NaiveDate) -> Self {
        RawValue::Date(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Empty, Into::into)
    }
}

/// One spreadsheet row keyed by trimmed column name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, RawValue>")]
pub struct RawRow(BTreeMap<String, RawValue>);

impl From<BTreeMap<String, RawValue>> for RawRow {
    fn from(cells: BTreeMap<String, RawValue>) -> Self {
        RawRow::from_pairs(cells)
    }
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<RawValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut row = RawRow::new();
        for (column, value) in pairs {
            row.insert(column.as_ref(), value);
        }
        row
    }

    /// Insert a cell. The column name is trimmed first.
    pub fn insert(&mut self, column: &str, value: impl Into<RawValue>) {
        self.0.insert(column.trim().to_string(), value.into());
    }

    /// The cell under `column`, or `None` when the column is absent.
    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.0.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Trimmed, non-blank text under `column`.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(RawValue::as_text)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(RawValue::is_empty)
    }
}

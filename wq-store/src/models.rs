//! Serialisable view models produced by the presentation queries.
//!
//! All structs derive `Serialize` so the command line can print them as JSON.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use wq_core::classifier::SafetyCategory;
use wq_core::raw_row;
use wq_core::record::{MeasurementRecord, Metric};

/// A field the user can choose to show in a marker popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PopupField {
    Ph,
    Metric(Metric),
}

impl PopupField {
    /// `PH` and `Temperatuur`.
    pub const DEFAULT_SELECTION: [PopupField; 2] =
        [PopupField::Ph, PopupField::Metric(Metric::Temperature)];

    pub fn column(&self) -> &'static str {
        match self {
            PopupField::Ph => raw_row::PH,
            PopupField::Metric(metric) => metric.column(),
        }
    }

    pub fn value(&self, record: &MeasurementRecord) -> Option<f64> {
        match self {
            PopupField::Ph => record.ph,
            PopupField::Metric(metric) => record.metric(*metric),
        }
    }
}

impl fmt::Display for PopupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for PopupField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(raw_row::PH) {
            return Ok(PopupField::Ph);
        }
        s.parse::<Metric>()
            .map(PopupField::Metric)
            .map_err(|_| format!("unknown popup field '{}'", s.trim()))
    }
}

/// One map marker.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapMarker {
    /// Ordinal of the record in the store.
    pub ordinal: usize,
    pub latitude: f64,
    pub longitude: f64,
    /// Popup HTML.
    pub popup: String,
    pub category: SafetyCategory,
    /// Colour name for `category`.
    pub color: &'static str,
}

/// Markers for one day plus the point the map centres on.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapView {
    pub center: (f64, f64),
    pub markers: Vec<MapMarker>,
}

/// One line of the manage listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordRow {
    pub ordinal: usize,
    pub location: String,
    /// `DD-MM-YYYY`, empty when undated.
    pub date: String,
    /// `lat, lon`, empty when the record has no usable coordinates.
    pub coordinates: String,
    pub ph: Option<f64>,
    pub temperature: Option<f64>,
}

/// Number of measurements taken on one day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayCount {
    pub date: String,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_field_parses_column_names() {
        assert_eq!("PH".parse::<PopupField>(), Ok(PopupField::Ph));
        assert_eq!("ph".parse::<PopupField>(), Ok(PopupField::Ph));
        assert_eq!(
            "Temperatuur".parse::<PopupField>(),
            Ok(PopupField::Metric(Metric::Temperature))
        );
        assert!("Kleur".parse::<PopupField>().is_err());
    }

    #[test]
    fn popup_field_reads_record_values() {
        let mut record = MeasurementRecord {
            ph: Some(7.2),
            ..Default::default()
        };
        record.metrics.set(Metric::Ec, Some(410.0));
        assert_eq!(PopupField::Ph.value(&record), Some(7.2));
        assert_eq!(PopupField::Metric(Metric::Ec).value(&record), Some(410.0));
        assert_eq!(PopupField::Metric(Metric::Tds).value(&record), None);
        assert_eq!(PopupField::Metric(Metric::Ec).to_string(), "EC");
    }
}

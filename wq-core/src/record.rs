use crate::raw_row;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Renders as `"lat, lon"`, the layout the coordinate parser reads back.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// The numeric measurements recorded next to pH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    Temperature,
    Orp,
    Ec,
    Cf,
    Tds,
    Humidity,
    OutdoorTemperature,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Temperature,
        Metric::Orp,
        Metric::Ec,
        Metric::Cf,
        Metric::Tds,
        Metric::Humidity,
        Metric::OutdoorTemperature,
    ];

    /// Spreadsheet column holding this metric.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Temperature => raw_row::TEMPERATURE,
            Metric::Orp => raw_row::ORP,
            Metric::Ec => raw_row::EC,
            Metric::Cf => raw_row::CF,
            Metric::Tds => raw_row::TDS,
            Metric::Humidity => raw_row::HUMIDITY,
            Metric::OutdoorTemperature => raw_row::OUTDOOR_TEMPERATURE,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.column().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown metric '{}'", s))
    }
}

/// Metric readings of one record. A metric without a reading is simply absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics(BTreeMap<Metric, f64>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0.get(&metric).copied()
    }

    /// Record a reading; `None` clears it.
    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        match value {
            Some(v) => {
                self.0.insert(metric, v);
            }
            None => {
                self.0.remove(&metric);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.0.iter().map(|(m, v)| (*m, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Metric, f64)> for Metrics {
    fn from_iter<I: IntoIterator<Item = (Metric, f64)>>(iter: I) -> Self {
        Metrics(iter.into_iter().collect())
    }
}

/// One observation at one location on one day.
///
/// Records are immutable once normalised. Any field may be absent when the
/// source cell was missing or could not be parsed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Trimmed and non-empty when present.
    pub location: Option<String>,
    /// The `Meetdag` column as read.
    pub measurement_day: Option<NaiveDate>,
    /// The date used for filtering and display (`Datum`, or `Meetdag` when the
    /// row has no `Datum` column).
    pub measurement_date: Option<NaiveDate>,
    pub time_of_day: Option<String>,
    pub coordinates: Option<Coordinates>,
    /// Resolved pH; the midpoint when the source held a range.
    pub ph: Option<f64>,
    pub metrics: Metrics,
    /// Sun or shade at the sample point (`zon/schaduw`).
    pub exposure: Option<String>,
    pub sample_point: Option<String>,
}

impl MeasurementRecord {
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(metric)
    }

    pub fn location_or_empty(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }
}

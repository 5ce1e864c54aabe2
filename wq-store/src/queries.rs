//! Presentation queries over a [`RecordStore`].
//!
//! Queries return typed structs from [`crate::models`] ready to be printed
//! as JSON or as a table.

use crate::models::{DayCount, MapMarker, MapView, PopupField, RecordRow};
use crate::RecordStore;
use chrono::NaiveDate;
use wq_core::classifier::classify;
use wq_core::date_range::DateRange;
use wq_core::record::{MeasurementRecord, Metric};
use wq_utils::dates::format_display_date;

/// Map centre used when there is nothing to show (Amsterdam).
pub const DEFAULT_CENTER: (f64, f64) = (52.36, 4.9);

impl RecordStore {
    /// Markers for every record measured on `date` that has coordinates.
    pub fn map_markers(&self, date: NaiveDate, fields: &[PopupField]) -> Vec<MapMarker> {
        let markers: Vec<MapMarker> = self
            .filter_by_date(date)
            .into_iter()
            .filter_map(|(ordinal, record)| {
                let coordinates = record.coordinates?;
                let category = classify(record.ph);
                Some(MapMarker {
                    ordinal,
                    latitude: coordinates.latitude,
                    longitude: coordinates.longitude,
                    popup: popup_text(record, fields),
                    category,
                    color: category.color(),
                })
            })
            .collect();
        log::info!("query: map_markers returned {} markers for {}", markers.len(), date);
        markers
    }

    /// Markers for `date` together with the centre point.
    pub fn map_view(&self, date: NaiveDate, fields: &[PopupField]) -> MapView {
        let markers = self.map_markers(date, fields);
        MapView {
            center: map_center(&markers),
            markers,
        }
    }

    /// Listing rows, optionally limited to `range`.
    pub fn record_rows(&self, range: Option<&DateRange>) -> Vec<RecordRow> {
        let selected = match range {
            Some(range) => self.filter_by_range(range),
            None => self.iter().collect(),
        };
        selected
            .into_iter()
            .map(|(ordinal, record)| RecordRow {
                ordinal,
                location: record.location_or_empty().to_string(),
                date: record
                    .measurement_date
                    .as_ref()
                    .map(format_display_date)
                    .unwrap_or_default(),
                coordinates: record
                    .coordinates
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
                ph: record.ph,
                temperature: record.metric(Metric::Temperature),
            })
            .collect()
    }

    /// Measurements per day for every day of `range`, including empty days.
    pub fn daily_counts(&self, range: &DateRange) -> Vec<DayCount> {
        range
            .days()
            .map(|day| DayCount {
                date: format_display_date(&day),
                count: self.filter_by_date(day).len(),
            })
            .collect()
    }
}

/// Popup HTML: the location in bold, then one line per selected field that
/// has a value.
pub fn popup_text(record: &MeasurementRecord, fields: &[PopupField]) -> String {
    let mut html = format!("<b>{}</b><br>", escape_html(record.location_or_empty()));
    for field in fields {
        if let Some(value) = field.value(record) {
            html.push_str(&format!("{}: {}<br>", field.column(), value));
        }
    }
    html
}

/// Mean position of `markers`, or [`DEFAULT_CENTER`] when there are none.
pub fn map_center(markers: &[MapMarker]) -> (f64, f64) {
    if markers.is_empty() {
        return DEFAULT_CENTER;
    }
    let n = markers.len() as f64;
    let latitude = markers.iter().map(|m| m.latitude).sum::<f64>() / n;
    let longitude = markers.iter().map(|m| m.longitude).sum::<f64>() / n;
    (latitude, longitude)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

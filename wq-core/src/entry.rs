//! Validation of a single new measurement submitted by a user.
//!
//! Unlike a bulk load, a submission is refused outright when a required
//! field is missing. All problems are reported together.

use crate::error::{EntryIssue, ValidationError};
use crate::normalizer::{normalize, NormalizeOptions};
use crate::parse::coordinates::parse_coordinates_text;
use crate::raw_row::{self, RawRow, RawValue};
use crate::record::{Coordinates, MeasurementRecord, Metric};
use chrono::NaiveDate;

/// A submission from the entry form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewEntry {
    /// Cells in the spreadsheet layout.
    pub row: RawRow,
    /// Separate latitude, used when `row` has no `Coordinaten` text.
    pub latitude: Option<f64>,
    /// Separate longitude, used when `row` has no `Coordinaten` text.
    pub longitude: Option<f64>,
    /// The user confirmed a pH outside 0-14.
    pub confirm_ph: bool,
}

impl NewEntry {
    pub fn new(row: RawRow) -> Self {
        Self {
            row,
            ..Default::default()
        }
    }

    pub fn with_lat_lon(mut self, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn with_confirmed_ph(mut self, confirmed: bool) -> Self {
        self.confirm_ph = confirmed;
        self
    }

    fn resolve_coordinates(&self) -> Result<Coordinates, EntryIssue> {
        if let Some(text) = self.row.text(raw_row::COORDINATES) {
            return parse_coordinates_text(text)
                .ok_or_else(|| EntryIssue::MalformedCoordinates(text.to_string()));
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Ok(Coordinates::new(lat, lon))
            }
            (Some(lat), Some(lon)) => Err(EntryIssue::MalformedCoordinates(format!(
                "{}, {}",
                lat, lon
            ))),
            (None, None) => Err(EntryIssue::MissingCoordinates),
            _ => Err(EntryIssue::IncompleteLatLon),
        }
    }

    /// Validate and normalise the submission.
    ///
    /// A submission without any date is stamped with `today` for both
    /// `Meetdag` and `Datum`. An empty `Datum` takes the `Meetdag` cell.
    pub fn validate(
        self,
        today: NaiveDate,
        options: &NormalizeOptions,
    ) -> Result<MeasurementRecord, ValidationError> {
        let mut issues = Vec::new();

        if self.row.text(raw_row::LOCATION).is_none() {
            issues.push(EntryIssue::MissingLocation);
        }

        let coordinates = self.resolve_coordinates();
        if let Err(issue) = &coordinates {
            issues.push(issue.clone());
        }

        let mut row = self.row;
        if let Ok(coordinates) = coordinates {
            row.insert(raw_row::COORDINATES, coordinates.to_string());
        }
        let blank = |column: &str| row.get(column).map_or(true, RawValue::is_empty);
        let dates = (blank(raw_row::MEASUREMENT_DAY), blank(raw_row::DISPLAY_DATE));
        match dates {
            (true, true) => {
                row.insert(raw_row::MEASUREMENT_DAY, today);
                row.insert(raw_row::DISPLAY_DATE, today);
            }
            (false, true) => {
                let day = row.get(raw_row::MEASUREMENT_DAY).cloned().unwrap_or_default();
                row.insert(raw_row::DISPLAY_DATE, day);
            }
            _ => {}
        }

        let record = normalize(&row, options);

        if let Some(ph) = record.ph {
            if !(0.0..=14.0).contains(&ph) && !self.confirm_ph {
                issues.push(EntryIssue::UnconfirmedPh(ph));
            }
        }
        if let Some(humidity) = record.metric(Metric::Humidity) {
            if !(0.0..=100.0).contains(&humidity) {
                issues.push(EntryIssue::HumidityOutOfRange(humidity));
            }
        }

        if issues.is_empty() {
            Ok(record)
        } else {
            log::info!("entry: Rejected submission with {} issue(s)", issues.len());
            Err(ValidationError::Rejected(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    fn options() -> NormalizeOptions {
        NormalizeOptions::with_default_year(2024)
    }

    fn issues(entry: NewEntry) -> Vec<EntryIssue> {
        match entry.validate(today(), &options()) {
            Err(ValidationError::Rejected(issues)) => issues,
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn accepts_complete_entry() {
        let entry = NewEntry::new(RawRow::from_pairs([
            ("Locatie", "Amstel"),
            ("Coordinaten", "52.36, 4.90"),
            ("PH", "7,4"),
        ]));
        let record = entry.validate(today(), &options()).unwrap();
        assert_eq!(record.location.as_deref(), Some("Amstel"));
        assert_eq!(record.coordinates, Some(Coordinates::new(52.36, 4.9)));
        assert_eq!(record.measurement_date, Some(today()));
        assert_eq!(record.measurement_day, Some(today()));
        assert_eq!(record.ph, Some(7.4));
    }

    #[test]
    fn separate_lat_lon_are_combined() {
        let entry = NewEntry::new(RawRow::from_pairs([("Locatie", "IJ")]))
            .with_lat_lon(Some(52.380001), Some(4.9));
        let record = entry.validate(today(), &options()).unwrap();
        assert_eq!(record.coordinates, Some(Coordinates::new(52.380001, 4.9)));
    }

    #[test]
    fn missing_location_and_coordinates_are_both_reported() {
        let entry = NewEntry::new(RawRow::from_pairs([("PH", "7")]));
        assert_eq!(
            issues(entry),
            vec![EntryIssue::MissingLocation, EntryIssue::MissingCoordinates]
        );
    }

    #[test]
    fn half_a_coordinate_pair_is_rejected() {
        let entry = NewEntry::new(RawRow::from_pairs([("Locatie", "IJ")]))
            .with_lat_lon(Some(52.38), None);
        assert_eq!(issues(entry), vec![EntryIssue::IncompleteLatLon]);
    }

    #[test]
    fn malformed_coordinate_text_is_rejected() {
        let entry = NewEntry::new(RawRow::from_pairs([
            ("Locatie", "IJ"),
            ("Coordinaten", "bij de pont"),
        ]));
        assert_eq!(
            issues(entry),
            vec![EntryIssue::MalformedCoordinates("bij de pont".into())]
        );
    }

    #[test]
    fn extreme_ph_needs_confirmation() {
        let row = RawRow::from_pairs([
            ("Locatie", "Lab"),
            ("Coordinaten", "52.36, 4.90"),
            ("PH", "15"),
        ]);
        assert_eq!(
            issues(NewEntry::new(row.clone())),
            vec![EntryIssue::UnconfirmedPh(15.0)]
        );
        let record = NewEntry::new(row)
            .with_confirmed_ph(true)
            .validate(today(), &options())
            .unwrap();
        assert_eq!(record.ph, Some(15.0));
    }

    #[test]
    fn humidity_must_be_a_percentage() {
        let entry = NewEntry::new(RawRow::from_pairs([
            ("Locatie", "Lab"),
            ("Coordinaten", "52.36, 4.90"),
            ("Humidity", "101"),
        ]));
        assert_eq!(issues(entry), vec![EntryIssue::HumidityOutOfRange(101.0)]);
    }

    #[test]
    fn explicit_date_is_kept() {
        let entry = NewEntry::new(RawRow::from_pairs([
            ("Locatie", "Amstel"),
            ("Coordinaten", "52.36, 4.90"),
            ("Meetdag", "01-06-2024"),
        ]));
        let record = entry.validate(today(), &options()).unwrap();
        assert_eq!(record.measurement_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test]
    fn empty_display_date_takes_measurement_day() {
        let entry = NewEntry::new(RawRow::from_pairs([
            ("Locatie", "Amstel"),
            ("Coordinaten", "52.36, 4.90"),
            ("Meetdag", "01-06-2024"),
            ("Datum", ""),
        ]));
        let record = entry.validate(today(), &options()).unwrap();
        assert_eq!(record.measurement_day, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(record.measurement_date, NaiveDate::from_ymd_opt(2024, 6, 1));
    }
}

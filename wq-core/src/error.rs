use chrono::NaiveDate;
use thiserror::Error;

/// One reason a new entry was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryIssue {
    #[error("location is required")]
    MissingLocation,
    #[error("coordinates are required")]
    MissingCoordinates,
    #[error("both latitude and longitude are required")]
    IncompleteLatLon,
    #[error("invalid coordinates '{0}', use 'latitude, longitude' (e.g. 52.37, 4.89)")]
    MalformedCoordinates(String),
    #[error("pH {0} is outside 0-14; confirm the value to store it")]
    UnconfirmedPh(f64),
    #[error("humidity {0} must be between 0 and 100")]
    HumidityOutOfRange(f64),
}

/// Caller-facing rejections. Field-level parse failures never show up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("entry rejected: {}", join_issues(.0))]
    Rejected(Vec<EntryIssue>),
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

fn join_issues(issues: &[EntryIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

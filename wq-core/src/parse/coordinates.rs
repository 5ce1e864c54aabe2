use super::number::parse_decimal;
use crate::raw_row::RawValue;
use crate::record::Coordinates;
use once_cell::sync::Lazy;
use regex::Regex;

/// A comma followed by whitespace and the start of a number. This is the
/// structural separator between latitude and longitude; any other comma is
/// a decimal mark inside one of the two numbers.
static PAIR_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s+[-+]?\d").expect("valid separator pattern"));

/// Parse `"lat, lon"` text where either number may use `.` or `,` as
/// decimal mark.
///
/// The split is tried in order: on the structural `", <digit>"` separator,
/// then on a single bare comma, then on a single whitespace gap. Anything
/// that does not leave exactly two numeric tokens yields `None`.
///
/// ```rust
/// use wq_core::parse::coordinates::parse_coordinates_text;
///
/// let dot = parse_coordinates_text("52.36, 4.90").unwrap();
/// let comma = parse_coordinates_text("52,36, 4,90").unwrap();
/// assert_eq!(dot, comma);
/// assert_eq!((dot.latitude, dot.longitude), (52.36, 4.9));
/// ```
pub fn parse_coordinates_text(s: &str) -> Option<Coordinates> {
    let s = s.trim();
    let (lat, lon) = split_pair(s)?;
    Some(Coordinates::new(parse_decimal(lat)?, parse_decimal(lon)?))
}

fn split_pair(s: &str) -> Option<(&str, &str)> {
    let separators: Vec<usize> = PAIR_SEPARATOR.find_iter(s).map(|m| m.start()).collect();
    match separators.as_slice() {
        [at] => return Some((&s[..*at], &s[at + 1..])),
        [] => {}
        _ => return None,
    }
    if s.matches(',').count() == 1 {
        return s.split_once(',');
    }
    let mut tokens = s.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(lat), Some(lon), None) => Some((lat, lon)),
        _ => None,
    }
}

/// Read a coordinate cell. Only text cells can hold a pair.
pub fn parse_coordinates(value: &RawValue) -> Option<Coordinates> {
    let text = value.as_text()?;
    let parsed = parse_coordinates_text(text);
    if parsed.is_none() {
        log::debug!("parse: '{}' is not a coordinate pair", text);
    }
    parsed
}

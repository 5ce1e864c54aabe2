use super::number::parse_decimal;
use crate::raw_row::RawValue;

/// Range separators accepted between the two ends of a pH range.
const RANGE_SEPARATORS: [char; 3] = ['-', '\u{2013}', '\u{2014}'];

/// Resolve a pH cell to a single value.
///
/// A single numeric token resolves to itself; two tokens separated by a
/// hyphen (or en/em dash) resolve to their mean. Anything else, including
/// a non-numeric token anywhere, resolves to `None`.
///
/// ```rust
/// use wq_core::parse::ph::parse_ph_text;
///
/// assert_eq!(parse_ph_text("7.2"), Some(7.2));
/// assert_eq!(parse_ph_text("8,3-8,7"), Some(8.5));
/// assert_eq!(parse_ph_text("8-9-10"), None);
/// ```
pub fn parse_ph_text(s: &str) -> Option<f64> {
    let tokens: Vec<&str> = s.trim().split(&RANGE_SEPARATORS[..]).collect();
    let values = tokens
        .iter()
        .map(|t| parse_decimal(t).filter(|v| *v >= 0.0))
        .collect::<Option<Vec<f64>>>()?;
    match values.as_slice() {
        [single] => Some(*single),
        [low, high] => Some((low + high) / 2.0),
        _ => None,
    }
}

/// Read a pH cell holding a native number or text.
///
/// Negative readings are rejected for both cell kinds.
pub fn parse_ph(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Number(n) if n.is_finite() && *n >= 0.0 => Some(*n),
        RawValue::Text(s) => {
            let parsed = parse_ph_text(s);
            if parsed.is_none() && !s.trim().is_empty() {
                log::debug!("parse: '{}' is not a pH value or range", s);
            }
            parsed
        }
        _ => None,
    }
}

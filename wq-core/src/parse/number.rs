use crate::raw_row::RawValue;

/// Parse decimal text that may use a comma as decimal separator.
///
/// Non-finite results (`NaN`, `inf`) count as unparseable.
pub fn parse_decimal(s: &str) -> Option<f64> {
    s.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Read a numeric measurement from a cell holding a native number or text.
pub fn parse_number(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Number(n) if n.is_finite() => Some(*n),
        RawValue::Text(s) => {
            let parsed = parse_decimal(s);
            if parsed.is_none() && !s.trim().is_empty() {
                log::debug!("parse: '{}' is not a number", s);
            }
            parsed
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_and_point_decimals() {
        assert_eq!(parse_decimal("20,5"), Some(20.5));
        assert_eq!(parse_decimal(" 20.5 "), Some(20.5));
        assert_eq!(parse_decimal("-3"), Some(-3.0));
    }

    #[test]
    fn rejects_garbage_and_non_finite() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("n/a"), None);
        assert_eq!(parse_decimal("1,234.5"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
    }

    #[test]
    fn native_numbers_pass_through() {
        assert_eq!(parse_number(&RawValue::Number(412.0)), Some(412.0));
        assert_eq!(parse_number(&RawValue::Number(f64::NAN)), None);
        assert_eq!(parse_number(&RawValue::Text("7,25".into())), Some(7.25));
        assert_eq!(parse_number(&RawValue::Empty), None);
    }
}

use crate::raw_row::RawValue;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// `YYYY-MM-DD`, optionally followed by a time as spreadsheet writers emit it.
static ISO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T]\S*)?$").expect("valid ISO date pattern")
});

/// `DD-MM-YYYY` or `DD-MM-YY`, separators `-`, `/` or `.`.
static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4}|\d{2})(?:\s+\S*)?$")
        .expect("valid day-month-year pattern")
});

/// `DD-MM` without a year.
static DAY_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[-/.](\d{1,2})$").expect("valid day-month pattern"));

/// `DD-Mon`, `DD Mon` or `DD-Mon-YYYY` with an English or Dutch month name.
static DAY_MONTH_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[-/. ]+([[:alpha:]]+)\.?(?:[-/. ]+(\d{4}))?$")
        .expect("valid day-month-name pattern")
});

const MONTH_NAMES: [(&str, u32); 34] = [
    ("jan", 1),
    ("januari", 1),
    ("january", 1),
    ("feb", 2),
    ("februari", 2),
    ("february", 2),
    ("mar", 3),
    ("mrt", 3),
    ("maart", 3),
    ("march", 3),
    ("apr", 4),
    ("april", 4),
    ("may", 5),
    ("mei", 5),
    ("jun", 6),
    ("juni", 6),
    ("june", 6),
    ("jul", 7),
    ("juli", 7),
    ("july", 7),
    ("aug", 8),
    ("augustus", 8),
    ("august", 8),
    ("sep", 9),
    ("sept", 9),
    ("september", 9),
    ("oct", 10),
    ("okt", 10),
    ("october", 10),
    ("oktober", 10),
    ("nov", 11),
    ("november", 11),
    ("dec", 12),
    ("december", 12),
];

fn month_from_name(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, month)| *month)
}

fn number<T: std::str::FromStr>(captures: &regex::Captures, group: usize) -> Option<T> {
    captures.get(group)?.as_str().parse().ok()
}

/// Parse a day-first date.
///
/// Ambiguous numeric dates are always read day first, so `03-04-2024` is
/// the 3rd of April. Forms without a year take `default_year`.
///
/// ```rust
/// use chrono::NaiveDate;
/// use wq_core::parse::date::parse_date_text;
///
/// let april_3 = NaiveDate::from_ymd_opt(2024, 4, 3);
/// assert_eq!(parse_date_text("03-04-2024", 1900), april_3);
/// assert_eq!(parse_date_text("3-apr", 2024), april_3);
/// assert_eq!(parse_date_text("31-02-2024", 2024), None);
/// ```
pub fn parse_date_text(s: &str, default_year: i32) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(c) = ISO.captures(s) {
        return NaiveDate::from_ymd_opt(number(&c, 1)?, number(&c, 2)?, number(&c, 3)?);
    }
    if let Some(c) = DAY_MONTH_YEAR.captures(s) {
        let year_text = c.get(3)?.as_str();
        let mut year: i32 = year_text.parse().ok()?;
        if year_text.len() == 2 {
            year += 2000;
        }
        return NaiveDate::from_ymd_opt(year, number(&c, 2)?, number(&c, 1)?);
    }
    if let Some(c) = DAY_MONTH.captures(s) {
        return NaiveDate::from_ymd_opt(default_year, number(&c, 2)?, number(&c, 1)?);
    }
    if let Some(c) = DAY_MONTH_NAME.captures(s) {
        let month = month_from_name(c.get(2)?.as_str())?;
        let year = number(&c, 3).unwrap_or(default_year);
        return NaiveDate::from_ymd_opt(year, month, number(&c, 1)?);
    }
    None
}

/// Read a date cell holding a native date or day-first text.
pub fn parse_date(value: &RawValue, default_year: i32) -> Option<NaiveDate> {
    match value {
        RawValue::Date(d) => Some(*d),
        RawValue::Text(s) => {
            let parsed = parse_date_text(s, default_year);
            if parsed.is_none() && !s.trim().is_empty() {
                log::debug!("parse: '{}' is not a recognised date", s);
            }
            parsed
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn full_day_first_dates() {
        assert_eq!(parse_date_text("01-02-2024", 1900), ymd(2024, 2, 1));
        assert_eq!(parse_date_text("1/2/2024", 1900), ymd(2024, 2, 1));
        assert_eq!(parse_date_text("01.02.24", 1900), ymd(2024, 2, 1));
        assert_eq!(parse_date_text("12-11-2023 09:30", 1900), ymd(2023, 11, 12));
    }

    #[test]
    fn ambiguous_dates_are_day_first() {
        assert_eq!(parse_date_text("05-06-2024", 1900), ymd(2024, 6, 5));
        assert_eq!(parse_date_text("06-05", 2024), ymd(2024, 5, 6));
        assert_eq!(parse_date_text("13-01-2024", 1900), ymd(2024, 1, 13));
        assert_eq!(parse_date_text("01-13-2024", 1900), None);
    }

    #[test]
    fn iso_dates_from_spreadsheet_writers() {
        assert_eq!(parse_date_text("2024-06-05", 1900), ymd(2024, 6, 5));
        assert_eq!(parse_date_text("2024-06-05 00:00:00", 1900), ymd(2024, 6, 5));
        assert_eq!(parse_date_text("2024-06-05T00:00:00", 1900), ymd(2024, 6, 5));
    }

    #[test]
    fn month_names() {
        assert_eq!(parse_date_text("12-Jun", 2024), ymd(2024, 6, 12));
        assert_eq!(parse_date_text("12 jun", 2024), ymd(2024, 6, 12));
        assert_eq!(parse_date_text("3-mrt", 2024), ymd(2024, 3, 3));
        assert_eq!(parse_date_text("3 okt.", 2024), ymd(2024, 10, 3));
        assert_eq!(parse_date_text("14 mei 2023", 2024), ymd(2023, 5, 14));
        assert_eq!(parse_date_text("1-december", 2024), ymd(2024, 12, 1));
        assert_eq!(parse_date_text("12-Foo", 2024), None);
    }

    #[test]
    fn unparseable_is_absent() {
        assert_eq!(parse_date_text("", 2024), None);
        assert_eq!(parse_date_text("gisteren", 2024), None);
        assert_eq!(parse_date_text("32-01-2024", 2024), None);
        assert_eq!(parse_date(&RawValue::Number(45000.0), 2024), None);
        assert_eq!(parse_date(&RawValue::Empty, 2024), None);
    }

    #[test]
    fn native_dates_pass_through() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(parse_date(&RawValue::Date(d), 1900), Some(d));
    }
}

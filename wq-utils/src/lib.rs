//! Shared utility functions for WQ crates.

/// Date utility functions
pub mod dates {
    use anyhow::Context;
    use chrono::{Local, NaiveDate};

    /// Day-first date format used in the spreadsheet and on screen.
    pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

    /// Format a NaiveDate as "DD-MM-YYYY"
    pub fn format_display_date(date: &NaiveDate) -> String {
        date.format(DISPLAY_FORMAT).to_string()
    }

    /// Format a NaiveDate as "YYYYMMDD"
    pub fn format_compact_date(date: &NaiveDate) -> String {
        date.format("%Y%m%d").to_string()
    }

    /// Parse a date given on the command line, "DD-MM-YYYY" or "YYYY-MM-DD".
    pub fn parse_cli_date(s: &str) -> anyhow::Result<NaiveDate> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, DISPLAY_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
            .with_context(|| format!("'{}' is not a date, use DD-MM-YYYY", s))
    }

    /// File name for an export covering `start` through `end`.
    /// e.g. waterkwaliteit_20240101_tot_20240131.csv
    pub fn export_file_name(start: &NaiveDate, end: &NaiveDate) -> String {
        format!(
            "waterkwaliteit_{}_tot_{}.csv",
            format_compact_date(start),
            format_compact_date(end)
        )
    }

    /// Today's date in local time.
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_display_date(&date);
            assert_eq!(formatted, "15-06-2023");
            let parsed = parse_cli_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_iso() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            assert_eq!(parse_cli_date("2023-06-15").unwrap(), date);
            assert!(parse_cli_date("15 juni").is_err());
        }

        #[test]
        fn test_export_file_name() {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
            assert_eq!(
                export_file_name(&start, &end),
                "waterkwaliteit_20240101_tot_20240131.csv"
            );
        }
    }
}

//! Calendar date and timestamp adapters

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use std::fmt;

use super::error::{FormatError, FormatResult};

const DATE_PATTERN: &str = "%Y-%m-%d";

/// Years expressible with four unsigned digits
const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

fn check_year(year: i32, raw: String, constraint: String) -> FormatResult<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(FormatError::OutOfRange { raw, constraint })
    }
}

/// `D` adapter: `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateFormat;

impl DateFormat {
    pub fn parse(&self, raw: &str) -> FormatResult<NaiveDate> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(FormatError::Empty {
                constraint: self.to_string(),
            });
        }
        // chrono accepts unpadded fields, the standard does not
        if text.len() != 10 {
            return Err(FormatError::PatternMismatch {
                raw: raw.to_string(),
                constraint: self.to_string(),
            });
        }
        NaiveDate::parse_from_str(text, DATE_PATTERN).map_err(|_| FormatError::PatternMismatch {
            raw: raw.to_string(),
            constraint: self.to_string(),
        })
    }

    /// Validate a language-native date: the year must fit four digits
    pub fn check(&self, value: &NaiveDate) -> FormatResult<()> {
        check_year(value.year(), value.to_string(), self.to_string())
    }

    pub fn render(&self, value: &NaiveDate) -> String {
        value.format(DATE_PATTERN).to_string()
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D (YYYY-MM-DD)")
    }
}

/// `DT` adapter: RFC 3339 timestamp, normalised to UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeFormat;

impl DateTimeFormat {
    pub fn parse(&self, raw: &str) -> FormatResult<DateTime<Utc>> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(FormatError::Empty {
                constraint: self.to_string(),
            });
        }
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| FormatError::PatternMismatch {
                raw: raw.to_string(),
                constraint: self.to_string(),
            })
    }

    /// Validate a language-native timestamp: the UTC year must fit four digits
    pub fn check(&self, value: &DateTime<Utc>) -> FormatResult<()> {
        check_year(value.year(), self.render(value), self.to_string())
    }

    /// Seconds always present, fractional seconds only when non-zero
    pub fn render(&self, value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl fmt::Display for DateTimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DT (YYYY-MM-DDTHH:MM:SSZ)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_requires_padding() {
        let format = DateFormat;
        assert_eq!(
            format.parse("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(format.parse("2024-2-29").is_err());
        assert!(format.parse("2023-02-29").is_err());
    }

    #[test]
    fn test_datetime_normalises_to_utc() {
        let format = DateTimeFormat;
        let parsed = format.parse("2024-06-01T14:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap());
        assert_eq!(format.render(&parsed), "2024-06-01T12:30:00Z");
    }

    #[test]
    fn test_check_rejects_years_beyond_four_digits() {
        let last = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        assert!(DateFormat.check(&last).is_ok());
        assert_eq!(DateFormat.parse(&DateFormat.render(&last)).unwrap(), last);

        let late = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        assert!(matches!(DateFormat.check(&late), Err(FormatError::OutOfRange { .. })));
        let early = NaiveDate::from_ymd_opt(-1, 12, 31).unwrap();
        assert!(matches!(DateFormat.check(&early), Err(FormatError::OutOfRange { .. })));

        let stamp = Utc.with_ymd_and_hms(10000, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            DateTimeFormat.check(&stamp),
            Err(FormatError::OutOfRange { .. })
        ));
        let stamp = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
        assert!(DateTimeFormat.check(&stamp).is_ok());
    }

    #[test]
    fn test_datetime_keeps_fractional_seconds() {
        let format = DateTimeFormat;
        let text = "2024-06-01T12:30:00.250Z";
        assert_eq!(format.render(&format.parse(text).unwrap()), text);
    }
}

//! Payroll period and year-month selector models.
//!
//! This module contains the [`PayrollPeriod`] date range used to select the
//! attendance records of one payroll cycle, and the [`YearMonth`] selector
//! used by the monthly views.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{PresensiError, PresensiResult};

/// An inclusive calendar date range `[start_date, end_date]`.
///
/// The first day starts at `00:00:00` and the last day ends at `23:59:59`.
/// Dates serialize as zero-padded `YYYY-MM-DD`, so string order and
/// calendar order agree.
///
/// # Example
///
/// ```
/// use warfot_presensi::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod {
///     start_date: NaiveDate::from_ymd_opt(2025, 11, 21).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()));
/// assert_eq!(period.to_string(), "2025-11-21..2025-12-20");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// The first day of the period (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayrollPeriod {
    /// Checks if a given date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns the first instant of the period (`00:00:00` on the start date).
    pub fn start_instant(&self) -> NaiveDateTime {
        self.start_date.and_time(NaiveTime::MIN)
    }

    /// Returns the last whole second of the period (`23:59:59` on the end date).
    pub fn end_instant(&self) -> NaiveDateTime {
        // 23:59:59 is always a valid time of day
        self.end_date
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| self.end_date.and_time(NaiveTime::MIN))
    }

    /// Returns the boundaries as `YYYY-MM-DD` strings, suitable for
    /// inclusive string-range filters against date-stamped records.
    pub fn date_keys(&self) -> (String, String) {
        (
            self.start_date.format("%Y-%m-%d").to_string(),
            self.end_date.format("%Y-%m-%d").to_string(),
        )
    }
}

impl fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.date_keys();
        write!(f, "{}..{}", start, end)
    }
}

/// A calendar month selector, written `YYYY-MM`.
///
/// # Example
///
/// ```
/// use warfot_presensi::models::YearMonth;
///
/// let ym: YearMonth = "2025-01".parse().unwrap();
/// assert_eq!(ym.year, 2025);
/// assert_eq!(ym.month, 1);
/// assert_eq!(ym.previous().to_string(), "2024-12");
/// assert!("2025-1".parse::<YearMonth>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    /// The calendar year.
    pub year: i32,
    /// The month of the year, 1 through 12.
    pub month: u32,
}

impl YearMonth {
    /// Creates a selector, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> PresensiResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(PresensiError::InvalidYearMonth {
                value: format!("{:04}-{:02}", year, month),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the month containing the given date.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the preceding month, rolling back into December of the prior year.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Returns the following month, rolling into January of the next year.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Returns true if the date falls in this calendar month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = PresensiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PresensiError::InvalidYearMonth {
            value: s.to_string(),
        };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = PresensiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn december_cycle() -> PayrollPeriod {
        PayrollPeriod {
            start_date: make_date("2025-11-21"),
            end_date: make_date("2025-12-20"),
        }
    }

    #[test]
    fn test_contains_date_on_both_boundaries() {
        let period = december_cycle();
        assert!(period.contains_date(period.start_date));
        assert!(period.contains_date(period.end_date));
    }

    #[test]
    fn test_contains_date_outside_period() {
        let period = december_cycle();
        assert!(!period.contains_date(make_date("2025-11-20")));
        assert!(!period.contains_date(make_date("2025-12-21")));
    }

    #[test]
    fn test_instants_cover_whole_days() {
        let period = december_cycle();
        assert_eq!(period.start_instant().to_string(), "2025-11-21 00:00:00");
        assert_eq!(period.end_instant().to_string(), "2025-12-20 23:59:59");
    }

    #[test]
    fn test_date_keys_are_zero_padded() {
        let period = PayrollPeriod {
            start_date: make_date("2024-12-21"),
            end_date: make_date("2025-01-05"),
        };
        assert_eq!(
            period.date_keys(),
            ("2024-12-21".to_string(), "2025-01-05".to_string())
        );
    }

    #[test]
    fn test_serialize_period() {
        let json = serde_json::to_string(&december_cycle()).unwrap();
        assert_eq!(
            json,
            r#"{"start_date":"2025-11-21","end_date":"2025-12-20"}"#
        );
    }

    #[test]
    fn test_parse_year_month() {
        let ym: YearMonth = "2025-12".parse().unwrap();
        assert_eq!(ym, YearMonth { year: 2025, month: 12 });
    }

    #[test]
    fn test_parse_year_month_rejects_bad_input() {
        for input in ["2025-13", "2025-00", "25-01", "2025/01", "2025-1", "abcd-ef", ""] {
            assert!(
                input.parse::<YearMonth>().is_err(),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_previous_and_next_roll_over_year() {
        let january = YearMonth::new(2025, 1).unwrap();
        assert_eq!(january.previous(), YearMonth::new(2024, 12).unwrap());

        let december = YearMonth::new(2024, 12).unwrap();
        assert_eq!(december.next(), january);
    }

    #[test]
    fn test_year_month_contains() {
        let ym = YearMonth::new(2025, 2).unwrap();
        assert!(ym.contains(make_date("2025-02-28")));
        assert!(!ym.contains(make_date("2025-03-01")));
        assert!(!ym.contains(make_date("2024-02-10")));
    }

    #[test]
    fn test_year_month_serde_uses_string_form() {
        let ym = YearMonth::new(2026, 3).unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"2026-03\"");

        let parsed: YearMonth = serde_json::from_str("\"2026-03\"").unwrap();
        assert_eq!(parsed, ym);
        assert!(serde_json::from_str::<YearMonth>("\"2026-3\"").is_err());
    }
}

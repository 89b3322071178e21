//! Payroll period resolution.
//!
//! A payroll period runs from the day after the cutoff in one month to the
//! cutoff day of the next month, both inclusive. With the default cutoff of
//! 20 the December period is 21 November through 20 December.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::models::{PayrollPeriod, YearMonth};

/// Cutoff day used when none is configured, and always by
/// [`resolve_period_for_month`].
pub const DEFAULT_CUTOFF_DAY: u32 = 20;

/// Resolves the payroll period containing `now` for the given cutoff day.
///
/// - If `now` falls on or before the cutoff day, the period is the
///   `cutoff + 1` of the previous month through the cutoff of this month.
/// - Otherwise it is the `cutoff + 1` of this month through the cutoff of
///   next month.
///
/// Year boundaries roll over in both directions.
///
/// The cutoff day is expected to lie in `[1, 28]` so every month has both
/// boundary days. Other values are not rejected: a day past the end of a
/// month carries into the following month, and day 0 is the last day of the
/// previous month.
///
/// # Examples
///
/// ```
/// use warfot_presensi::calculation::resolve_current_period;
/// use chrono::NaiveDateTime;
///
/// let now = NaiveDateTime::parse_from_str("2026-01-25 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let period = resolve_current_period(now, 20);
/// assert_eq!(period.to_string(), "2026-01-21..2026-02-20");
/// ```
pub fn resolve_current_period(now: NaiveDateTime, cutoff_day: u32) -> PayrollPeriod {
    let year = now.year();
    let month0 = now.month0() as i32;
    let cutoff = i64::from(cutoff_day);

    if i64::from(now.day()) <= cutoff {
        PayrollPeriod {
            start_date: calendar_day(year, month0 - 1, cutoff + 1),
            end_date: calendar_day(year, month0, cutoff),
        }
    } else {
        PayrollPeriod {
            start_date: calendar_day(year, month0, cutoff + 1),
            end_date: calendar_day(year, month0 + 1, cutoff),
        }
    }
}

/// Resolves the payroll period that ends in the selected month, using the
/// fixed cutoff of [`DEFAULT_CUTOFF_DAY`].
///
/// The period starts on the 21st of the preceding month at `00:00:00` and
/// ends on the 20th of the selected month at `23:59:59`.
///
/// # Examples
///
/// ```
/// use warfot_presensi::calculation::resolve_period_for_month;
/// use warfot_presensi::models::YearMonth;
///
/// let period = resolve_period_for_month(YearMonth::new(2025, 1).unwrap());
/// assert_eq!(period.date_keys(), ("2024-12-21".to_string(), "2025-01-20".to_string()));
/// ```
pub fn resolve_period_for_month(year_month: YearMonth) -> PayrollPeriod {
    let cutoff = i64::from(DEFAULT_CUTOFF_DAY);
    let previous = year_month.previous();

    PayrollPeriod {
        start_date: calendar_day(previous.year, previous.month as i32 - 1, cutoff + 1),
        end_date: calendar_day(year_month.year, year_month.month as i32 - 1, cutoff),
    }
}

/// Returns the first and last day of a calendar month.
///
/// Used by the monthly attendance recap, which is not cut off.
pub fn month_bounds(year_month: YearMonth) -> PayrollPeriod {
    let next = year_month.next();
    PayrollPeriod {
        start_date: calendar_day(year_month.year, year_month.month as i32 - 1, 1),
        end_date: calendar_day(next.year, next.month as i32 - 1, 0),
    }
}

/// Builds a date from a zero-based month and a one-based day that may both
/// fall outside their usual ranges, carrying the excess into neighbouring
/// months and years.
///
/// Saturates at the ends of the supported calendar range.
fn calendar_day(year: i32, month0: i32, day: i64) -> NaiveDate {
    let total_months = i64::from(year) * 12 + i64::from(month0);
    let first_of_month = i32::try_from(total_months.div_euclid(12))
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, total_months.rem_euclid(12) as u32 + 1, 1));

    let Some(first_of_month) = first_of_month else {
        return if total_months < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        };
    };

    Duration::try_days(day - 1)
        .and_then(|offset| first_of_month.checked_add_signed(offset))
        .unwrap_or(if day < 1 { NaiveDate::MIN } else { NaiveDate::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str) -> NaiveDateTime {
        make_date(date_str).and_hms_opt(12, 0, 0).unwrap()
    }

    /// PR-001: before the cutoff the period ends this month
    #[test]
    fn test_day_before_cutoff_ends_this_month() {
        let period = resolve_current_period(make_datetime("2025-12-15"), 20);
        assert_eq!(period.start_date, make_date("2025-11-21"));
        assert_eq!(period.end_date, make_date("2025-12-20"));
    }

    /// PR-002: after the cutoff the period starts this month
    #[test]
    fn test_day_after_cutoff_starts_this_month() {
        let period = resolve_current_period(make_datetime("2025-12-25"), 20);
        assert_eq!(period.start_date, make_date("2025-12-21"));
        assert_eq!(period.end_date, make_date("2026-01-20"));
    }

    #[test]
    fn test_cutoff_day_itself_belongs_to_ending_period() {
        let period = resolve_current_period(make_datetime("2025-12-20"), 20);
        assert_eq!(period.end_date, make_date("2025-12-20"));

        let period = resolve_current_period(make_datetime("2025-12-21"), 20);
        assert_eq!(period.start_date, make_date("2025-12-21"));
    }

    #[test]
    fn test_january_rolls_back_to_previous_december() {
        let period = resolve_current_period(make_datetime("2026-01-03"), 20);
        assert_eq!(period.start_date, make_date("2025-12-21"));
        assert_eq!(period.end_date, make_date("2026-01-20"));
    }

    #[test]
    fn test_late_december_rolls_into_next_january() {
        let period = resolve_current_period(make_datetime("2025-12-31"), 25);
        assert_eq!(period.start_date, make_date("2025-12-26"));
        assert_eq!(period.end_date, make_date("2026-01-25"));
    }

    #[test]
    fn test_custom_cutoff_day() {
        let period = resolve_current_period(make_datetime("2025-06-10"), 5);
        assert_eq!(period.start_date, make_date("2025-06-06"));
        assert_eq!(period.end_date, make_date("2025-07-05"));
    }

    #[test]
    fn test_cutoff_28_in_march_starts_after_short_february() {
        // Day 29 of a 28-day February carries into 1 March
        let period = resolve_current_period(make_datetime("2025-03-05"), 28);
        assert_eq!(period.start_date, make_date("2025-03-01"));
        assert_eq!(period.end_date, make_date("2025-03-28"));

        // Leap year: 29 February exists
        let period = resolve_current_period(make_datetime("2024-03-05"), 28);
        assert_eq!(period.start_date, make_date("2024-02-29"));
    }

    #[test]
    fn test_resolve_period_for_month_january_rollover() {
        let period = resolve_period_for_month(YearMonth::new(2025, 1).unwrap());
        assert_eq!(period.start_date, make_date("2024-12-21"));
        assert_eq!(period.end_date, make_date("2025-01-20"));
        assert_eq!(period.start_instant().to_string(), "2024-12-21 00:00:00");
        assert_eq!(period.end_instant().to_string(), "2025-01-20 23:59:59");
    }

    #[test]
    fn test_resolve_period_for_month_mid_year() {
        let period = resolve_period_for_month(YearMonth::new(2025, 7).unwrap());
        assert_eq!(
            period.date_keys(),
            ("2025-06-21".to_string(), "2025-07-20".to_string())
        );
    }

    #[test]
    fn test_month_bounds() {
        let feb = month_bounds(YearMonth::new(2024, 2).unwrap());
        assert_eq!(feb.start_date, make_date("2024-02-01"));
        assert_eq!(feb.end_date, make_date("2024-02-29"));

        let dec = month_bounds(YearMonth::new(2025, 12).unwrap());
        assert_eq!(dec.end_date, make_date("2025-12-31"));
    }

    #[test]
    fn test_calendar_day_carries_in_both_directions() {
        assert_eq!(calendar_day(2025, -1, 21), make_date("2024-12-21"));
        assert_eq!(calendar_day(2025, 12, 20), make_date("2026-01-20"));
        assert_eq!(calendar_day(2025, 0, 0), make_date("2024-12-31"));
        assert_eq!(calendar_day(2025, 1, 31), make_date("2025-03-03"));
    }

    proptest! {
        #[test]
        fn prop_current_period_contains_now(
            days_since_epoch in 0i64..40_000,
            cutoff in 1u32..=28,
        ) {
            let date = make_date("1970-01-01") + Duration::days(days_since_epoch);
            let now = date.and_hms_opt(8, 30, 0).unwrap();
            let period = resolve_current_period(now, cutoff);

            prop_assert!(period.contains_date(date));
            prop_assert_eq!(period.end_date.day(), cutoff);
            prop_assert!(period.start_date <= period.end_date);
        }

        #[test]
        fn prop_month_period_ends_on_twentieth_of_selected_month(
            year in 1900i32..2200,
            month in 1u32..=12,
        ) {
            let ym = YearMonth::new(year, month).unwrap();
            let period = resolve_period_for_month(ym);

            prop_assert_eq!(period.end_date, NaiveDate::from_ymd_opt(year, month, 20).unwrap());
            prop_assert_eq!(period.start_date.day(), 21);
            prop_assert_eq!(YearMonth::of(period.start_date), ym.previous());
        }
    }
}

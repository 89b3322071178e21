//! Payroll aggregation.
//!
//! This module turns attendance records into per-employee payroll lines:
//! records are filtered to a period, each closed shift contributes its
//! effective hours (a manual override, else the strategy default), hours are
//! summed per employee and multiplied by the employee's hourly rate.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{
    HoursStrategy, PayrollLine, PayrollPeriod, ShiftHours, ShiftRecord, YearMonth,
};

use super::shift_normalizer::normalize;

/// Source of hourly rates for payroll.
///
/// An employee with no rate is left out of payroll entirely.
pub trait RateLookup {
    /// Returns the employee's pay per hour, if one is on file.
    fn hourly_rate(&self, employee_id: &str) -> Option<Decimal>;

    /// Returns the employee's display name, if known.
    fn display_name(&self, _employee_id: &str) -> Option<String> {
        None
    }
}

impl RateLookup for HashMap<String, Decimal> {
    fn hourly_rate(&self, employee_id: &str) -> Option<Decimal> {
        self.get(employee_id).copied()
    }
}

/// Computes the default hours for a closed shift under the given strategy.
///
/// Returns `None` while the shift is open.
pub fn default_hours(record: &ShiftRecord, strategy: HoursStrategy) -> Option<Decimal> {
    match strategy {
        HoursStrategy::RawElapsed => record.raw_elapsed_hours(),
        HoursStrategy::PolicyNormalized => record
            .closed_interval()
            .map(|(clock_in, clock_out)| normalize(clock_in, clock_out).as_decimal()),
    }
}

/// Computes the hours a closed shift contributes to pay.
///
/// A stored `final_hours` override wins over the strategy default. Open
/// shifts contribute nothing and return `None`, override or not.
///
/// # Examples
///
/// ```
/// use warfot_presensi::calculation::effective_hours;
/// use warfot_presensi::models::{GeoPoint, HoursStrategy, ShiftRecord};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let mut record = ShiftRecord::open("emp_001", None, at("2025-12-03 11:20"), GeoPoint { latitude: 0.0, longitude: 0.0 });
/// record.clock_out = Some(at("2025-12-03 21:00"));
///
/// assert_eq!(effective_hours(&record, HoursStrategy::PolicyNormalized), Some(Decimal::new(9, 0)));
/// assert_eq!(effective_hours(&record, HoursStrategy::RawElapsed), Some(Decimal::new(967, 2)));
///
/// record.final_hours = Some(Decimal::new(10, 0));
/// assert_eq!(effective_hours(&record, HoursStrategy::RawElapsed), Some(Decimal::new(10, 0)));
/// ```
pub fn effective_hours(record: &ShiftRecord, strategy: HoursStrategy) -> Option<Decimal> {
    if !record.is_closed() {
        return None;
    }
    record
        .final_hours
        .or_else(|| default_hours(record, strategy))
}

/// Aggregates attendance records into one payroll line per paid employee.
///
/// - Only records dated within `period` (inclusive) count.
/// - Records missing a clock-in or clock-out are skipped.
/// - Employees without a rate in `rates` are excluded from the output.
/// - Employees whose hours or pay would overflow a `Decimal` are excluded
///   from the output.
///
/// Lines are ordered by employee ID, so the same inputs always produce the
/// same output.
pub fn aggregate<R>(
    records: &[ShiftRecord],
    period: &PayrollPeriod,
    rates: &R,
    strategy: HoursStrategy,
) -> Vec<PayrollLine>
where
    R: RateLookup + ?Sized,
{
    // None marks an employee whose hour total overflowed
    let mut totals: BTreeMap<&str, Option<(Decimal, u32)>> = BTreeMap::new();

    for record in records.iter().filter(|r| period.contains_date(r.date)) {
        let Some(hours) = effective_hours(record, strategy) else {
            debug!(record_id = %record.id, "Skipping open shift");
            continue;
        };

        debug!(
            record_id = %record.id,
            employee_id = %record.employee_id,
            hours = %hours,
            overridden = record.final_hours.is_some(),
            "Counting shift"
        );

        let entry = totals
            .entry(record.employee_id.as_str())
            .or_insert(Some((Decimal::ZERO, 0)));
        *entry = entry.and_then(|(sum, count)| Some((sum.checked_add(hours)?, count + 1)));
    }

    totals
        .into_iter()
        .filter_map(|(employee_id, total)| {
            let Some((total_hours, shift_count)) = total else {
                warn!(
                    employee_id = %employee_id,
                    period = %period,
                    "Hour total overflowed, excluding employee from payroll"
                );
                return None;
            };

            let Some(hourly_rate) = rates.hourly_rate(employee_id) else {
                warn!(
                    employee_id = %employee_id,
                    period = %period,
                    "No hourly rate on file, excluding employee from payroll"
                );
                return None;
            };

            let Some(total_pay) = total_hours.checked_mul(hourly_rate) else {
                warn!(
                    employee_id = %employee_id,
                    period = %period,
                    total_hours = %total_hours,
                    hourly_rate = %hourly_rate,
                    "Pay overflowed, excluding employee from payroll"
                );
                return None;
            };

            Some(PayrollLine {
                employee_id: employee_id.to_string(),
                employee_name: rates.display_name(employee_id),
                shift_count,
                total_hours,
                hourly_rate,
                total_pay,
            })
        })
        .collect()
}

/// Lists every shift in the period as a payroll breakdown row, newest first.
///
/// Open shifts are included with zero effective hours so the administrator
/// can see them.
pub fn shift_breakdown(
    records: &[ShiftRecord],
    period: &PayrollPeriod,
    strategy: HoursStrategy,
) -> Vec<ShiftHours> {
    let mut rows: Vec<ShiftHours> = records
        .iter()
        .filter(|r| period.contains_date(r.date))
        .map(|record| {
            let computed = default_hours(record, strategy);
            ShiftHours {
                record_id: record.id.clone(),
                date: record.date,
                clock_in: record.clock_in,
                clock_out: record.clock_out,
                default_hours: computed,
                final_hours: record.final_hours,
                effective_hours: record.final_hours.or(computed).unwrap_or(Decimal::ZERO),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.record_id.cmp(&b.record_id)));
    rows
}

/// Returns the records dated within a calendar month, newest first.
pub fn records_in_month(records: &[ShiftRecord], year_month: YearMonth) -> Vec<ShiftRecord> {
    let mut selected: Vec<ShiftRecord> = records
        .iter()
        .filter(|r| year_month.contains(r.date))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::resolve_period_for_month;
    use crate::models::GeoPoint;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn office() -> GeoPoint {
        GeoPoint {
            latitude: -6.9147,
            longitude: 107.6098,
        }
    }

    fn shift(employee_id: &str, date: &str, clock_in: &str, clock_out: Option<&str>) -> ShiftRecord {
        let mut record =
            ShiftRecord::open(employee_id, None, make_datetime(date, clock_in), office());
        record.clock_out = clock_out.map(|t| make_datetime(date, t));
        record
    }

    fn december_period() -> PayrollPeriod {
        resolve_period_for_month(YearMonth::new(2025, 12).unwrap())
    }

    fn rates() -> HashMap<String, Decimal> {
        HashMap::from([
            ("ani".to_string(), dec("25000")),
            ("budi".to_string(), dec("30000")),
        ])
    }

    fn sample_records() -> Vec<ShiftRecord> {
        vec![
            // ani: 10 + 9 policy hours, 10 + 9.67 raw
            shift("ani", "2025-12-01", "11:00:00", Some("21:00:00")),
            shift("ani", "2025-12-02", "11:20:00", Some("21:00:00")),
            // budi: 9 policy hours, 9.75 raw
            shift("budi", "2025-12-01", "11:00:00", Some("20:45:00")),
            // budi: open shift, ignored
            shift("budi", "2025-12-02", "11:05:00", None),
        ]
    }

    /// AG-001: policy-normalized totals per employee
    #[test]
    fn test_aggregate_policy_normalized() {
        let lines = aggregate(
            &sample_records(),
            &december_period(),
            &rates(),
            HoursStrategy::PolicyNormalized,
        );

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].employee_id, "ani");
        assert_eq!(lines[0].shift_count, 2);
        assert_eq!(lines[0].total_hours, dec("19"));
        assert_eq!(lines[0].total_pay, dec("475000"));

        assert_eq!(lines[1].employee_id, "budi");
        assert_eq!(lines[1].shift_count, 1);
        assert_eq!(lines[1].total_hours, dec("9"));
        assert_eq!(lines[1].total_pay, dec("270000"));
    }

    /// AG-002: raw elapsed totals per employee
    #[test]
    fn test_aggregate_raw_elapsed() {
        let lines = aggregate(
            &sample_records(),
            &december_period(),
            &rates(),
            HoursStrategy::RawElapsed,
        );

        assert_eq!(lines[0].total_hours, dec("19.67"));
        assert_eq!(lines[0].total_pay, dec("491750"));
        assert_eq!(lines[1].total_hours, dec("9.75"));
        assert_eq!(lines[1].total_pay, dec("292500"));
    }

    #[test]
    fn test_aggregate_filters_by_period_inclusive() {
        let records = vec![
            shift("ani", "2025-11-20", "11:00:00", Some("21:00:00")), // before
            shift("ani", "2025-11-21", "11:00:00", Some("21:00:00")), // first day
            shift("ani", "2025-12-20", "11:00:00", Some("21:00:00")), // last day
            shift("ani", "2025-12-21", "11:00:00", Some("21:00:00")), // after
        ];

        let lines = aggregate(
            &records,
            &december_period(),
            &rates(),
            HoursStrategy::PolicyNormalized,
        );

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].shift_count, 2);
        assert_eq!(lines[0].total_hours, dec("20"));
    }

    #[test]
    fn test_aggregate_excludes_employee_without_rate() {
        let mut records = sample_records();
        records.push(shift("citra", "2025-12-03", "11:00:00", Some("21:00:00")));

        let lines = aggregate(
            &records,
            &december_period(),
            &rates(),
            HoursStrategy::PolicyNormalized,
        );

        assert!(lines.iter().all(|l| l.employee_id != "citra"));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_aggregate_excludes_employee_whose_pay_overflows() {
        // A stored override far beyond anything the API accepts
        let mut records = sample_records();
        records[0].final_hours = Some(Decimal::MAX);

        let lines = aggregate(
            &records,
            &december_period(),
            &rates(),
            HoursStrategy::PolicyNormalized,
        );

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].employee_id, "budi");
        assert_eq!(lines[0].total_pay, dec("270000"));
    }

    #[test]
    fn test_aggregate_excludes_employee_whose_hours_overflow() {
        let mut records = sample_records();
        records[0].final_hours = Some(Decimal::MAX);
        records[1].final_hours = Some(Decimal::MAX);
        let rates = HashMap::from([
            ("ani".to_string(), Decimal::ONE),
            ("budi".to_string(), dec("30000")),
        ]);

        let lines = aggregate(
            &records,
            &december_period(),
            &rates,
            HoursStrategy::PolicyNormalized,
        );

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].employee_id, "budi");
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let records = sample_records();
        let period = december_period();
        let first = aggregate(&records, &period, &rates(), HoursStrategy::RawElapsed);
        let second = aggregate(&records, &period, &rates(), HoursStrategy::RawElapsed);
        assert_eq!(first, second);
    }

    #[test]
    fn test_override_changes_only_that_employee_by_the_difference() {
        let period = december_period();
        let strategy = HoursStrategy::PolicyNormalized;
        let mut records = sample_records();
        let before = aggregate(&records, &period, &rates(), strategy);

        // ani's second shift computes to 9 hours; override to 7.5
        let previous = effective_hours(&records[1], strategy).unwrap();
        records[1].final_hours = Some(dec("7.5"));
        let after = aggregate(&records, &period, &rates(), strategy);

        assert_eq!(
            after[0].total_hours - before[0].total_hours,
            dec("7.5") - previous
        );
        assert_eq!(after[1], before[1]);
    }

    #[test]
    fn test_override_on_open_shift_is_ignored() {
        let mut records = sample_records();
        records[3].final_hours = Some(dec("8"));

        let lines = aggregate(
            &records,
            &december_period(),
            &rates(),
            HoursStrategy::PolicyNormalized,
        );
        assert_eq!(lines[1].shift_count, 1);
        assert_eq!(lines[1].total_hours, dec("9"));
    }

    #[test]
    fn test_aggregate_empty_records() {
        let lines = aggregate(
            &[],
            &december_period(),
            &rates(),
            HoursStrategy::PolicyNormalized,
        );
        assert!(lines.is_empty());
    }

    #[test]
    fn test_zero_rate_still_produces_line() {
        let rates = HashMap::from([("ani".to_string(), Decimal::ZERO)]);
        let lines = aggregate(
            &sample_records(),
            &december_period(),
            &rates,
            HoursStrategy::PolicyNormalized,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].total_pay, Decimal::ZERO);
    }

    #[test]
    fn test_shift_breakdown_lists_open_shift_with_zero_hours() {
        let budi: Vec<ShiftRecord> = sample_records()
            .into_iter()
            .filter(|r| r.employee_id == "budi")
            .collect();

        let rows = shift_breakdown(&budi, &december_period(), HoursStrategy::RawElapsed);

        assert_eq!(rows.len(), 2);
        // Newest first
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2025, 12, 2).unwrap());
        assert_eq!(rows[0].default_hours, None);
        assert_eq!(rows[0].effective_hours, Decimal::ZERO);
        assert_eq!(rows[1].default_hours, Some(dec("9.75")));
        assert_eq!(rows[1].effective_hours, dec("9.75"));
    }

    #[test]
    fn test_shift_breakdown_prefers_override() {
        let mut records = sample_records();
        records[0].final_hours = Some(dec("8"));

        let rows = shift_breakdown(&records[..1], &december_period(), HoursStrategy::RawElapsed);
        assert_eq!(rows[0].default_hours, Some(dec("10")));
        assert_eq!(rows[0].final_hours, Some(dec("8")));
        assert_eq!(rows[0].effective_hours, dec("8"));
    }

    #[test]
    fn test_records_in_month_newest_first() {
        let records = vec![
            shift("ani", "2025-11-30", "11:00:00", Some("21:00:00")),
            shift("ani", "2025-12-01", "11:00:00", Some("21:00:00")),
            shift("ani", "2025-12-15", "11:00:00", None),
            shift("ani", "2026-01-01", "11:00:00", None),
        ];

        let december = records_in_month(&records, YearMonth::new(2025, 12).unwrap());
        assert_eq!(december.len(), 2);
        assert_eq!(december[0].id, "ani_2025-12-15");
        assert_eq!(december[1].id, "ani_2025-12-01");
    }
}

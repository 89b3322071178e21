//! Payroll result models.
//!
//! This module contains the per-employee [`PayrollLine`], the per-shift
//! [`ShiftHours`] breakdown row, the [`PayrollReport`] wrapping a full
//! period, and the [`HoursStrategy`] that chooses the default hours for a
//! shift without a manual override.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::PayrollPeriod;

/// Which computed value seeds a shift's effective hours when no manual
/// override is stored.
///
/// # Example
///
/// ```
/// use warfot_presensi::models::HoursStrategy;
///
/// let strategy: HoursStrategy = serde_json::from_str("\"policy_normalized\"").unwrap();
/// assert_eq!(strategy, HoursStrategy::PolicyNormalized);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursStrategy {
    /// Whole hours from the shift policy (grace period, window cap, 10 hour ceiling).
    PolicyNormalized,
    /// Straight elapsed time, rounded to two decimal places.
    RawElapsed,
}

impl fmt::Display for HoursStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoursStrategy::PolicyNormalized => write!(f, "policy_normalized"),
            HoursStrategy::RawElapsed => write!(f, "raw_elapsed"),
        }
    }
}

/// One employee's aggregated payroll result for a period.
///
/// # Example
///
/// ```
/// use warfot_presensi::models::PayrollLine;
/// use rust_decimal::Decimal;
///
/// let line = PayrollLine {
///     employee_id: "emp_001".to_string(),
///     employee_name: Some("Ani Lestari".to_string()),
///     shift_count: 2,
///     total_hours: Decimal::new(19, 0),
///     hourly_rate: Decimal::new(25000, 0),
///     total_pay: Decimal::new(475000, 0),
/// };
/// assert_eq!(line.total_pay, line.total_hours * line.hourly_rate);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// The employee this line pays.
    pub employee_id: String,
    /// Display name from the roster, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    /// Number of closed shifts counted.
    pub shift_count: u32,
    /// Sum of effective hours across counted shifts.
    pub total_hours: Decimal,
    /// Pay per hour.
    pub hourly_rate: Decimal,
    /// `total_hours * hourly_rate`.
    pub total_pay: Decimal,
}

/// One shift as shown in an employee's payroll breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftHours {
    /// The attendance record ID.
    pub record_id: String,
    /// The calendar day of the shift.
    pub date: NaiveDate,
    /// Clock-in instant, if any.
    pub clock_in: Option<NaiveDateTime>,
    /// Clock-out instant, if any.
    pub clock_out: Option<NaiveDateTime>,
    /// Hours computed by the chosen strategy; `None` for an open shift.
    pub default_hours: Option<Decimal>,
    /// Stored manual override, if any.
    pub final_hours: Option<Decimal>,
    /// Hours counted toward pay: the override, else the default, else zero.
    pub effective_hours: Decimal,
}

/// Payroll for every paid employee over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// The period covered.
    pub period: PayrollPeriod,
    /// The strategy used for shifts without an override.
    pub strategy: HoursStrategy,
    /// One line per paid employee, ordered by employee ID.
    pub lines: Vec<PayrollLine>,
    /// Sum of `total_hours` across lines.
    pub total_hours: Decimal,
    /// Sum of `total_pay` across lines.
    pub total_pay: Decimal,
}

impl PayrollReport {
    /// Builds a report, totalling the given lines.
    ///
    /// A line that would overflow either total is dropped from the report.
    pub fn new(period: PayrollPeriod, strategy: HoursStrategy, lines: Vec<PayrollLine>) -> Self {
        let mut total_hours = Decimal::ZERO;
        let mut total_pay = Decimal::ZERO;
        let mut kept = Vec::with_capacity(lines.len());

        for line in lines {
            match (
                total_hours.checked_add(line.total_hours),
                total_pay.checked_add(line.total_pay),
            ) {
                (Some(hours), Some(pay)) => {
                    total_hours = hours;
                    total_pay = pay;
                    kept.push(line);
                }
                _ => warn!(
                    employee_id = %line.employee_id,
                    period = %period,
                    "Report total overflowed, excluding employee from payroll"
                ),
            }
        }

        Self {
            period,
            strategy,
            lines: kept,
            total_hours,
            total_pay,
        }
    }
}

/// One employee's payroll for a period, with the per-shift rows behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayroll {
    /// The employee ID.
    pub employee_id: String,
    /// The period covered.
    pub period: PayrollPeriod,
    /// The strategy used for shifts without an override.
    pub strategy: HoursStrategy,
    /// Every shift in the period, newest first.
    pub shifts: Vec<ShiftHours>,
    /// The aggregated line, absent when the employee has no rate or no closed shifts.
    pub line: Option<PayrollLine>,
}

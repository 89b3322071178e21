//! Payroll reports over the injected stores.

use chrono::NaiveDateTime;
use tracing::info;

use crate::calculation::{
    aggregate, resolve_current_period, resolve_period_for_month, shift_breakdown,
};
use crate::error::{PresensiError, PresensiResult};
use crate::models::{EmployeePayroll, HoursStrategy, PayrollPeriod, PayrollReport, YearMonth};
use crate::store::{AttendanceStore, RosterStore};

/// Builds the organization-wide payroll report for a period.
pub fn period_report<A, R>(
    attendance: &A,
    roster: &R,
    period: PayrollPeriod,
    strategy: HoursStrategy,
) -> PresensiResult<PayrollReport>
where
    A: AttendanceStore + ?Sized,
    R: RosterStore + ?Sized,
{
    let records = attendance.query_range(&period)?;
    let lines = aggregate(&records, &period, roster, strategy);
    let report = PayrollReport::new(period, strategy, lines);

    info!(
        period = %period,
        strategy = %strategy,
        records = records.len(),
        lines = report.lines.len(),
        total_pay = %report.total_pay,
        "Built payroll report"
    );
    Ok(report)
}

/// Builds the report for the period containing `now` under the given cutoff day.
pub fn current_report<A, R>(
    attendance: &A,
    roster: &R,
    now: NaiveDateTime,
    cutoff_day: u32,
    strategy: HoursStrategy,
) -> PresensiResult<PayrollReport>
where
    A: AttendanceStore + ?Sized,
    R: RosterStore + ?Sized,
{
    period_report(
        attendance,
        roster,
        resolve_current_period(now, cutoff_day),
        strategy,
    )
}

/// Builds the report for the fixed-cutoff period ending in `year_month`.
pub fn month_report<A, R>(
    attendance: &A,
    roster: &R,
    year_month: YearMonth,
    strategy: HoursStrategy,
) -> PresensiResult<PayrollReport>
where
    A: AttendanceStore + ?Sized,
    R: RosterStore + ?Sized,
{
    period_report(
        attendance,
        roster,
        resolve_period_for_month(year_month),
        strategy,
    )
}

/// Builds one employee's payroll breakdown for the fixed-cutoff period
/// ending in `year_month`.
///
/// # Errors
///
/// Returns [`PresensiError::EmployeeNotFound`] if the employee is not on the
/// roster.
pub fn employee_payroll<A, R>(
    attendance: &A,
    roster: &R,
    employee_id: &str,
    year_month: YearMonth,
    strategy: HoursStrategy,
) -> PresensiResult<EmployeePayroll>
where
    A: AttendanceStore + ?Sized,
    R: RosterStore + ?Sized,
{
    if roster.get(employee_id)?.is_none() {
        return Err(PresensiError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        });
    }

    let period = resolve_period_for_month(year_month);
    let records = attendance.query_by_employee(employee_id, &period)?;
    let shifts = shift_breakdown(&records, &period, strategy);
    let line = aggregate(&records, &period, roster, strategy).into_iter().next();

    Ok(EmployeePayroll {
        employee_id: employee_id.to_string(),
        period,
        strategy,
        shifts,
        line,
    })
}

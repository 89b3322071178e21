//! Attendance operations: clock-in, clock-out, hour overrides and the
//! monthly recap.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::{month_bounds, records_in_month};
use crate::error::{PresensiError, PresensiResult};
use crate::models::{GeoPoint, MAX_FINAL_HOURS, ShiftRecord, YearMonth};
use crate::store::{AttendanceStore, RosterStore};

/// Records a clock-in for an employee at a local instant.
///
/// The record ID is derived from the employee and the calendar day of `at`.
/// A second clock-in on the same day is rejected and the stored record is
/// left untouched.
///
/// # Errors
///
/// - [`PresensiError::EmployeeNotFound`] if the employee is not on the roster
/// - [`PresensiError::AlreadyClockedIn`] if a record for that day exists
pub fn clock_in<A, R>(
    attendance: &A,
    roster: &R,
    employee_id: &str,
    at: NaiveDateTime,
    location: GeoPoint,
) -> PresensiResult<ShiftRecord>
where
    A: AttendanceStore + ?Sized,
    R: RosterStore + ?Sized,
{
    let employee = roster
        .get(employee_id)?
        .ok_or_else(|| PresensiError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        })?;

    let record_id = ShiftRecord::record_id(employee_id, at.date());
    if let Some(existing) = attendance.get(&record_id)? {
        warn!(record_id = %record_id, "Rejected duplicate clock-in");
        return Err(PresensiError::AlreadyClockedIn {
            employee_id: employee_id.to_string(),
            date: existing.date,
            clock_in: existing.clock_in.unwrap_or(at),
        });
    }

    let record = ShiftRecord::open(employee_id, Some(employee.email), at, location);
    attendance.upsert(record.clone())?;

    info!(record_id = %record.id, clock_in = %at, "Clocked in");
    Ok(record)
}

/// Records a clock-out on the employee's record for the day of `at`.
///
/// Clocking out again overwrites the earlier clock-out.
///
/// # Errors
///
/// - [`PresensiError::NotClockedIn`] if there is no record for that day
/// - [`PresensiError::InvalidShift`] if `at` is before the stored clock-in
pub fn clock_out<A>(
    attendance: &A,
    employee_id: &str,
    at: NaiveDateTime,
    location: GeoPoint,
) -> PresensiResult<ShiftRecord>
where
    A: AttendanceStore + ?Sized,
{
    let date = at.date();
    let record_id = ShiftRecord::record_id(employee_id, date);
    let mut record = attendance
        .get(&record_id)?
        .ok_or_else(|| PresensiError::NotClockedIn {
            employee_id: employee_id.to_string(),
            date,
        })?;

    if let Some(clock_in) = record.clock_in {
        if at < clock_in {
            return Err(PresensiError::InvalidShift {
                record_id,
                message: format!(
                    "clock-out {} is before clock-in {}",
                    at.format("%H:%M"),
                    clock_in.format("%H:%M")
                ),
            });
        }
    }

    if record.clock_out.is_some() {
        info!(record_id = %record.id, "Overwriting earlier clock-out");
    }
    record.clock_out = Some(at);
    record.location_out = Some(location);
    attendance.upsert(record.clone())?;

    info!(record_id = %record.id, clock_out = %at, "Clocked out");
    Ok(record)
}

/// Stores an administrator's manual hours for one shift.
///
/// # Errors
///
/// - [`PresensiError::InvalidHours`] if `hours` is negative or above [`MAX_FINAL_HOURS`]
/// - [`PresensiError::RecordNotFound`] if the record does not exist
pub fn override_final_hours<A>(
    attendance: &A,
    record_id: &str,
    hours: Decimal,
) -> PresensiResult<ShiftRecord>
where
    A: AttendanceStore + ?Sized,
{
    if hours < Decimal::ZERO {
        return Err(PresensiError::InvalidHours {
            record_id: record_id.to_string(),
            message: format!("final hours must not be negative, got {}", hours),
        });
    }
    if hours > Decimal::from(MAX_FINAL_HOURS) {
        return Err(PresensiError::InvalidHours {
            record_id: record_id.to_string(),
            message: format!("final hours must not exceed {}, got {}", MAX_FINAL_HOURS, hours),
        });
    }

    let record = attendance.set_final_hours(record_id, hours)?;
    info!(record_id = %record_id, final_hours = %hours, "Stored final hours override");
    Ok(record)
}

/// Returns the employee's record for the calendar day of `now`, if any.
///
/// # Errors
///
/// - [`PresensiError::EmployeeNotFound`] if the employee is not on the roster
pub fn today_record<A, R>(
    attendance: &A,
    roster: &R,
    employee_id: &str,
    now: NaiveDateTime,
) -> PresensiResult<Option<ShiftRecord>>
where
    A: AttendanceStore + ?Sized,
    R: RosterStore + ?Sized,
{
    if roster.get(employee_id)?.is_none() {
        return Err(PresensiError::EmployeeNotFound {
            employee_id: employee_id.to_string(),
        });
    }
    attendance.get(&ShiftRecord::record_id(employee_id, now.date()))
}

/// Lists one employee's records in a calendar month, newest first.
pub fn monthly_recap<A>(
    attendance: &A,
    employee_id: &str,
    year_month: YearMonth,
) -> PresensiResult<Vec<ShiftRecord>>
where
    A: AttendanceStore + ?Sized,
{
    let records = attendance.query_by_employee(employee_id, &month_bounds(year_month))?;
    Ok(records_in_month(&records, year_month))
}

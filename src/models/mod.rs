//! Core data models for Warfot Presensi.
//!
//! This module contains the attendance, roster and payroll types shared by
//! the calculation, store and API layers.

mod employee;
mod payroll_line;
mod payroll_period;
mod shift_record;

pub use employee::{Employee, MAX_HOURLY_RATE, Role};
pub use payroll_line::{EmployeePayroll, HoursStrategy, PayrollLine, PayrollReport, ShiftHours};
pub use payroll_period::{PayrollPeriod, YearMonth};
pub use shift_record::{GeoPoint, MAX_FINAL_HOURS, ShiftRecord};

//! Application services for Warfot Presensi.
//!
//! Each operation takes its stores as parameters, so the same code runs
//! against the in-memory stores in tests and behind the HTTP API.

mod attendance;
mod payroll;
mod roster;

pub use attendance::{clock_in, clock_out, monthly_recap, override_final_hours, today_record};
pub use payroll::{current_report, employee_payroll, month_report, period_report};
pub use roster::{create_employee, list_employees, update_employee};

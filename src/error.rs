//! Error types for Warfot Presensi.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for everything that can go wrong outside the pure calculation functions:
//! configuration loading, store access, and attendance state transitions.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// The main error type for Warfot Presensi.
///
/// The calculation functions never fail; every fallible operation in the
/// stores, services and configuration layer returns this error type.
///
/// # Example
///
/// ```
/// use warfot_presensi::error::PresensiError;
///
/// let error = PresensiError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum PresensiError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was outside its accepted range.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSetting {
        /// The setting that was rejected.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// No roster entry exists for the employee.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee ID that was looked up.
        employee_id: String,
    },

    /// A new roster entry reused an existing employee ID.
    #[error("Employee already exists: {employee_id}")]
    EmployeeExists {
        /// The ID that is already taken.
        employee_id: String,
    },

    /// No attendance record exists with the given ID.
    #[error("Attendance record not found: {record_id}")]
    RecordNotFound {
        /// The record ID that was looked up.
        record_id: String,
    },

    /// The employee already clocked in on this day.
    #[error("Employee '{employee_id}' already clocked in on {date} at {}", .clock_in.format("%H:%M"))]
    AlreadyClockedIn {
        /// The employee who attempted the second clock-in.
        employee_id: String,
        /// The calendar day of the existing record.
        date: NaiveDate,
        /// The clock-in already recorded.
        clock_in: NaiveDateTime,
    },

    /// The employee tried to clock out without clocking in first.
    #[error("Employee '{employee_id}' has not clocked in on {date}")]
    NotClockedIn {
        /// The employee who attempted to clock out.
        employee_id: String,
        /// The calendar day with no clock-in.
        date: NaiveDate,
    },

    /// An attendance record was invalid or contained inconsistent data.
    #[error("Invalid shift '{record_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid record.
        record_id: String,
        /// A description of what made the record invalid.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A year-month selector could not be parsed.
    #[error("Invalid year-month '{value}', expected YYYY-MM")]
    InvalidYearMonth {
        /// The rejected input.
        value: String,
    },

    /// A manual hours override was rejected.
    #[error("Invalid hours for record '{record_id}': {message}")]
    InvalidHours {
        /// The record the override targeted.
        record_id: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The backing store failed.
    #[error("Store error: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return PresensiError.
pub type PresensiResult<T> = Result<T, PresensiError>;

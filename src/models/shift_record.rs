//! Attendance record model and related types.
//!
//! This module defines the [`ShiftRecord`] and [`GeoPoint`] structs for
//! representing one employee's clock-in/clock-out pair on one calendar day.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Most hours a manual override may assign to one calendar day.
pub const MAX_FINAL_HOURS: u32 = 24;

/// A geographic position captured with a clock event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// One attendance event pair for one employee on one calendar day.
///
/// All instants are local wall-clock times for the organization; the
/// record never carries an offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Record identifier, see [`ShiftRecord::record_id`].
    pub id: String,
    /// The employee the shift belongs to.
    pub employee_id: String,
    /// Email of the employee at clock-in time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// The calendar day the shift is attributed to.
    pub date: NaiveDate,
    /// When the employee clocked in, if they have.
    #[serde(default)]
    pub clock_in: Option<NaiveDateTime>,
    /// When the employee clocked out, if they have.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
    /// Where the employee clocked in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_in: Option<GeoPoint>,
    /// Where the employee clocked out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_out: Option<GeoPoint>,
    /// Billable hours set manually by an administrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_hours: Option<Decimal>,
}

impl ShiftRecord {
    /// Builds the record ID for an employee and day.
    ///
    /// There is at most one record per employee per calendar day.
    ///
    /// # Examples
    ///
    /// ```
    /// use warfot_presensi::models::ShiftRecord;
    /// use chrono::NaiveDate;
    ///
    /// let id = ShiftRecord::record_id("emp_001", NaiveDate::from_ymd_opt(2025, 12, 3).unwrap());
    /// assert_eq!(id, "emp_001_2025-12-03");
    /// ```
    pub fn record_id(employee_id: &str, date: NaiveDate) -> String {
        format!("{}_{}", employee_id, date.format("%Y-%m-%d"))
    }

    /// Opens a new record for a clock-in.
    pub fn open(
        employee_id: impl Into<String>,
        email: Option<String>,
        clock_in: NaiveDateTime,
        location: GeoPoint,
    ) -> Self {
        let employee_id = employee_id.into();
        let date = clock_in.date();
        Self {
            id: Self::record_id(&employee_id, date),
            employee_id,
            email,
            date,
            clock_in: Some(clock_in),
            clock_out: None,
            location_in: Some(location),
            location_out: None,
            final_hours: None,
        }
    }

    /// Returns both instants when the shift has been clocked in and out.
    pub fn closed_interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.clock_in.zip(self.clock_out)
    }

    /// Returns true when both clock-in and clock-out are present.
    pub fn is_closed(&self) -> bool {
        self.closed_interval().is_some()
    }

    /// Calculates the straight elapsed hours between clock-in and clock-out.
    ///
    /// A clock-out before the clock-in yields zero. The result is rounded to
    /// two decimal places. Returns `None` while the shift is still open.
    ///
    /// # Examples
    ///
    /// ```
    /// use warfot_presensi::models::{GeoPoint, ShiftRecord};
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let clock_in = NaiveDateTime::parse_from_str("2025-12-03 11:05:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let mut record = ShiftRecord::open("emp_001", None, clock_in, GeoPoint { latitude: -6.2, longitude: 106.8 });
    /// assert_eq!(record.raw_elapsed_hours(), None);
    ///
    /// record.clock_out = Some(NaiveDateTime::parse_from_str("2025-12-03 19:35:00", "%Y-%m-%d %H:%M:%S").unwrap());
    /// assert_eq!(record.raw_elapsed_hours(), Some(Decimal::new(850, 2))); // 8.50
    /// ```
    pub fn raw_elapsed_hours(&self) -> Option<Decimal> {
        let (clock_in, clock_out) = self.closed_interval()?;
        let elapsed_ms = (clock_out - clock_in).num_milliseconds();
        if elapsed_ms <= 0 {
            return Some(Decimal::ZERO);
        }

        let hours = Decimal::new(elapsed_ms, 0) / Decimal::new(MILLIS_PER_HOUR, 0);
        Some(hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }
}

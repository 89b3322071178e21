//! Shift normalization.
//!
//! This module converts a raw clock-in/clock-out pair into the whole number
//! of billable hours allowed by the shift policy:
//!
//! - The nominal shift runs 11:00 to 21:00.
//! - Clocking in at or before 11:15 counts from 11:00. Clocking in any later
//!   forfeits the whole first hour and counts from 12:00.
//! - Clocking out after 21:00 counts until 21:00. Otherwise only the whole
//!   clock-out hour counts; its minutes are dropped.
//! - The result is clamped to `[0, 10]`.
//!
//! Instants are local wall-clock times. No time zone conversion happens here.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hour of day the shift starts.
pub const SHIFT_START_HOUR: u32 = 11;

/// Minutes after [`SHIFT_START_HOUR`] that still count as on time (inclusive).
pub const GRACE_PERIOD_MINUTES: u32 = 15;

/// Hour of day the shift ends; later clock-outs are capped here.
pub const SHIFT_END_HOUR: u32 = 21;

/// Most hours a single shift can be worth.
pub const MAX_SHIFT_HOURS: u32 = 10;

/// Billable whole hours for one shift, always within `[0, 10]`.
///
/// # Example
///
/// ```
/// use warfot_presensi::calculation::NormalizedHours;
/// use rust_decimal::Decimal;
///
/// let hours = NormalizedHours::clamped(14);
/// assert_eq!(hours.hours(), 10);
/// assert_eq!(hours.as_decimal(), Decimal::new(10, 0));
/// assert_eq!(NormalizedHours::clamped(-3).hours(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedHours(u32);

impl NormalizedHours {
    /// No billable hours.
    pub const ZERO: NormalizedHours = NormalizedHours(0);

    /// A full shift.
    pub const MAX: NormalizedHours = NormalizedHours(MAX_SHIFT_HOURS);

    /// Clamps a signed hour count into `[0, 10]`.
    pub fn clamped(hours: i64) -> Self {
        // Clamped to 0..=10, so the cast is lossless
        Self(hours.clamp(0, i64::from(MAX_SHIFT_HOURS)) as u32)
    }

    /// Returns the whole hours.
    pub fn hours(&self) -> u32 {
        self.0
    }

    /// Returns the hours as a Decimal for pay arithmetic.
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for NormalizedHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The result of normalizing one shift, including which policy branches applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftNormalization {
    /// Hour of day counted as the start.
    pub effective_start_hour: u32,
    /// Hour of day counted as the end.
    pub effective_end_hour: u32,
    /// True when a late clock-in forfeited the first hour.
    pub first_hour_forfeited: bool,
    /// True when the clock-out was capped at [`SHIFT_END_HOUR`].
    pub end_capped: bool,
    /// The billable hours.
    pub hours: NormalizedHours,
}

/// Computes the billable hours for a shift.
///
/// Pure and total; see [`normalize_detailed`] for the intermediate values.
///
/// # Examples
///
/// ```
/// use warfot_presensi::calculation::normalize;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
///
/// assert_eq!(normalize(at("2025-12-03 11:00"), at("2025-12-03 21:00")).hours(), 10);
/// assert_eq!(normalize(at("2025-12-03 11:20"), at("2025-12-03 21:00")).hours(), 9);
/// assert_eq!(normalize(at("2025-12-03 11:00"), at("2025-12-03 20:45")).hours(), 9);
/// ```
pub fn normalize(clock_in: NaiveDateTime, clock_out: NaiveDateTime) -> NormalizedHours {
    normalize_detailed(clock_in, clock_out).hours
}

/// Computes the billable hours for a shift along with the effective window.
pub fn normalize_detailed(clock_in: NaiveDateTime, clock_out: NaiveDateTime) -> ShiftNormalization {
    let on_time = clock_in.hour() < SHIFT_START_HOUR
        || (clock_in.hour() == SHIFT_START_HOUR && clock_in.minute() <= GRACE_PERIOD_MINUTES);
    let effective_start_hour = if on_time {
        SHIFT_START_HOUR
    } else {
        SHIFT_START_HOUR + 1
    };

    let end_capped = clock_out.hour() > SHIFT_END_HOUR
        || (clock_out.hour() == SHIFT_END_HOUR && clock_out.minute() > 0);
    let effective_end_hour = if end_capped {
        SHIFT_END_HOUR
    } else {
        clock_out.hour()
    };

    let hours = NormalizedHours::clamped(
        i64::from(effective_end_hour) - i64::from(effective_start_hour),
    );

    ShiftNormalization {
        effective_start_hour,
        effective_end_hour,
        first_hour_forfeited: !on_time,
        end_capped,
        hours,
    }
}

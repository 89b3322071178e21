//! Request types for the Warfot Presensi API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! attendance, roster and payroll endpoints.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, GeoPoint, HoursStrategy, Role, YearMonth};

/// Request body for `/attendance/clock-in` and `/attendance/clock-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockRequest {
    /// The employee clocking in or out.
    pub employee_id: String,
    /// Device latitude at the time of the event.
    pub latitude: f64,
    /// Device longitude at the time of the event.
    pub longitude: f64,
    /// Local instant of the event; the server's local clock when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<NaiveDateTime>,
}

impl ClockRequest {
    /// Returns the reported position.
    pub fn location(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Request body for `/attendance/:record_id/final-hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalHoursRequest {
    /// The hours an administrator decided to pay for the shift.
    pub final_hours: Decimal,
}

/// Request body for `PUT /employees/:employee_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Access role; required so a replacement never silently changes it.
    pub role: Role,
    /// Pay per hour.
    pub hourly_rate: Decimal,
    /// Profile photo location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl UpdateEmployeeRequest {
    /// Builds the replacement profile for the employee with the given ID.
    pub fn into_employee(self, id: String) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
            hourly_rate: Some(self.hourly_rate),
            photo_url: self.photo_url,
        }
    }
}

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Roster ID for the new employee.
    pub id: String,
    pub name: String,
    pub email: String,
    /// Access role; staff when omitted.
    #[serde(default)]
    pub role: Role,
    /// Pay per hour; may be filled in later by an administrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl From<CreateEmployeeRequest> for Employee {
    fn from(request: CreateEmployeeRequest) -> Self {
        Employee {
            id: request.id,
            name: request.name,
            email: request.email,
            role: request.role,
            hourly_rate: request.hourly_rate,
            photo_url: request.photo_url,
        }
    }
}

/// Query string for `GET /employees`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleQuery {
    /// Role to list; staff when omitted.
    #[serde(default)]
    pub role: Role,
}

/// Query string for the monthly attendance recap.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthQuery {
    /// Month to list; the current local month when omitted.
    pub month: Option<YearMonth>,
}

/// Query string for payroll views of a fixed month.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrategyQuery {
    /// Hours strategy for shifts without an override.
    pub strategy: Option<HoursStrategy>,
}

/// Query string for `GET /payroll/current`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentPayrollQuery {
    /// Hours strategy for shifts without an override.
    pub strategy: Option<HoursStrategy>,
    /// Local instant to resolve the period from; the server's local clock
    /// when omitted.
    pub at: Option<NaiveDateTime>,
}

/// Query string for `GET /employees/:employee_id/attendance/today`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodayQuery {
    /// Local instant whose calendar day is looked up; the server's local
    /// clock when omitted.
    pub at: Option<NaiveDateTime>,
}

//! Configuration types for Warfot Presensi.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::DEFAULT_CUTOFF_DAY;
use crate::error::{PresensiError, PresensiResult};
use crate::models::{Employee, Role};

/// Largest UTC offset accepted, in minutes (UTC+14:00).
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

fn default_cutoff_day() -> u32 {
    DEFAULT_CUTOFF_DAY
}

fn default_utc_offset_minutes() -> i32 {
    // Western Indonesia Time, UTC+7
    7 * 60
}

fn default_listen_port() -> u16 {
    8080
}

/// Organization-wide settings from `settings.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Display name of the organization.
    pub organization: String,
    /// Day of month that closes a payroll period, 1 through 28.
    #[serde(default = "default_cutoff_day")]
    pub cutoff_day: u32,
    /// Offset of the organization's local time from UTC, in minutes.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
}

impl Settings {
    /// Checks that every setting is within its accepted range.
    pub fn validate(&self) -> PresensiResult<()> {
        if !(1..=28).contains(&self.cutoff_day) {
            return Err(PresensiError::InvalidSetting {
                field: "cutoff_day".to_string(),
                message: format!("{} is outside 1..=28", self.cutoff_day),
            });
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(PresensiError::InvalidSetting {
                field: "utc_offset_minutes".to_string(),
                message: format!("{} is beyond +/-14 hours", self.utc_offset_minutes),
            });
        }
        Ok(())
    }

    /// Returns the organization's fixed UTC offset.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    /// Returns the current wall-clock time in the organization's time zone.
    pub fn local_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.utc_offset()).naive_local()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            organization: "Warfot".to_string(),
            cutoff_day: default_cutoff_day(),
            utc_offset_minutes: default_utc_offset_minutes(),
            listen_port: default_listen_port(),
        }
    }
}

/// One employee as listed in `roster.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Access role.
    #[serde(default)]
    pub role: Role,
    /// Pay per hour.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Profile photo URL.
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Roster configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Map of employee ID to roster entry.
    #[serde(default)]
    pub employees: BTreeMap<String, RosterEntry>,
}

impl RosterConfig {
    /// Converts the entries into employees, ordered by ID.
    pub fn into_employees(self) -> Vec<Employee> {
        self.employees
            .into_iter()
            .map(|(id, entry)| Employee {
                id,
                name: entry.name,
                email: entry.email,
                role: entry.role,
                hourly_rate: entry.hourly_rate,
                photo_url: entry.photo_url,
            })
            .collect()
    }
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PresensiConfig {
    /// Organization settings.
    settings: Settings,
    /// Employees seeding the roster.
    employees: Vec<Employee>,
}

impl PresensiConfig {
    /// Creates a new PresensiConfig from its component parts.
    pub fn new(settings: Settings, employees: Vec<Employee>) -> Self {
        Self {
            settings,
            employees,
        }
    }

    /// Returns the organization settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the configured employees.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}

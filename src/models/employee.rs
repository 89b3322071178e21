//! Employee roster model and related types.
//!
//! This module defines the [`Employee`] roster entry and the [`Role`] enum.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PresensiError, PresensiResult};

/// Highest hourly rate a profile may carry.
pub const MAX_HOURLY_RATE: i64 = 10_000_000;

/// The access role of a roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Staff clock in and out and are paid per hour.
    #[default]
    Staff,
    /// Administrators review attendance, edit profiles and run payroll.
    Admin,
}

/// A roster entry for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Access role.
    #[serde(default)]
    pub role: Role,
    /// Pay per hour. Employees without a rate are left out of payroll.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Profile photo URL on the external media host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Employee {
    /// Returns true if the employee is an administrator.
    ///
    /// # Examples
    ///
    /// ```
    /// use warfot_presensi::models::{Employee, Role};
    ///
    /// let admin = Employee {
    ///     id: "adm_001".to_string(),
    ///     name: "Rina".to_string(),
    ///     email: "rina@warfot.id".to_string(),
    ///     role: Role::Admin,
    ///     hourly_rate: None,
    ///     photo_url: None,
    /// };
    /// assert!(admin.is_admin());
    /// ```
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Checks the profile fields an administrator can edit.
    ///
    /// Name must be non-blank, email must look like an address and the
    /// hourly rate, when set, must lie in `[0, MAX_HOURLY_RATE]`.
    pub fn validate(&self) -> PresensiResult<()> {
        if self.id.trim().is_empty() {
            return Err(invalid("id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name", "must not be empty"));
        }
        if !self.email.contains('@') {
            return Err(invalid("email", "must be an email address"));
        }
        if let Some(rate) = self.hourly_rate {
            if rate < Decimal::ZERO {
                return Err(invalid("hourly_rate", "must not be negative"));
            }
            if rate > Decimal::from(MAX_HOURLY_RATE) {
                return Err(invalid("hourly_rate", "exceeds the maximum hourly rate"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> PresensiError {
    PresensiError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}

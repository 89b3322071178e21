//! Roster operations.

use tracing::info;

use crate::error::{PresensiError, PresensiResult};
use crate::models::{Employee, Role};
use crate::store::RosterStore;

/// Lists the employees holding a role.
pub fn list_employees<R>(roster: &R, role: Role) -> PresensiResult<Vec<Employee>>
where
    R: RosterStore + ?Sized,
{
    roster.list_by_role(role)
}

/// Adds a new employee to the roster.
///
/// # Errors
///
/// - [`PresensiError::InvalidEmployee`] if a required field is blank or the rate is out of range
/// - [`PresensiError::EmployeeExists`] if the ID is already on the roster
pub fn create_employee<R>(roster: &R, employee: Employee) -> PresensiResult<Employee>
where
    R: RosterStore + ?Sized,
{
    employee.validate()?;
    roster.insert(employee.clone())?;
    info!(employee_id = %employee.id, role = ?employee.role, "Added employee to roster");
    Ok(employee)
}

/// Replaces an existing employee's profile.
///
/// The employee must already be on the roster; the ID in `employee` picks
/// the entry to replace.
///
/// # Errors
///
/// - [`PresensiError::InvalidEmployee`] if a required field is blank or the rate is out of range
/// - [`PresensiError::EmployeeNotFound`] if no such employee exists
pub fn update_employee<R>(roster: &R, employee: Employee) -> PresensiResult<Employee>
where
    R: RosterStore + ?Sized,
{
    employee.validate()?;

    if roster.get(&employee.id)?.is_none() {
        return Err(PresensiError::EmployeeNotFound {
            employee_id: employee.id,
        });
    }

    roster.upsert(employee.clone())?;
    info!(employee_id = %employee.id, role = ?employee.role, "Updated employee profile");
    Ok(employee)
}

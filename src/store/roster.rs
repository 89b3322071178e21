//! Employee roster storage.
//!
//! This module defines the [`RosterStore`] trait and an in-memory
//! implementation seeded from `roster.yaml`.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculation::RateLookup;
use crate::error::{PresensiError, PresensiResult};
use crate::models::{Employee, Role};

/// Storage for employee roster entries.
///
/// Every roster is also a [`RateLookup`], so it can be handed straight to
/// the payroll aggregator.
pub trait RosterStore: RateLookup + Send + Sync {
    /// Fetches one employee by ID.
    fn get(&self, employee_id: &str) -> PresensiResult<Option<Employee>>;

    /// Lists employees with the given role, ordered by ID.
    fn list_by_role(&self, role: Role) -> PresensiResult<Vec<Employee>>;

    /// Inserts an employee, replacing any entry with the same ID.
    fn upsert(&self, employee: Employee) -> PresensiResult<()>;

    /// Adds a new employee.
    ///
    /// Fails with [`PresensiError::EmployeeExists`] when the ID is taken; the
    /// existing entry is left untouched.
    fn insert(&self, employee: Employee) -> PresensiResult<()>;
}

/// A [`RosterStore`] held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRoster {
    employees: RwLock<BTreeMap<String, Employee>>,
}

impl InMemoryRoster {
    /// Creates a roster holding the given employees.
    pub fn new(employees: impl IntoIterator<Item = Employee>) -> Self {
        let employees = employees
            .into_iter()
            .map(|employee| (employee.id.clone(), employee))
            .collect();
        Self {
            employees: RwLock::new(employees),
        }
    }

    fn read(&self) -> PresensiResult<RwLockReadGuard<'_, BTreeMap<String, Employee>>> {
        self.employees.read().map_err(|_| PresensiError::StoreError {
            message: "roster lock poisoned".to_string(),
        })
    }

    fn write(&self) -> PresensiResult<RwLockWriteGuard<'_, BTreeMap<String, Employee>>> {
        self.employees.write().map_err(|_| PresensiError::StoreError {
            message: "roster lock poisoned".to_string(),
        })
    }
}

impl RosterStore for InMemoryRoster {
    fn get(&self, employee_id: &str) -> PresensiResult<Option<Employee>> {
        Ok(self.read()?.get(employee_id).cloned())
    }

    fn list_by_role(&self, role: Role) -> PresensiResult<Vec<Employee>> {
        Ok(self
            .read()?
            .values()
            .filter(|employee| employee.role == role)
            .cloned()
            .collect())
    }

    fn upsert(&self, employee: Employee) -> PresensiResult<()> {
        self.write()?.insert(employee.id.clone(), employee);
        Ok(())
    }

    fn insert(&self, employee: Employee) -> PresensiResult<()> {
        let mut employees = self.write()?;
        if employees.contains_key(&employee.id) {
            return Err(PresensiError::EmployeeExists {
                employee_id: employee.id,
            });
        }
        employees.insert(employee.id.clone(), employee);
        Ok(())
    }
}

impl RateLookup for InMemoryRoster {
    fn hourly_rate(&self, employee_id: &str) -> Option<Decimal> {
        match RosterStore::get(self, employee_id) {
            Ok(employee) => employee.and_then(|e| e.hourly_rate),
            Err(err) => {
                warn!(employee_id = %employee_id, error = %err, "Rate lookup failed");
                None
            }
        }
    }

    fn display_name(&self, employee_id: &str) -> Option<String> {
        RosterStore::get(self, employee_id)
            .ok()
            .flatten()
            .map(|e| e.name)
    }
}

//! Attendance record storage.
//!
//! This module defines the [`AttendanceStore`] trait the services depend on
//! and an in-memory implementation backing the server and tests.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;

use crate::error::{PresensiError, PresensiResult};
use crate::models::{PayrollPeriod, ShiftRecord};

/// Storage for attendance records.
///
/// Writes are last-write-wins; implementations need no optimistic
/// concurrency control.
pub trait AttendanceStore: Send + Sync {
    /// Fetches one record by ID.
    fn get(&self, record_id: &str) -> PresensiResult<Option<ShiftRecord>>;

    /// Inserts a record, replacing any record with the same ID.
    fn upsert(&self, record: ShiftRecord) -> PresensiResult<()>;

    /// Returns every record dated within the period.
    fn query_range(&self, period: &PayrollPeriod) -> PresensiResult<Vec<ShiftRecord>>;

    /// Returns one employee's records dated within the period.
    fn query_by_employee(
        &self,
        employee_id: &str,
        period: &PayrollPeriod,
    ) -> PresensiResult<Vec<ShiftRecord>>;

    /// Returns all of one employee's records.
    fn list_by_employee(&self, employee_id: &str) -> PresensiResult<Vec<ShiftRecord>>;

    /// Stores a manual hours override on one record and returns the updated record.
    fn set_final_hours(&self, record_id: &str, hours: Decimal) -> PresensiResult<ShiftRecord>;
}

/// An [`AttendanceStore`] held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryAttendanceStore {
    records: RwLock<BTreeMap<String, ShiftRecord>>,
}

impl InMemoryAttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records.
    pub fn with_records(records: impl IntoIterator<Item = ShiftRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    fn read(&self) -> PresensiResult<RwLockReadGuard<'_, BTreeMap<String, ShiftRecord>>> {
        self.records.read().map_err(|_| PresensiError::StoreError {
            message: "attendance store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> PresensiResult<RwLockWriteGuard<'_, BTreeMap<String, ShiftRecord>>> {
        self.records.write().map_err(|_| PresensiError::StoreError {
            message: "attendance store lock poisoned".to_string(),
        })
    }

    fn select(&self, predicate: impl Fn(&ShiftRecord) -> bool) -> PresensiResult<Vec<ShiftRecord>> {
        Ok(self
            .read()?
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect())
    }
}

impl AttendanceStore for InMemoryAttendanceStore {
    fn get(&self, record_id: &str) -> PresensiResult<Option<ShiftRecord>> {
        Ok(self.read()?.get(record_id).cloned())
    }

    fn upsert(&self, record: ShiftRecord) -> PresensiResult<()> {
        self.write()?.insert(record.id.clone(), record);
        Ok(())
    }

    fn query_range(&self, period: &PayrollPeriod) -> PresensiResult<Vec<ShiftRecord>> {
        self.select(|record| period.contains_date(record.date))
    }

    fn query_by_employee(
        &self,
        employee_id: &str,
        period: &PayrollPeriod,
    ) -> PresensiResult<Vec<ShiftRecord>> {
        self.select(|record| record.employee_id == employee_id && period.contains_date(record.date))
    }

    fn list_by_employee(&self, employee_id: &str) -> PresensiResult<Vec<ShiftRecord>> {
        self.select(|record| record.employee_id == employee_id)
    }

    fn set_final_hours(&self, record_id: &str, hours: Decimal) -> PresensiResult<ShiftRecord> {
        let mut records = self.write()?;
        let record = records
            .get_mut(record_id)
            .ok_or_else(|| PresensiError::RecordNotFound {
                record_id: record_id.to_string(),
            })?;
        record.final_hours = Some(hours);
        Ok(record.clone())
    }
}

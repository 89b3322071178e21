//! Application state for the Warfot Presensi API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, Settings};
use crate::store::{AttendanceStore, InMemoryAttendanceStore, InMemoryRoster, RosterStore};

/// Shared application state.
///
/// Holds the organization settings and the stores every handler reads and
/// writes through.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<Settings>,
    attendance: Arc<dyn AttendanceStore>,
    roster: Arc<dyn RosterStore>,
}

impl AppState {
    /// Creates application state over the given stores.
    pub fn new(
        settings: Settings,
        attendance: Arc<dyn AttendanceStore>,
        roster: Arc<dyn RosterStore>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            attendance,
            roster,
        }
    }

    /// Creates application state with in-memory stores, seeding the roster
    /// from the loaded configuration.
    pub fn in_memory(config: &ConfigLoader) -> Self {
        Self::new(
            config.settings().clone(),
            Arc::new(InMemoryAttendanceStore::new()),
            Arc::new(InMemoryRoster::new(config.employees().to_vec())),
        )
    }

    /// Returns the organization settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the attendance store.
    pub fn attendance(&self) -> &dyn AttendanceStore {
        self.attendance.as_ref()
    }

    /// Returns the roster store.
    pub fn roster(&self) -> &dyn RosterStore {
        self.roster.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_in_memory_state_seeds_roster() {
        let config = ConfigLoader::load("./config/warfot").unwrap();
        let state = AppState::in_memory(&config);

        assert_eq!(state.settings().cutoff_day, 20);
        assert!(state.roster().get("emp_001").unwrap().is_some());
        assert!(state.attendance().list_by_employee("emp_001").unwrap().is_empty());
    }
}

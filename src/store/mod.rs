//! Storage collaborators for Warfot Presensi.
//!
//! Attendance records and the employee roster live behind traits so the
//! services receive their stores explicitly. The in-memory implementations
//! back the HTTP server and the tests.

mod attendance;
mod roster;

pub use attendance::{AttendanceStore, InMemoryAttendanceStore};
pub use roster::{InMemoryRoster, RosterStore};

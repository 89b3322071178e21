//! HTTP API module for Warfot Presensi.
//!
//! This module exposes clock-in and clock-out, the administrator's hour
//! overrides and roster edits, and the payroll reports as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ClockRequest, CreateEmployeeRequest, CurrentPayrollQuery, FinalHoursRequest, MonthQuery,
    RoleQuery, StrategyQuery, TodayQuery, UpdateEmployeeRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;

//! Calculation logic for Warfot Presensi.
//!
//! This module contains the pure payroll computations: shift normalization
//! against the fixed 11:00-21:00 policy, payroll period resolution from a
//! cutoff day, and aggregation of attendance records into payroll lines.
//! Nothing here performs I/O.

mod aggregator;
mod period_resolver;
mod shift_normalizer;

pub use aggregator::{
    RateLookup, aggregate, default_hours, effective_hours, records_in_month, shift_breakdown,
};
pub use period_resolver::{
    DEFAULT_CUTOFF_DAY, month_bounds, resolve_current_period, resolve_period_for_month,
};
pub use shift_normalizer::{
    GRACE_PERIOD_MINUTES, MAX_SHIFT_HOURS, NormalizedHours, SHIFT_END_HOUR, SHIFT_START_HOUR,
    ShiftNormalization, normalize, normalize_detailed,
};

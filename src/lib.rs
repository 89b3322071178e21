//! Attendance and payroll for Warfot Presensi
//!
//! This crate records staff clock-ins and clock-outs, normalizes each shift
//! to paid hours under the shop's shift policy, resolves cutoff-based payroll
//! periods and aggregates hours and pay per employee.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

//! Configuration loading and management for Warfot Presensi.
//!
//! This module loads the organization settings (payroll cutoff day, local
//! UTC offset, listen port) and the employee roster from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use warfot_presensi::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/warfot").unwrap();
//! println!("Loaded settings for: {}", config.settings().organization);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PresensiConfig, RosterConfig, RosterEntry, Settings};

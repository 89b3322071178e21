//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! organization settings and roster from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{PresensiError, PresensiResult};
use crate::models::Employee;

use super::types::{PresensiConfig, RosterConfig, Settings};

/// Loads and provides access to the Warfot Presensi configuration.
///
/// # Directory Structure
///
/// ```text
/// config/warfot/
/// ├── settings.yaml   # Organization name, cutoff day, UTC offset, port
/// └── roster.yaml     # Employees with role and hourly rate
/// ```
///
/// # Example
///
/// ```no_run
/// use warfot_presensi::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/warfot").unwrap();
/// println!("Cutoff day: {}", loader.settings().cutoff_day);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PresensiConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A setting is outside its accepted range
    /// - A roster entry fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> PresensiResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;
        settings.validate()?;

        let roster = Self::load_yaml::<RosterConfig>(&path.join("roster.yaml"))?;
        let employees = roster.into_employees();
        for employee in &employees {
            employee.validate()?;
        }

        info!(
            organization = %settings.organization,
            cutoff_day = settings.cutoff_day,
            employees = employees.len(),
            "Loaded configuration"
        );

        Ok(Self {
            config: PresensiConfig::new(settings, employees),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PresensiConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PresensiResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PresensiError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PresensiError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PresensiConfig {
        &self.config
    }

    /// Returns the organization settings.
    pub fn settings(&self) -> &Settings {
        self.config.settings()
    }

    /// Returns the configured employees.
    pub fn employees(&self) -> &[Employee] {
        self.config.employees()
    }
}

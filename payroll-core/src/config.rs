//! Configuration management
//!
//! Reads `settings.json` from the payroll directory:
//! ```json
//! {
//!   "database": { "file": "payroll.duckdb", "poolSize": 4 },
//!   "session": { "maxLoginAttempts": 3 },
//!   "export": { "csvFile": "EmployeeReport.csv" }
//! }
//! ```
//! Missing keys take their defaults. `PAYROLL_DB_FILE` and
//! `PAYROLL_POOL_SIZE` override the database section.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::services::DEFAULT_MAX_LOGIN_ATTEMPTS;

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_DB_FILE: &str = "payroll.duckdb";
pub const DEFAULT_POOL_SIZE: u32 = 4;
pub const DEFAULT_CSV_FILE: &str = "EmployeeReport.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseSettings {
    /// Relative paths resolve against the payroll directory
    pub file: String,
    pub pool_size: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            file: DEFAULT_DB_FILE.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSettings {
    pub max_login_attempts: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_login_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub csv_file: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            csv_file: DEFAULT_CSV_FILE.to_string(),
        }
    }
}

/// Payroll configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseSettings,
    pub session: SessionSettings,
    pub export: ExportSettings,
}

impl Config {
    /// Load config from the payroll directory, then apply env overrides
    pub fn load(payroll_dir: &Path) -> Result<Self> {
        let mut config = Self::read_settings(payroll_dir)?;

        if let Ok(file) = std::env::var("PAYROLL_DB_FILE") {
            if !file.trim().is_empty() {
                config.database.file = file;
            }
        }
        if let Ok(size) = std::env::var("PAYROLL_POOL_SIZE") {
            config.database.pool_size = size.trim().parse().map_err(|_| {
                Error::Config(format!("PAYROLL_POOL_SIZE must be a number, got '{}'", size))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Settings file only; unparseable content falls back to defaults
    fn read_settings(payroll_dir: &Path) -> Result<Self> {
        let settings_path = payroll_dir.join(SETTINGS_FILE);
        if !settings_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&settings_path)?;
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.pool_size == 0 {
            return Err(Error::Config("database pool size must be at least 1".into()));
        }
        if self.session.max_login_attempts == 0 {
            return Err(Error::Config("maxLoginAttempts must be at least 1".into()));
        }
        Ok(())
    }

    /// Write settings.json, creating the directory if needed
    pub fn save(&self, payroll_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(payroll_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(payroll_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    pub fn db_path(&self, payroll_dir: &Path) -> PathBuf {
        payroll_dir.join(&self.database.file)
    }

    pub fn csv_path(&self, payroll_dir: &Path) -> PathBuf {
        payroll_dir.join(&self.export.csv_file)
    }
}

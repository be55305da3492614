//! Payroll Core - Employee records, salary rules and payroll reports
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (Employee, User, EmployeeFilter) and the salary rule
//! - **ports**: Trait definitions for storage (EmployeeStore, UserStore)
//! - **services**: Business logic orchestration (reports, export, auth, logging)
//! - **adapters**: Concrete implementations (DuckDB pool and stores)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::duckdb::DuckDbPool;
use adapters::{DuckDbEmployeeStore, DuckDbUserStore};
use config::Config;
use ports::{EmployeeStore, UserStore};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{net_salary, Action, Compensation, Employee, EmployeeFilter, Role, User};

/// Main context for payroll operations
///
/// Holds the connection pool, configuration, stores and services. The pool
/// is opened once here and shared by every store.
pub struct PayrollContext {
    pub config: Config,
    pub payroll_dir: PathBuf,
    pub pool: Arc<DuckDbPool>,
    pub employee_store: Arc<dyn EmployeeStore>,
    pub user_store: Arc<dyn UserStore>,
    pub report_service: ReportService,
    pub export_service: ExportService,
    pub auth_service: AuthService,
}

impl PayrollContext {
    /// Create a new payroll context, migrating the database if needed
    pub fn new(payroll_dir: &Path) -> Result<Self> {
        let config = Config::load(payroll_dir).context("Failed to load settings")?;
        std::fs::create_dir_all(payroll_dir)
            .with_context(|| format!("Failed to create {}", payroll_dir.display()))?;

        let db_path = config.db_path(payroll_dir);
        let pool = Arc::new(
            DuckDbPool::open(&db_path, config.database.pool_size)
                .with_context(|| format!("Failed to open {}", db_path.display()))?,
        );
        pool.ensure_schema().context("Failed to migrate database")?;

        Ok(Self::from_pool(config, payroll_dir.to_path_buf(), pool))
    }

    /// Wire stores and services around an already opened pool
    pub fn from_pool(config: Config, payroll_dir: PathBuf, pool: Arc<DuckDbPool>) -> Self {
        let employee_store: Arc<dyn EmployeeStore> =
            Arc::new(DuckDbEmployeeStore::new(Arc::clone(&pool)));
        let user_store: Arc<dyn UserStore> = Arc::new(DuckDbUserStore::new(Arc::clone(&pool)));

        Self {
            report_service: ReportService::new(Arc::clone(&employee_store)),
            export_service: ExportService::new(Arc::clone(&employee_store)),
            auth_service: AuthService::new(Arc::clone(&user_store)),
            config,
            payroll_dir,
            pool,
            employee_store,
            user_store,
        }
    }

    /// Attach an event logger to the login flow
    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.auth_service = self.auth_service.with_logger(logger);
        self
    }

    /// Default CSV export location from settings
    pub fn csv_path(&self) -> PathBuf {
        self.config.csv_path(&self.payroll_dir)
    }
}

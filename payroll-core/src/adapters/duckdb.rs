//! DuckDB connection pool
//!
//! One pool is created per process and handed to each store. Every store
//! operation checks out a connection and returns it when the guard drops.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use duckdb::DuckdbConnectionManager;

use crate::domain::result::{Error, Result};
use crate::services::{MigrationResult, MigrationService};

/// Connection checked out of the pool; derefs to `duckdb::Connection`
pub type PooledConnection = r2d2::PooledConnection<DuckdbConnectionManager>;

/// Maximum number of attempts when the database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("could not set lock on file")
        || lower.contains("file is already open")
}

fn connection_config() -> Result<duckdb::Config> {
    // Cached extensions in ~/.duckdb may fail code signing on macOS
    Ok(duckdb::Config::default().enable_autoload_extension(false)?)
}

/// Owned pool of DuckDB connections to a single database
pub struct DuckDbPool {
    pool: r2d2::Pool<DuckdbConnectionManager>,
    db_path: Option<PathBuf>,
}

impl DuckDbPool {
    /// Open (or create) the database file at `db_path`
    ///
    /// Retries with exponential backoff while another process holds the
    /// file lock.
    pub fn open(db_path: &Path, max_size: u32) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_manager(db_path) {
                Ok(manager) => {
                    return Ok(Self {
                        pool: Self::build_pool(manager, max_size)?,
                        db_path: Some(db_path.to_path_buf()),
                    });
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        eprintln!(
                            "[payroll] Database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::persistence(format!("Failed to open database after {} retries", MAX_RETRIES))
        }))
    }

    /// A private in-memory database shared by all connections of this pool
    pub fn in_memory(max_size: u32) -> Result<Self> {
        let manager = DuckdbConnectionManager::memory_with_flags(connection_config()?)?;
        Ok(Self {
            pool: Self::build_pool(manager, max_size)?,
            db_path: None,
        })
    }

    fn try_open_manager(db_path: &Path) -> Result<DuckdbConnectionManager> {
        Ok(DuckdbConnectionManager::file_with_flags(
            db_path,
            connection_config()?,
        )?)
    }

    fn build_pool(
        manager: DuckdbConnectionManager,
        max_size: u32,
    ) -> Result<r2d2::Pool<DuckdbConnectionManager>> {
        if max_size == 0 {
            return Err(Error::Config("pool size must be at least 1".to_string()));
        }
        Ok(r2d2::Pool::builder().max_size(max_size).build(manager)?)
    }

    /// Check out a connection for the duration of one operation
    pub fn get(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    pub fn run_migrations(&self) -> Result<MigrationResult> {
        let conn = self.get()?;
        MigrationService::new(&conn).run_pending()
    }

    /// Ensure database schema exists (runs pending migrations)
    pub fn ensure_schema(&self) -> Result<()> {
        self.run_migrations()?;
        Ok(())
    }

    /// Backing file, `None` for in-memory pools
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub fn max_size(&self) -> u32 {
        self.pool.max_size()
    }
}

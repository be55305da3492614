//! Adapters - concrete implementations of ports
//!
//! - DuckDB connection pool and schema bootstrap
//! - DuckDB-backed employee and user stores

pub mod duckdb;
pub mod employee_store;
pub mod predicate;
pub mod user_store;

pub use employee_store::DuckDbEmployeeStore;
pub use predicate::PredicateBuilder;
pub use user_store::DuckDbUserStore;

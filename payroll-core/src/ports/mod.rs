//! Port definitions (hexagonal architecture)
//!
//! Services depend only on these traits, not on the DuckDB adapters.

mod repository;

pub use repository::{EmployeeStore, UserStore};

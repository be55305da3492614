//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O.

mod employee;
mod filter;
pub mod result;
pub mod salary;
mod user;

pub use employee::Employee;
pub use filter::EmployeeFilter;
pub use salary::{net_salary, Compensation};
pub use user::{Action, Role, User};

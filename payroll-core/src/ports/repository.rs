//! Store ports - persistence abstraction

use crate::domain::result::Result;
use crate::domain::{Employee, EmployeeFilter, User};

/// Employee record persistence
///
/// Every call is one round trip to the backing store; nothing is cached.
pub trait EmployeeStore: Send + Sync {
    /// Persist a new record and return it with its assigned id
    fn create(&self, employee: &Employee) -> Result<Employee>;

    /// `Ok(None)` when no record has this id
    fn get_by_id(&self, emp_id: i64) -> Result<Option<Employee>>;

    /// All records in insertion order
    fn get_all(&self) -> Result<Vec<Employee>>;

    /// Records whose name contains `fragment`; an empty fragment matches all
    ///
    /// Matching ignores case ("an" finds "Anna") and treats `%`, `_` and `\`
    /// in the fragment as literal characters.
    fn search_by_name(&self, fragment: &str) -> Result<Vec<Employee>>;

    /// Overwrite every mutable field of `emp_id`
    ///
    /// Returns `false` when no row had that id; the store is left unchanged.
    fn update(&self, emp_id: i64, employee: &Employee) -> Result<bool>;

    /// Returns whether a row was actually removed
    fn delete(&self, emp_id: i64) -> Result<bool>;

    /// Records matching every present criterion of `filter`
    fn get_filtered(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>>;

    fn count(&self) -> Result<i64>;
}

/// Credential lookup
pub trait UserStore: Send + Sync {
    /// The user whose username and password both match, else `Ok(None)`
    ///
    /// A wrong password and an unknown username are indistinguishable.
    fn login(&self, username: &str, password: &str) -> Result<Option<User>>;
}

//! User domain model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::result::Error;

/// Access level of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

/// Something the session layer may want to do on a user's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create, update and delete employee records
    ManageEmployees,
    /// List, search and report across all employees
    ViewAllEmployees,
    ExportReports,
    /// Read the record linked to the user
    ViewOwnRecord,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }

    /// Whether this role may perform `action`
    pub fn permits(&self, action: Action) -> bool {
        match (self, action) {
            (Role::Admin, _) => true,
            (Role::Employee, Action::ViewOwnRecord) => true,
            (Role::Employee, Action::ManageEmployees)
            | (Role::Employee, Action::ViewAllEmployees)
            | (Role::Employee, Action::ExportReports) => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            other => Err(Error::validation(format!("unrecognized role '{}'", other))),
        }
    }
}

/// A pre-provisioned login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    /// Linked employee record; only meaningful for `Role::Employee`
    pub employee_id: Option<i64>,
}

impl User {
    pub fn new(
        user_id: i64,
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
        employee_id: Option<i64>,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            password: password.into(),
            role,
            employee_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("employee".parse::<Role>().unwrap(), Role::Employee);
        assert!("Admin".parse::<Role>().is_err());
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_round_trips_through_display() {
        for role in [Role::Admin, Role::Employee] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_employee_role_only_views_own_record() {
        assert!(Role::Employee.permits(Action::ViewOwnRecord));
        assert!(!Role::Employee.permits(Action::ManageEmployees));
        assert!(!Role::Employee.permits(Action::ViewAllEmployees));
        assert!(!Role::Employee.permits(Action::ExportReports));
        assert!(Role::Admin.permits(Action::ExportReports));
    }

    #[test]
    fn test_password_is_not_serialized() {
        let user = User::new(1, "alice", "secret", Role::Employee, Some(4));
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"role\":\"employee\""));
    }
}

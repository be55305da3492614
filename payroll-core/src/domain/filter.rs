//! Reporting filter

use rust_decimal::Decimal;
use serde::Serialize;

/// Optional criteria for filtered employee queries
///
/// Each present criterion narrows the result; they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeFilter {
    /// Exact designation match
    pub designation: Option<String>,
    /// Inclusive lower bound on net salary
    pub min_net_salary: Option<Decimal>,
    /// Inclusive upper bound on net salary
    pub max_net_salary: Option<Decimal>,
}

impl EmployeeFilter {
    /// A filter that matches every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a designation; blank input leaves the criterion off
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        let designation = designation.into();
        self.designation = if designation.trim().is_empty() {
            None
        } else {
            Some(designation)
        };
        self
    }

    pub fn with_min_net_salary(mut self, min: Decimal) -> Self {
        self.min_net_salary = Some(min);
        self
    }

    pub fn with_max_net_salary(mut self, max: Decimal) -> Self {
        self.max_net_salary = Some(max);
        self
    }

    /// Designation to filter on, ignoring a blank value set directly
    pub fn active_designation(&self) -> Option<&str> {
        self.designation
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active_designation().is_none()
            && self.min_net_salary.is_none()
            && self.max_net_salary.is_none()
    }

    /// Human-readable summary of the active criteria
    pub fn describe(&self) -> String {
        let none = || "None".to_string();
        format!(
            "Designation: {}, Min Salary: {}, Max Salary: {}",
            self.active_designation().map(str::to_string).unwrap_or_else(none),
            self.min_net_salary.map(|m| format!("{:.2}", m)).unwrap_or_else(none),
            self.max_net_salary.map(|m| format!("{:.2}", m)).unwrap_or_else(none),
        )
    }
}

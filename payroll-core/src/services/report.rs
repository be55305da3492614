//! Report service - salary summaries and ranked listings

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{Employee, EmployeeFilter};
use crate::ports::EmployeeStore;

/// Highest and lowest net salary of a non-empty result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SalaryRange {
    pub max: Decimal,
    pub min: Decimal,
}

/// Aggregate net salary figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalarySummary {
    pub count: usize,
    pub total: Decimal,
    /// Zero when there are no records
    pub average: Decimal,
    /// `None` when there are no records
    pub range: Option<SalaryRange>,
}

impl SalarySummary {
    pub fn has_data(&self) -> bool {
        self.range.is_some()
    }
}

/// A filtered listing ranked by net salary, with its summary
#[derive(Debug, Clone, Serialize)]
pub struct SalaryReport {
    pub filter: EmployeeFilter,
    pub employees: Vec<Employee>,
    pub summary: SalarySummary,
}

pub struct ReportService {
    employees: Arc<dyn EmployeeStore>,
}

impl ReportService {
    pub fn new(employees: Arc<dyn EmployeeStore>) -> Self {
        Self { employees }
    }

    /// Total, average, max and min of net salary
    pub fn summarize(records: &[Employee]) -> SalarySummary {
        let mut total = Decimal::ZERO;
        let mut range: Option<SalaryRange> = None;

        for salary in records.iter().map(Employee::net_salary) {
            total += salary;
            range = Some(match range {
                None => SalaryRange {
                    max: salary,
                    min: salary,
                },
                Some(r) => SalaryRange {
                    max: r.max.max(salary),
                    min: r.min.min(salary),
                },
            });
        }

        let average = if records.is_empty() {
            Decimal::ZERO
        } else {
            total / Decimal::from(records.len())
        };

        SalarySummary {
            count: records.len(),
            total,
            average,
            range,
        }
    }

    /// Highest net salary first; equal salaries keep their input order
    pub fn sort_by_net_salary_descending(mut records: Vec<Employee>) -> Vec<Employee> {
        // sort_by is stable
        records.sort_by(|a, b| b.net_salary().cmp(&a.net_salary()));
        records
    }

    /// Filtered records ranked by net salary, plus their summary
    pub fn generate(&self, filter: &EmployeeFilter) -> Result<SalaryReport> {
        let employees = Self::sort_by_net_salary_descending(self.employees.get_filtered(filter)?);
        let summary = Self::summarize(&employees);
        Ok(SalaryReport {
            filter: filter.clone(),
            employees,
            summary,
        })
    }

    /// Single-record report; `Ok(None)` if the id is unknown
    pub fn employee_report(&self, emp_id: i64) -> Result<Option<Employee>> {
        self.employees.get_by_id(emp_id)
    }
}

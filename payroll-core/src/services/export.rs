//! CSV export of employee records

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::Employee;
use crate::ports::EmployeeStore;

pub const CSV_HEADER: [&str; 10] = [
    "Emp ID",
    "Name",
    "Designation",
    "Basic Salary",
    "HRA",
    "DA",
    "Deductions",
    "Bonus",
    "Tax",
    "Net Salary",
];

pub struct ExportService {
    employees: Arc<dyn EmployeeStore>,
}

impl ExportService {
    pub fn new(employees: Arc<dyn EmployeeStore>) -> Self {
        Self { employees }
    }

    /// Write every record to `path`, returning the number of data rows
    pub fn export_all(&self, path: &Path) -> Result<usize> {
        let records = self.employees.get_all()?;
        let file = File::create(path)?;
        Self::write_csv(&records, file)
    }

    /// Header row, then one row per record with money at two decimals
    pub fn write_csv<W: Write>(records: &[Employee], writer: W) -> Result<usize> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(CSV_HEADER)?;

        for e in records {
            let id = e.emp_id().map(|id| id.to_string()).unwrap_or_default();
            csv.write_record([
                id,
                e.name().to_string(),
                e.designation().to_string(),
                money(e.basic_salary()),
                money(e.hra()),
                money(e.da()),
                money(e.deductions()),
                money(e.bonus()),
                money(e.tax()),
                money(e.net_salary()),
            ])?;
        }

        csv.flush()?;
        Ok(records.len())
    }
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

//! Add command - create an employee record

use anyhow::Result;
use colored::Colorize;

use super::SessionContext;
use crate::output;
use crate::EmployeeArgs;
use payroll_core::services::LogEvent;
use payroll_core::{Action, Employee};

impl EmployeeArgs {
    /// Validated record; net salary is computed, never taken from input
    pub fn into_employee(self) -> Result<Employee> {
        let employee = Employee::new(
            self.name,
            self.designation,
            self.basic,
            self.hra,
            self.da,
            self.deductions,
        )?
        .with_bonus(self.bonus)?
        .with_tax(self.tax)?;
        Ok(employee)
    }
}

pub fn run(s: &SessionContext, args: EmployeeArgs) -> Result<()> {
    s.require(Action::ManageEmployees)?;

    let employee = args.into_employee()?;
    let created = s.ctx.employee_store.create(&employee)?;
    let emp_id = created.emp_id().unwrap_or_default();

    s.log(
        LogEvent::new("employee_created")
            .with_command("add")
            .with_employee_id(emp_id),
    );

    output::success(&format!("Employee added with ID {}", emp_id));
    println!(
        "  Net salary: {}",
        output::money(created.net_salary()).bold()
    );
    Ok(())
}

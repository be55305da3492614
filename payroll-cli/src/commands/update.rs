//! Update command - replace an employee's details

use anyhow::Result;

use super::SessionContext;
use crate::output;
use crate::EmployeeArgs;
use payroll_core::services::LogEvent;
use payroll_core::Action;

pub fn run(s: &SessionContext, id: i64, args: EmployeeArgs) -> Result<()> {
    s.require(Action::ManageEmployees)?;

    let employee = args.into_employee()?;
    if !s.ctx.employee_store.update(id, &employee)? {
        output::warning(&format!("Employee {} not found", id));
        return Ok(());
    }

    s.log(
        LogEvent::new("employee_updated")
            .with_command("update")
            .with_employee_id(id),
    );
    output::success(&format!(
        "Employee {} updated (net salary {})",
        id,
        output::money(employee.net_salary())
    ));
    Ok(())
}

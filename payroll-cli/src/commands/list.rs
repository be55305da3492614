//! List command - every employee in insertion order

use anyhow::Result;

use super::SessionContext;
use crate::output;
use payroll_core::Action;

pub fn run(s: &SessionContext, json: bool) -> Result<()> {
    s.require(Action::ViewAllEmployees)?;
    let employees = s.ctx.employee_store.get_all()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&employees)?);
        return Ok(());
    }

    if employees.is_empty() {
        output::info("No employees found.");
        return Ok(());
    }

    println!("{}", output::employee_table(&employees));
    println!("{} employee(s)", employees.len());
    Ok(())
}

//! Delete command - remove an employee record

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use super::SessionContext;
use crate::output;
use payroll_core::services::LogEvent;
use payroll_core::Action;

pub fn run(s: &SessionContext, id: i64, force: bool) -> Result<()> {
    s.require(Action::ManageEmployees)?;

    let Some(employee) = s.ctx.employee_store.get_by_id(id)? else {
        output::warning(&format!("Employee {} not found", id));
        return Ok(());
    };

    // Confirm deletion unless --force
    if !force {
        println!(
            "\n{}",
            format!(
                "This will delete {} ({}, ID {}).",
                employee.name(),
                employee.designation(),
                id
            )
            .yellow()
        );
        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    if s.ctx.employee_store.delete(id)? {
        s.log(
            LogEvent::new("employee_deleted")
                .with_command("delete")
                .with_employee_id(id),
        );
        output::success(&format!("Employee {} deleted", id));
    } else {
        // Removed by someone else since the lookup
        output::warning(&format!("Employee {} not found", id));
    }
    Ok(())
}

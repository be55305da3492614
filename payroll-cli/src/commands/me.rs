//! Me command - the logged-in user's own record

use anyhow::Result;
use colored::Colorize;

use super::SessionContext;
use crate::output;

pub fn run(s: &SessionContext, json: bool) -> Result<()> {
    let employee = s.session.own_record(s.ctx.employee_store.as_ref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&employee)?);
        return Ok(());
    }

    println!("{}", format!("Welcome, {}", employee.name()).bold());
    println!("{}", output::employee_details(&employee));
    Ok(())
}

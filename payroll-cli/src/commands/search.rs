//! Search command - look up by exact ID or name fragment

use anyhow::Result;

use super::SessionContext;
use crate::output;
use payroll_core::Action;

pub fn run(s: &SessionContext, id: Option<i64>, name: Option<String>, json: bool) -> Result<()> {
    s.require(Action::ViewAllEmployees)?;

    let found = match (id, name) {
        (Some(id), _) => s.ctx.report_service.employee_report(id)?.into_iter().collect(),
        (None, Some(fragment)) => s.ctx.employee_store.search_by_name(&fragment)?,
        (None, None) => Vec::new(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        output::warning("No matching employees.");
        return Ok(());
    }

    println!("{}", output::employee_table(&found));
    Ok(())
}

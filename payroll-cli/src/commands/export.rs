//! Export command - write every employee to CSV

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::SessionContext;
use crate::output;
use payroll_core::services::LogEvent;
use payroll_core::Action;

pub fn run(s: &SessionContext, output_path: Option<PathBuf>) -> Result<()> {
    s.require(Action::ExportReports)?;

    let path = output_path.unwrap_or_else(|| s.ctx.csv_path());
    let rows = s
        .ctx
        .export_service
        .export_all(&path)
        .with_context(|| format!("Failed to export to {}", path.display()))?;

    s.log(LogEvent::new("report_exported").with_command("export"));
    output::success(&format!("Exported {} employee(s) to {}", rows, path.display()));
    Ok(())
}

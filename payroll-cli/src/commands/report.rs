//! Report command - filtered salary report with summary

use anyhow::Result;
use colored::Colorize;
use rust_decimal::Decimal;

use super::SessionContext;
use crate::output;
use payroll_core::services::SalarySummary;
use payroll_core::{Action, EmployeeFilter};

fn build_filter(designation: Option<String>, min: Option<Decimal>, max: Option<Decimal>) -> EmployeeFilter {
    let mut filter = EmployeeFilter::all();
    if let Some(d) = designation {
        filter = filter.with_designation(d);
    }
    if let Some(m) = min {
        filter = filter.with_min_net_salary(m);
    }
    if let Some(m) = max {
        filter = filter.with_max_net_salary(m);
    }
    filter
}

pub fn run(
    s: &SessionContext,
    designation: Option<String>,
    min: Option<Decimal>,
    max: Option<Decimal>,
    json: bool,
) -> Result<()> {
    s.require(Action::ViewAllEmployees)?;

    let filter = build_filter(designation, min, max);
    let report = s.ctx.report_service.generate(&filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Salary Report".bold());
    println!();
    if report.employees.is_empty() {
        output::warning("No employees match the filters.");
    } else {
        println!("{}", output::employee_table(&report.employees));
    }
    println!();
    print_summary(&report.summary);
    println!();
    println!("{} {}", "Filters Applied:".bold(), filter.describe());
    println!("Total Employees: {}", report.summary.count);
    Ok(())
}

fn print_summary(summary: &SalarySummary) {
    let mut table = output::create_table();
    table.add_row(vec!["Total Net Salary".to_string(), output::money(summary.total)]);
    table.add_row(vec!["Average Net Salary".to_string(), output::money(summary.average)]);
    match &summary.range {
        Some(range) => {
            table.add_row(vec!["Highest Net Salary".to_string(), output::money(range.max)]);
            table.add_row(vec!["Lowest Net Salary".to_string(), output::money(range.min)]);
        }
        None => {
            table.add_row(vec!["Highest Net Salary".to_string(), "-".to_string()]);
            table.add_row(vec!["Lowest Net Salary".to_string(), "-".to_string()]);
        }
    }
    println!("{}", table);
}

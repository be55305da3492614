//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement, Table};
use rust_decimal::Decimal;

use payroll_core::Employee;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Money with exactly two decimals
pub fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn money_cell(value: Decimal) -> Cell {
    Cell::new(money(value)).set_alignment(CellAlignment::Right)
}

/// One row per employee, all salary components shown
pub fn employee_table(employees: &[Employee]) -> Table {
    let mut table = create_table();
    table.set_header(vec![
        "ID",
        "Name",
        "Designation",
        "Basic",
        "HRA",
        "DA",
        "Deductions",
        "Bonus",
        "Tax",
        "Net Salary",
    ]);

    for e in employees {
        table.add_row(vec![
            Cell::new(e.emp_id().map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(e.name()),
            Cell::new(e.designation()),
            money_cell(e.basic_salary()),
            money_cell(e.hra()),
            money_cell(e.da()),
            money_cell(e.deductions()),
            money_cell(e.bonus()),
            money_cell(e.tax()),
            money_cell(e.net_salary()),
        ]);
    }
    table
}

/// Vertical key/value view of a single employee
pub fn employee_details(e: &Employee) -> Table {
    let mut table = create_table();
    let id = e.emp_id().map(|id| id.to_string()).unwrap_or_default();
    table.add_row(vec![Cell::new("Employee ID"), Cell::new(id)]);
    table.add_row(vec![Cell::new("Name"), Cell::new(e.name())]);
    table.add_row(vec![Cell::new("Designation"), Cell::new(e.designation())]);
    table.add_row(vec![Cell::new("Basic Salary"), money_cell(e.basic_salary())]);
    table.add_row(vec![Cell::new("HRA"), money_cell(e.hra())]);
    table.add_row(vec![Cell::new("DA"), money_cell(e.da())]);
    table.add_row(vec![Cell::new("Deductions"), money_cell(e.deductions())]);
    table.add_row(vec![Cell::new("Bonus"), money_cell(e.bonus())]);
    table.add_row(vec![Cell::new("Tax"), money_cell(e.tax())]);
    table.add_row(vec![
        Cell::new("Net Salary".bold()),
        money_cell(e.net_salary()),
    ]);
    table
}

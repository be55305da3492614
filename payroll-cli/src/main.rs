//! Payroll CLI - employee records and salary reports in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;
mod output;

use commands::{add, delete, export, list, logs, me, report, search, update, SessionContext};

/// Payroll - employee records and salary reports in your terminal
#[derive(Parser)]
#[command(name = "payroll", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    credentials: CredentialArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Login credentials; anything missing is prompted for
#[derive(Args, Clone)]
pub struct CredentialArgs {
    /// Username to log in with
    #[arg(long, short = 'u', global = true, env = "PAYROLL_USERNAME")]
    pub username: Option<String>,
    /// Password to log in with
    #[arg(long, short = 'p', global = true, env = "PAYROLL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Employee fields shared by `add` and `update`
#[derive(Args)]
pub struct EmployeeArgs {
    /// Full name
    #[arg(long)]
    pub name: String,
    /// Job title, e.g. Engineer
    #[arg(long)]
    pub designation: String,
    /// Basic salary
    #[arg(long)]
    pub basic: Decimal,
    /// House rent allowance
    #[arg(long)]
    pub hra: Decimal,
    /// Dearness allowance
    #[arg(long)]
    pub da: Decimal,
    #[arg(long)]
    pub deductions: Decimal,
    #[arg(long, default_value = "0")]
    pub bonus: Decimal,
    #[arg(long, default_value = "0")]
    pub tax: Decimal,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new employee (admin)
    Add {
        #[command(flatten)]
        employee: EmployeeArgs,
    },

    /// List all employees (admin)
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace an employee's details (admin)
    Update {
        /// Employee ID
        id: i64,
        #[command(flatten)]
        employee: EmployeeArgs,
    },

    /// Delete an employee (admin)
    Delete {
        /// Employee ID
        id: i64,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Salary report, highest net salary first (admin)
    Report {
        /// Only this designation
        #[arg(long)]
        designation: Option<String>,
        /// Minimum net salary (inclusive)
        #[arg(long)]
        min: Option<Decimal>,
        /// Maximum net salary (inclusive)
        #[arg(long)]
        max: Option<Decimal>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export all employees to CSV (admin)
    Export {
        /// Output file (defaults to the configured CSV file)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Find employees by ID or name fragment (admin)
    Search {
        /// Exact employee ID
        #[arg(long, conflicts_with = "name", required_unless_present = "name")]
        id: Option<i64>,
        /// Part of the name
        #[arg(long)]
        name: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show your own employee record
    Me {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the local event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Add { .. } => "add",
            Commands::List { .. } => "list",
            Commands::Update { .. } => "update",
            Commands::Delete { .. } => "delete",
            Commands::Report { .. } => "report",
            Commands::Export { .. } => "export",
            Commands::Search { .. } => "search",
            Commands::Me { .. } => "me",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        credentials,
        command,
    } = cli;

    // Local troubleshooting only; no login needed
    if let Commands::Logs { command } = command {
        return logs::run(command);
    }

    let name = command.name();
    let session = SessionContext::open(&credentials, name)?;
    let result = dispatch(&session, command);
    if let Err(e) = &result {
        session.log_failure(name, e);
    }
    result
}

fn dispatch(session: &SessionContext, command: Commands) -> Result<()> {
    match command {
        Commands::Add { employee } => add::run(session, employee),
        Commands::List { json } => list::run(session, json),
        Commands::Update { id, employee } => update::run(session, id, employee),
        Commands::Delete { id, force } => delete::run(session, id, force),
        Commands::Report {
            designation,
            min,
            max,
            json,
        } => report::run(session, designation, min, max, json),
        Commands::Export { output } => export::run(session, output),
        Commands::Search { id, name, json } => search::run(session, id, name, json),
        Commands::Me { json } => me::run(session, json),
        Commands::Logs { command } => logs::run(command),
    }
}

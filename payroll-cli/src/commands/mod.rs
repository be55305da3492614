//! CLI command implementations

pub mod add;
pub mod delete;
pub mod export;
pub mod list;
pub mod logs;
pub mod me;
pub mod report;
pub mod search;
pub mod update;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use payroll_core::domain::result::Result as CoreResult;
use payroll_core::services::{Credentials, EntryPoint, LogEvent, LoggingService, Session};
use payroll_core::{Action, Error, PayrollContext};

use crate::CredentialArgs;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<Arc<LoggingService>> {
    let payroll_dir = get_payroll_dir().ok()?;
    std::fs::create_dir_all(&payroll_dir).ok()?;
    LoggingService::new(&payroll_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .ok()
        .map(Arc::new)
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<Arc<LoggingService>>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the payroll directory from environment or default
pub fn get_payroll_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PAYROLL_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".payroll"))
        .context("Could not find home directory; set PAYROLL_DIR")
}

/// Open the payroll database
pub fn get_context() -> Result<PayrollContext> {
    let payroll_dir = get_payroll_dir()?;
    PayrollContext::new(&payroll_dir).context("Failed to initialize payroll context")
}

/// An authenticated user plus everything a command needs
pub struct SessionContext {
    pub ctx: PayrollContext,
    pub session: Session,
    logger: Option<Arc<LoggingService>>,
}

impl SessionContext {
    /// Open the database and log in, prompting for anything missing
    pub fn open(credentials: &CredentialArgs, command: &str) -> Result<Self> {
        let logger = get_logger();
        let mut ctx = get_context()?;
        if let Some(l) = &logger {
            ctx = ctx.with_logger(Arc::clone(l));
        }

        let max_attempts = ctx.config.session.max_login_attempts;
        let session = ctx
            .auth_service
            .login_with_retries(max_attempts, |attempt| prompt_credentials(credentials, attempt))?;

        let this = Self {
            ctx,
            session,
            logger,
        };
        if let Some(l) = &this.logger {
            let _ = l.log_command(command, this.username());
        }
        Ok(this)
    }

    pub fn username(&self) -> &str {
        &self.session.user().username
    }

    /// Role check that records denials in the event log
    pub fn require(&self, action: Action) -> Result<()> {
        if let Err(e) = self.session.require(action) {
            self.log(LogEvent::new("permission_denied").with_error(e.to_string()));
            return Err(e.into());
        }
        Ok(())
    }

    /// Log an event attributed to the logged-in user
    pub fn log(&self, event: LogEvent) {
        log_event(&self.logger, event.with_actor(self.username()));
    }

    pub fn log_failure(&self, command: &str, err: &anyhow::Error) {
        // Denials are already logged by `require`
        if let Some(Error::Unauthorized(_)) = err.downcast_ref::<Error>() {
            return;
        }
        self.log(
            LogEvent::new("command_failed")
                .with_command(command)
                .with_error(err.to_string())
                .with_error_details(format!("{:#}", err)),
        );
    }
}

/// Credentials for one login attempt
///
/// The first attempt uses whatever was passed on the command line or in the
/// environment; later attempts always prompt.
fn prompt_credentials(args: &CredentialArgs, attempt: u32) -> CoreResult<Credentials> {
    let given = |value: &Option<String>| if attempt == 1 { value.clone() } else { None };

    let username = match given(&args.username) {
        Some(u) => u,
        None => Input::<String>::new()
            .with_prompt("Username")
            .interact_text()
            .map_err(|dialoguer::Error::IO(e)| Error::Io(e))?,
    };
    let password = match given(&args.password) {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|dialoguer::Error::IO(e)| Error::Io(e))?,
    };

    Ok(Credentials::new(username, password))
}

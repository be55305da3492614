//! Authentication and role gating for the session layer

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{Action, Employee, Role, User};
use crate::ports::{EmployeeStore, UserStore};

use super::logging::{LogEvent, LoggingService};

/// Default number of login attempts before giving up
pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Username and password as typed by the user
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// A logged-in user
#[derive(Debug, Clone)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Fail with `Unauthorized` unless the role permits `action`
    pub fn require(&self, action: Action) -> Result<()> {
        if self.user.role.permits(action) {
            Ok(())
        } else {
            Err(Error::unauthorized(format!(
                "{} users may not perform {:?}",
                self.user.role, action
            )))
        }
    }

    /// The employee record id linked to this login
    pub fn own_employee_id(&self) -> Result<i64> {
        self.require(Action::ViewOwnRecord)?;
        self.user.employee_id.ok_or_else(|| {
            Error::not_found(format!(
                "user '{}' has no linked employee record",
                self.user.username
            ))
        })
    }

    /// The linked record itself; a dangling reference is `NotFound`
    pub fn own_record(&self, employees: &dyn EmployeeStore) -> Result<Employee> {
        let emp_id = self.own_employee_id()?;
        employees
            .get_by_id(emp_id)?
            .ok_or_else(|| Error::not_found(format!("employee {}", emp_id)))
    }
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    logger: Option<Arc<LoggingService>>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self {
            users,
            logger: None,
        }
    }

    /// Record login outcomes in the event log
    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// One login attempt; `Ok(None)` on bad credentials
    pub fn login(&self, credentials: &Credentials) -> Result<Option<Session>> {
        let user = self
            .users
            .login(&credentials.username, &credentials.password)?;

        let event = if user.is_some() {
            "login_succeeded"
        } else {
            "login_failed"
        };
        self.log(LogEvent::new(event).with_actor(&credentials.username));

        Ok(user.map(Session::new))
    }

    /// Ask for credentials until a login succeeds or attempts run out
    ///
    /// `prompt` receives the 1-based attempt number. Storage failures abort
    /// immediately; only bad credentials consume an attempt.
    pub fn login_with_retries<F>(&self, max_attempts: u32, mut prompt: F) -> Result<Session>
    where
        F: FnMut(u32) -> Result<Credentials>,
    {
        let mut last_username = String::new();
        for attempt in 1..=max_attempts {
            let credentials = prompt(attempt)?;
            last_username = credentials.username.clone();
            if let Some(session) = self.login(&credentials)? {
                return Ok(session);
            }
        }

        self.log(LogEvent::new("login_locked_out").with_actor(&last_username));
        Err(Error::unauthorized("Too many failed attempts"))
    }

    fn log(&self, event: LogEvent) {
        if let Some(logger) = &self.logger {
            let _ = logger.log(event);
        }
    }
}

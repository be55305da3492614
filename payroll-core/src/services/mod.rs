//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub mod auth;
mod export;
pub mod logging;
pub mod migration;
mod report;

pub use auth::{AuthService, Credentials, Session, DEFAULT_MAX_LOGIN_ATTEMPTS};
pub use export::{ExportService, CSV_HEADER};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use report::{ReportService, SalaryRange, SalaryReport, SalarySummary};

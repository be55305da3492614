//! DuckDB-backed credential lookup

use std::sync::Arc;

use duckdb::params;

use super::duckdb::DuckDbPool;
use crate::domain::result::Result;
use crate::domain::{Role, User};
use crate::ports::UserStore;

pub struct DuckDbUserStore {
    pool: Arc<DuckDbPool>,
}

impl DuckDbUserStore {
    pub fn new(pool: Arc<DuckDbPool>) -> Self {
        Self { pool }
    }
}

impl UserStore for DuckDbUserStore {
    fn login(&self, username: &str, password: &str) -> Result<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT user_id, username, password, role, employee_id
             FROM users
             WHERE username = ? AND password = ?",
        )?;
        let mut rows = stmt.query(params![username, password])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let role: String = row.get(3)?;
        Ok(Some(User {
            user_id: row.get(0)?,
            username: row.get(1)?,
            password: row.get(2)?,
            // Unknown role strings are a validation error
            role: role.parse::<Role>()?,
            employee_id: row.get(4)?,
        }))
    }
}

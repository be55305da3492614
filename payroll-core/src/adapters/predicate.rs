//! Dynamic WHERE clause construction
//!
//! A clause and the value bound to its placeholder are always pushed
//! together, so placeholder order and parameter order cannot drift apart.

use duckdb::types::Value;
use duckdb::ToSql;

/// Conjunction of `?`-parameterized comparisons
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PredicateBuilder {
    terms: Vec<(&'static str, Value)>,
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one clause with exactly one `?` and its bound value
    pub fn and(&mut self, clause: &'static str, value: impl Into<Value>) -> &mut Self {
        debug_assert_eq!(clause.matches('?').count(), 1, "clause must bind one value");
        self.terms.push((clause, value.into()));
        self
    }

    /// Append the clause only when a value is present
    pub fn and_some<T: Into<Value>>(&mut self, clause: &'static str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.and(clause, v);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// `" WHERE a AND b"`, or an empty string when there are no clauses
    pub fn where_clause(&self) -> String {
        if self.terms.is_empty() {
            return String::new();
        }
        let joined = self
            .terms
            .iter()
            .map(|(clause, _)| *clause)
            .collect::<Vec<_>>()
            .join(" AND ");
        format!(" WHERE {}", joined)
    }

    /// Bound values in placeholder order
    pub fn values(&self) -> Vec<&Value> {
        self.terms.iter().map(|(_, v)| v).collect()
    }

    /// Parameters ready to pass to `Statement::query`
    pub fn params(&self) -> Vec<&dyn ToSql> {
        self.terms.iter().map(|(_, v)| v as &dyn ToSql).collect()
    }
}

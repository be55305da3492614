//! DuckDB-backed employee store

use std::str::FromStr;
use std::sync::Arc;

use duckdb::types::Type;
use duckdb::{params, ToSql};
use rust_decimal::{Decimal, RoundingStrategy};

use super::duckdb::DuckDbPool;
use super::predicate::PredicateBuilder;
use crate::domain::result::Result;
use crate::domain::salary::{MAX_MONEY, MONEY_SCALE};
use crate::domain::{Compensation, Employee, EmployeeFilter};
use crate::ports::EmployeeStore;

// Money columns are read as text so no value passes through f64
const SELECT_EMPLOYEE: &str = "SELECT emp_id, name, designation,
        CAST(basic_salary AS VARCHAR), CAST(hra AS VARCHAR), CAST(da AS VARCHAR),
        CAST(deductions AS VARCHAR), CAST(bonus AS VARCHAR), CAST(tax AS VARCHAR)
     FROM employee";

const ORDER_BY_INSERTION: &str = " ORDER BY emp_id";

/// Employee store over a pooled DuckDB database
pub struct DuckDbEmployeeStore {
    pool: Arc<DuckDbPool>,
}

impl DuckDbEmployeeStore {
    pub fn new(pool: Arc<DuckDbPool>) -> Self {
        Self { pool }
    }

    fn query_employees(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Employee>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_employee)?;

        let mut employees = Vec::new();
        for employee in rows {
            employees.push(employee?);
        }
        Ok(employees)
    }
}

fn row_to_employee(row: &duckdb::Row<'_>) -> duckdb::Result<Employee> {
    // 0: emp_id, 1: name, 2: designation, 3: basic_salary, 4: hra, 5: da,
    // 6: deductions, 7: bonus, 8: tax
    let compensation = Compensation {
        basic_salary: money(row, 3)?,
        hra: money(row, 4)?,
        da: money(row, 5)?,
        deductions: money(row, 6)?,
        bonus: money(row, 7)?,
        tax: money(row, 8)?,
    };
    Employee::restore(row.get(0)?, row.get(1)?, row.get(2)?, compensation)
        .map_err(|e| duckdb::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))
}

fn money(row: &duckdb::Row<'_>, idx: usize) -> duckdb::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| duckdb::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Net salary bounds as comparable against a DECIMAL(18, 2) column
#[derive(Debug, PartialEq, Eq)]
enum NetSalaryBounds {
    /// No stored value can satisfy the filter
    Empty,
    Range {
        min: Option<Decimal>,
        max: Option<Decimal>,
    },
}

/// Stored net salaries have two decimals, so rounding `min` up and `max`
/// down keeps the comparison exact. Bounds past the column range either
/// match everything or nothing.
fn net_salary_bounds(filter: &EmployeeFilter) -> NetSalaryBounds {
    let min = filter
        .min_net_salary
        .map(|m| m.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToPositiveInfinity));
    let max = filter
        .max_net_salary
        .map(|m| m.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToNegativeInfinity));

    if min.is_some_and(|m| m > MAX_MONEY) || max.is_some_and(|m| m < -MAX_MONEY) {
        return NetSalaryBounds::Empty;
    }
    NetSalaryBounds::Range {
        min: min.filter(|m| *m >= -MAX_MONEY),
        max: max.filter(|m| *m <= MAX_MONEY),
    }
}

/// Escape LIKE wildcards so the fragment is matched literally
fn like_contains_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

impl EmployeeStore for DuckDbEmployeeStore {
    fn create(&self, employee: &Employee) -> Result<Employee> {
        let mut stored = employee.clone();
        stored.recalculate()?;

        let conn = self.pool.get()?;
        let emp_id: i64 =
            conn.query_row("SELECT nextval('employee_id_seq')", [], |row| row.get(0))?;
        let c = stored.compensation();
        conn.execute(
            "INSERT INTO employee (emp_id, name, designation, basic_salary, hra, da,
                                   deductions, bonus, tax, net_salary)
             VALUES (?, ?, ?, CAST(? AS DECIMAL(18, 2)), CAST(? AS DECIMAL(18, 2)),
                     CAST(? AS DECIMAL(18, 2)), CAST(? AS DECIMAL(18, 2)),
                     CAST(? AS DECIMAL(18, 2)), CAST(? AS DECIMAL(18, 2)),
                     CAST(? AS DECIMAL(18, 2)))",
            params![
                emp_id,
                stored.name(),
                stored.designation(),
                c.basic_salary.to_string(),
                c.hra.to_string(),
                c.da.to_string(),
                c.deductions.to_string(),
                c.bonus.to_string(),
                c.tax.to_string(),
                stored.net_salary().to_string(),
            ],
        )?;

        stored.assign_id(emp_id);
        Ok(stored)
    }

    fn get_by_id(&self, emp_id: i64) -> Result<Option<Employee>> {
        let sql = format!("{} WHERE emp_id = ?", SELECT_EMPLOYEE);
        let mut found = self.query_employees(&sql, params![emp_id])?;
        Ok(found.pop())
    }

    fn get_all(&self) -> Result<Vec<Employee>> {
        let sql = format!("{}{}", SELECT_EMPLOYEE, ORDER_BY_INSERTION);
        self.query_employees(&sql, params![])
    }

    fn search_by_name(&self, fragment: &str) -> Result<Vec<Employee>> {
        let sql = format!(
            "{} WHERE name ILIKE ? ESCAPE '\\'{}",
            SELECT_EMPLOYEE, ORDER_BY_INSERTION
        );
        let pattern = like_contains_pattern(fragment);
        self.query_employees(&sql, params![pattern])
    }

    fn update(&self, emp_id: i64, employee: &Employee) -> Result<bool> {
        let mut updated = employee.clone();
        updated.recalculate()?;
        let c = updated.compensation();

        let conn = self.pool.get()?;
        let rows = conn.execute(
            "UPDATE employee SET
                name = ?, designation = ?,
                basic_salary = CAST(? AS DECIMAL(18, 2)), hra = CAST(? AS DECIMAL(18, 2)),
                da = CAST(? AS DECIMAL(18, 2)), deductions = CAST(? AS DECIMAL(18, 2)),
                bonus = CAST(? AS DECIMAL(18, 2)), tax = CAST(? AS DECIMAL(18, 2)),
                net_salary = CAST(? AS DECIMAL(18, 2))
             WHERE emp_id = ?",
            params![
                updated.name(),
                updated.designation(),
                c.basic_salary.to_string(),
                c.hra.to_string(),
                c.da.to_string(),
                c.deductions.to_string(),
                c.bonus.to_string(),
                c.tax.to_string(),
                updated.net_salary().to_string(),
                emp_id,
            ],
        )?;
        Ok(rows > 0)
    }

    fn delete(&self, emp_id: i64) -> Result<bool> {
        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM employee WHERE emp_id = ?", params![emp_id])?;
        Ok(rows > 0)
    }

    fn get_filtered(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>> {
        let NetSalaryBounds::Range { min, max } = net_salary_bounds(filter) else {
            return Ok(Vec::new());
        };

        let mut predicate = PredicateBuilder::new();
        predicate
            .and_some(
                "designation = ?",
                filter.active_designation().map(str::to_string),
            )
            .and_some(
                "net_salary >= CAST(? AS DECIMAL(18, 2))",
                min.map(|m| m.to_string()),
            )
            .and_some(
                "net_salary <= CAST(? AS DECIMAL(18, 2))",
                max.map(|m| m.to_string()),
            );

        let sql = format!(
            "{}{}{}",
            SELECT_EMPLOYEE,
            predicate.where_clause(),
            ORDER_BY_INSERTION
        );
        self.query_employees(&sql, &predicate.params())
    }

    fn count(&self) -> Result<i64> {
        let conn = self.pool.get()?;
        let count = conn.query_row("SELECT COUNT(*) FROM employee", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_contains_pattern("an"), "%an%");
        assert_eq!(like_contains_pattern(""), "%%");
        assert_eq!(like_contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn test_bounds_round_toward_the_inside() {
        let filter = EmployeeFilter::all()
            .with_min_net_salary(Decimal::from_str("45000.000000000001").unwrap())
            .with_max_net_salary(Decimal::from_str("60000.009").unwrap());
        assert_eq!(
            net_salary_bounds(&filter),
            NetSalaryBounds::Range {
                min: Some(Decimal::from_str("45000.01").unwrap()),
                max: Some(Decimal::from_str("60000.00").unwrap()),
            }
        );
    }

    #[test]
    fn test_bounds_past_column_range() {
        let open_ceiling = EmployeeFilter::all().with_max_net_salary(Decimal::MAX);
        assert_eq!(
            net_salary_bounds(&open_ceiling),
            NetSalaryBounds::Range { min: None, max: None }
        );

        let open_floor = EmployeeFilter::all().with_min_net_salary(Decimal::MIN);
        assert_eq!(
            net_salary_bounds(&open_floor),
            NetSalaryBounds::Range { min: None, max: None }
        );

        let too_high = EmployeeFilter::all().with_min_net_salary(Decimal::MAX);
        assert_eq!(net_salary_bounds(&too_high), NetSalaryBounds::Empty);

        let too_low = EmployeeFilter::all().with_max_net_salary(Decimal::MIN);
        assert_eq!(net_salary_bounds(&too_low), NetSalaryBounds::Empty);
    }

    #[test]
    fn test_get_by_id_on_empty_store() {
        let pool = Arc::new(DuckDbPool::in_memory(1).unwrap());
        pool.ensure_schema().unwrap();
        let store = DuckDbEmployeeStore::new(pool);

        assert_eq!(store.get_by_id(1).unwrap(), None);
        assert_eq!(store.count().unwrap(), 0);
    }
}

//! Employee accessor.
//!
//! # Invariants
//! - `hire_date` is stored as `YYYY-MM-DD`; other shapes are rejected as
//!   invalid persisted data instead of being defaulted.
//! - `find_all` order is not part of the contract; callers sort themselves.

use super::{DaoError, DaoResult};
use crate::model::employee::Employee;
use chrono::NaiveDate;
use log::warn;
use rusqlite::{Connection, Row};

const EMPLOYEE_TABLE: &str = "employee";
const HIRE_DATE_FORMAT: &str = "%Y-%m-%d";
const EMPLOYEE_SELECT_SQL: &str = "SELECT
    no,
    name,
    hire_date,
    role_rank,
    capability_rank,
    transportation_amount,
    health_insurance_amount,
    employee_pension_amount,
    income_tax_amount,
    inhabitant_tax_amount
FROM employee";

/// Read access to employee records.
pub trait EmployeeDao {
    /// Gets one employee by employee number.
    fn get(&self, no: &str) -> DaoResult<Employee>;

    /// Lists every employee.
    fn find_all(&self) -> DaoResult<Vec<Employee>>;
}

/// SQLite-backed employee accessor.
pub struct SqliteEmployeeDao<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeDao<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeDao for SqliteEmployeeDao<'_> {
    fn get(&self, no: &str) -> DaoResult<Employee> {
        if no.trim().is_empty() {
            return Err(DaoError::InvalidArgument("employee number is required"));
        }

        let mut stmt = self
            .conn
            .prepare_cached(&format!("{EMPLOYEE_SELECT_SQL} WHERE no = ?1;"))
            .inspect_err(|err| log_query_failure("get", err))?;
        let mut rows = stmt
            .query([no])
            .inspect_err(|err| log_query_failure("get", err))?;

        if let Some(row) = rows.next()? {
            return parse_employee_row(row);
        }

        Err(DaoError::NotFound {
            table: EMPLOYEE_TABLE,
            key: no.to_string(),
        })
    }

    fn find_all(&self) -> DaoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY no ASC;"))
            .inspect_err(|err| log_query_failure("find_all", err))?;
        let mut rows = stmt
            .query([])
            .inspect_err(|err| log_query_failure("find_all", err))?;

        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }
}

fn parse_employee_row(row: &Row<'_>) -> DaoResult<Employee> {
    let no: String = row.get("no")?;
    let hire_date_text: String = row.get("hire_date")?;
    let hire_date = NaiveDate::parse_from_str(&hire_date_text, HIRE_DATE_FORMAT).map_err(|_| {
        DaoError::InvalidData(format!(
            "invalid hire date `{hire_date_text}` in employee.hire_date for `{no}`"
        ))
    })?;

    Ok(Employee {
        no,
        name: row.get("name")?,
        hire_date,
        role_rank: row.get("role_rank")?,
        capability_rank: row.get("capability_rank")?,
        transportation_amount: row.get("transportation_amount")?,
        health_insurance_amount: row.get("health_insurance_amount")?,
        employee_pension_amount: row.get("employee_pension_amount")?,
        income_tax_amount: row.get("income_tax_amount")?,
        inhabitant_tax_amount: row.get("inhabitant_tax_amount")?,
    })
}

fn log_query_failure(operation: &str, err: &rusqlite::Error) {
    warn!(
        "event=dao_query module=dao status=error table={EMPLOYEE_TABLE} op={operation} error={err}"
    );
}

//! Employee aggregation repository.
//!
//! # Responsibility
//! - Assemble `EmployeeDomain` composites from the three accessors.
//! - Answer read-only aggregate queries over the whole employee set.
//!
//! # Invariants
//! - Never talks to storage directly; all reads go through accessor traits.
//! - A composite is only built when both grades resolve; otherwise the
//!   whole call fails with `NotFound`.
//! - Aggregates either succeed over every employee or fail as a whole.
//! - Money sums saturate at `i64::MAX`.

use crate::dao::capability_dao::{CapabilityDao, SqliteCapabilityDao, CAPABILITY_TABLE};
use crate::dao::employee_dao::{EmployeeDao, SqliteEmployeeDao};
use crate::dao::role_dao::{RoleDao, SqliteRoleDao, ROLE_TABLE};
use crate::dao::{DaoError, DaoResult};
use crate::model::employee::Employee;
use crate::model::employee_domain::EmployeeDomain;
use crate::model::rank::{Capability, Role};
use crate::model::year_month::YearMonth;
use chrono::{Local, NaiveDate};
use log::debug;
use rusqlite::Connection;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failure of a repository query.
#[derive(Debug)]
pub enum RepositoryError {
    /// Accessor failure: bad key, missing row or storage fault.
    Dao(DaoError),
    /// An average was requested over zero employees.
    EmptyEmployeeSet,
}

impl RepositoryError {
    /// Returns whether the failure was caused by caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Dao(err) if err.is_validation())
    }
}

impl Display for RepositoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dao(err) => write!(f, "{err}"),
            Self::EmptyEmployeeSet => write!(f, "no employees to average over"),
        }
    }
}

impl Error for RepositoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dao(err) => Some(err),
            Self::EmptyEmployeeSet => None,
        }
    }
}

impl From<DaoError> for RepositoryError {
    fn from(value: DaoError) -> Self {
        Self::Dao(value)
    }
}

/// Repository over employees and their grades.
pub struct EmployeeRepository<E, R, C> {
    employee_dao: E,
    role_dao: R,
    capability_dao: C,
    as_of: NaiveDate,
}

/// Repository wired to SQLite accessors sharing one connection.
pub type SqliteEmployeeRepository<'conn> =
    EmployeeRepository<SqliteEmployeeDao<'conn>, SqliteRoleDao<'conn>, SqliteCapabilityDao<'conn>>;

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Builds all three accessors over a migrated connection.
    pub fn from_connection(conn: &'conn Connection) -> Self {
        Self::new(
            SqliteEmployeeDao::new(conn),
            SqliteRoleDao::new(conn),
            SqliteCapabilityDao::new(conn),
        )
    }
}

impl<E, R, C> EmployeeRepository<E, R, C>
where
    E: EmployeeDao,
    R: RoleDao,
    C: CapabilityDao,
{
    /// Creates a repository measuring tenure against today's local date.
    pub fn new(employee_dao: E, role_dao: R, capability_dao: C) -> Self {
        Self {
            employee_dao,
            role_dao,
            capability_dao,
            as_of: Local::now().date_naive(),
        }
    }

    /// Replaces the reference date used for tenure calculations.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Gets one employee with its role and capability grades.
    pub fn get(&self, no: &str) -> RepositoryResult<EmployeeDomain> {
        let employee = self.employee_dao.get(no)?;
        let role = self.role_dao.get(&employee.role_rank)?;
        let capability = self.capability_dao.get(&employee.capability_rank)?;
        Ok(EmployeeDomain::new(employee, role, capability))
    }

    /// Lists every employee in accessor order.
    ///
    /// Grades are resolved with one batched lookup per table instead of one
    /// lookup per employee.
    pub fn find_all(&self) -> RepositoryResult<Vec<EmployeeDomain>> {
        let started_at = Instant::now();
        let employees = self.employee_dao.find_all()?;
        let domains = self.assemble(employees)?;
        debug!(
            "event=repo_find_all module=repo status=ok employees={} duration_ms={}",
            domains.len(),
            started_at.elapsed().as_millis()
        );
        Ok(domains)
    }

    /// Lists every employee sorted by annual salary plan.
    ///
    /// The sort is stable: equal plans keep accessor order in both directions.
    pub fn find_all_order_by_annual_salary(
        &self,
        ascending: bool,
    ) -> RepositoryResult<Vec<EmployeeDomain>> {
        let mut domains = self.find_all()?;
        if ascending {
            domains.sort_by_key(EmployeeDomain::annual_total_salary_plan);
        } else {
            domains.sort_by_key(|domain| Reverse(domain.annual_total_salary_plan()));
        }
        Ok(domains)
    }

    /// Sums every employee's total salary for `year_month`.
    pub fn get_sum_total_salary(&self, year_month: YearMonth) -> RepositoryResult<i64> {
        let total = self
            .find_all()?
            .iter()
            .map(|domain| domain.total_salary(year_month))
            .fold(0, i64::saturating_add);
        Ok(total)
    }

    /// Averages take-home amounts for `year_month`, truncating toward zero.
    ///
    /// # Errors
    /// - `RepositoryError::EmptyEmployeeSet` when there are no employees.
    pub fn get_average_take_home(&self, year_month: YearMonth) -> RepositoryResult<i64> {
        let domains = self.find_all()?;
        if domains.is_empty() {
            return Err(RepositoryError::EmptyEmployeeSet);
        }

        let total = domains
            .iter()
            .map(|domain| domain.take_home_amount(year_month))
            .fold(0, i64::saturating_add);
        Ok(total / domains.len() as i64)
    }

    /// Counts employees whose annual salary plan is at least `threshold`.
    pub fn get_count_by_over_annual_salary(&self, threshold: i64) -> RepositoryResult<usize> {
        let count = self
            .find_all()?
            .iter()
            .filter(|domain| domain.annual_total_salary_plan() >= threshold)
            .count();
        Ok(count)
    }

    /// Gets the employee with the longest (`select_max`) or shortest tenure.
    ///
    /// Ties keep the first employee in accessor order. Returns `None` only
    /// when there are no employees.
    pub fn get_by_duration_month(
        &self,
        select_max: bool,
    ) -> RepositoryResult<Option<EmployeeDomain>> {
        let mut selected: Option<(u32, EmployeeDomain)> = None;

        for domain in self.find_all()? {
            let months = domain.duration_month(self.as_of);
            let replaces = match &selected {
                None => true,
                Some((best, _)) if select_max => months > *best,
                Some((best, _)) => months < *best,
            };
            if replaces {
                selected = Some((months, domain));
            }
        }

        Ok(selected.map(|(_, domain)| domain))
    }

    fn assemble(&self, employees: Vec<Employee>) -> RepositoryResult<Vec<EmployeeDomain>> {
        if employees.is_empty() {
            return Ok(Vec::new());
        }

        let role_ranks = employees
            .iter()
            .map(|employee| employee.role_rank.clone())
            .collect::<Vec<_>>();
        let capability_ranks = employees
            .iter()
            .map(|employee| employee.capability_rank.clone())
            .collect::<Vec<_>>();

        let roles = self
            .role_dao
            .find_by_ranks(&role_ranks)?
            .into_iter()
            .map(|role| (role.rank.clone(), role))
            .collect::<HashMap<_, _>>();
        let capabilities = self
            .capability_dao
            .find_by_ranks(&capability_ranks)?
            .into_iter()
            .map(|capability| (capability.rank.clone(), capability))
            .collect::<HashMap<_, _>>();

        let domains = employees
            .into_iter()
            .map(|employee| {
                let role = resolve::<Role>(&roles, ROLE_TABLE, &employee.role_rank)?;
                let capability = resolve::<Capability>(
                    &capabilities,
                    CAPABILITY_TABLE,
                    &employee.capability_rank,
                )?;
                Ok(EmployeeDomain::new(employee, role, capability))
            })
            .collect::<DaoResult<Vec<_>>>()?;

        Ok(domains)
    }
}

fn resolve<T: Clone>(
    records: &HashMap<String, T>,
    table: &'static str,
    rank: &str,
) -> DaoResult<T> {
    records.get(rank).cloned().ok_or_else(|| DaoError::NotFound {
        table,
        key: rank.to_string(),
    })
}

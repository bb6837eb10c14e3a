//! Request-scoped employee composite.
//!
//! # Responsibility
//! - Own one employee together with its resolved role and capability grade.
//! - Derive salary plan, monthly totals, take-home and tenure figures.
//!
//! # Invariants
//! - `role.rank == employee.role_rank` and
//!   `capability.rank == employee.capability_rank`; the repository only
//!   assembles composites from resolved grades.
//! - Nothing here is persisted.
//! - Money arithmetic saturates at the `i64` bounds; it never wraps or panics.

use crate::model::employee::Employee;
use crate::model::rank::{Capability, Role};
use crate::model::year_month::YearMonth;
use chrono::NaiveDate;
use serde::Serialize;

const MONTHS_PER_YEAR: i64 = 12;

/// Employee with its grade records resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeDomain {
    employee: Employee,
    role: Role,
    capability: Capability,
}

impl EmployeeDomain {
    pub fn new(employee: Employee, role: Role, capability: Capability) -> Self {
        Self {
            employee,
            role,
            capability,
        }
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Monthly base salary: role allowance plus capability pay.
    pub fn base_salary(&self) -> i64 {
        self.role.amount.saturating_add(self.capability.amount)
    }

    /// Projected yearly compensation (想定年収).
    pub fn annual_total_salary_plan(&self) -> i64 {
        self.base_salary().saturating_mul(MONTHS_PER_YEAR)
    }

    /// Total salary paid for `year_month` (総支給額).
    ///
    /// Months before the hire month pay nothing.
    pub fn total_salary(&self, year_month: YearMonth) -> i64 {
        if !year_month.is_on_or_after(self.employee.hire_date) {
            return 0;
        }
        self.base_salary()
            .saturating_add(self.employee.transportation_amount)
    }

    /// Net amount after monthly deductions (手取り額), never negative.
    pub fn take_home_amount(&self, year_month: YearMonth) -> i64 {
        let total = self.total_salary(year_month);
        if total == 0 {
            return 0;
        }
        total
            .saturating_sub(self.employee.monthly_deductions())
            .max(0)
    }

    /// Tenure in whole months as of the given date (勤続月数).
    pub fn duration_month(&self, as_of: NaiveDate) -> u32 {
        self.employee.duration_month(as_of)
    }
}

//! Employee record as stored in the `employee` table.
//!
//! # Invariants
//! - `no` is the primary key and never blank for persisted rows.
//! - `role_rank` and `capability_rank` reference existing grade rows.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Flat employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee number (社員番号).
    pub no: String,
    pub name: String,
    pub hire_date: NaiveDate,
    pub role_rank: String,
    pub capability_rank: String,
    /// Monthly commute allowance, paid on top of the base salary.
    pub transportation_amount: i64,
    pub health_insurance_amount: i64,
    pub employee_pension_amount: i64,
    pub income_tax_amount: i64,
    pub inhabitant_tax_amount: i64,
}

impl Employee {
    /// Sum of all monthly deductions withheld from the total salary.
    ///
    /// Saturates at `i64::MAX` instead of overflowing.
    pub fn monthly_deductions(&self) -> i64 {
        [
            self.employee_pension_amount,
            self.income_tax_amount,
            self.inhabitant_tax_amount,
        ]
        .into_iter()
        .fold(self.health_insurance_amount, i64::saturating_add)
    }

    /// Whole months elapsed between the hire date and `as_of`.
    pub fn duration_month(&self, as_of: NaiveDate) -> u32 {
        months_between(self.hire_date, as_of)
    }
}

/// Counts whole months from `from` to `to`.
///
/// A month is complete once `to` reaches the day-of-month of `from`.
/// Returns 0 when `to` precedes `from`.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if to <= from {
        return 0;
    }

    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }

    u32::try_from(months).unwrap_or(0)
}

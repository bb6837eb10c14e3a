//! Payroll record and domain model.
//!
//! # Responsibility
//! - Define flat records mapped one-to-one from storage rows.
//! - Define the request-scoped `EmployeeDomain` composite and its derived
//!   salary and tenure figures.
//!
//! # Invariants
//! - Records are read-only snapshots; nothing here writes back to storage.
//! - Money is carried as whole yen in `i64`.

pub mod employee;
pub mod employee_domain;
pub mod rank;
pub mod year_month;

//! Repository layer composing accessors into domain objects.
//!
//! # Responsibility
//! - Turn flat accessor records into `EmployeeDomain` composites.
//! - Keep aggregate arithmetic out of the accessors and the callers.
//!
//! # Invariants
//! - Repositories depend on accessor traits, never on SQL.
//! - Semantic errors (`NotFound`, empty set) are distinct from storage faults.

pub mod employee_repo;

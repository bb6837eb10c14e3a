//! Core payroll record store.
//! Accessors over the payroll tables and the employee aggregation repository.

pub mod dao;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use dao::capability_dao::{CapabilityDao, SqliteCapabilityDao};
pub use dao::employee_dao::{EmployeeDao, SqliteEmployeeDao};
pub use dao::role_dao::{RoleDao, SqliteRoleDao};
pub use dao::{verify_rank, DaoError, DaoResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::employee::Employee;
pub use model::employee_domain::EmployeeDomain;
pub use model::rank::{Capability, Role, RANK_LENGTH};
pub use model::year_month::{YearMonth, YearMonthError};
pub use repo::employee_repo::{
    EmployeeRepository, RepositoryError, RepositoryResult, SqliteEmployeeRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

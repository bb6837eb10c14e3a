//! Record accessors over the payroll tables.
//!
//! # Responsibility
//! - Map `role`, `capability` and `employee` rows to flat records.
//! - Keep every SQL statement behind bound parameters.
//!
//! # Invariants
//! - Key validation runs before any statement is prepared.
//! - A keyed lookup that matches no row fails with `DaoError::NotFound`;
//!   absent records never surface as defaults.

use crate::model::rank::RANK_LENGTH;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod capability_dao;
pub mod employee_dao;
mod rank_query;
pub mod role_dao;

pub type DaoResult<T> = Result<T, DaoError>;

/// Accessor error separating bad input from backend failures.
#[derive(Debug)]
pub enum DaoError {
    /// Required key was empty or whitespace only.
    InvalidArgument(&'static str),
    /// Key has the wrong number of characters.
    Format {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    NotFound {
        table: &'static str,
        key: String,
    },
    /// Statement preparation or execution failed in SQLite.
    Query(rusqlite::Error),
    /// A persisted row could not be mapped to its record.
    InvalidData(String),
}

impl DaoError {
    /// Returns whether the caller supplied a malformed key.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::Format { .. })
    }
}

impl Display for DaoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "{message}"),
            Self::Format {
                field,
                expected,
                actual,
            } => write!(f, "{field} must be {expected} characters [{actual}]"),
            Self::NotFound { table, key } => write!(f, "{table} not found: {key}"),
            Self::Query(err) => write!(f, "select failure: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for DaoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DaoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}

/// Rejects blank or wrong-length grade rank codes.
pub fn verify_rank(rank: &str) -> DaoResult<()> {
    if rank.trim().is_empty() {
        return Err(DaoError::InvalidArgument("rank is required"));
    }

    let actual = rank.chars().count();
    if actual != RANK_LENGTH {
        return Err(DaoError::Format {
            field: "rank",
            expected: RANK_LENGTH,
            actual,
        });
    }

    Ok(())
}

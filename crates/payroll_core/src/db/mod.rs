//! SQLite storage bootstrap for the payroll record store.
//!
//! # Responsibility
//! - Open and configure SQLite connections handed to the accessors.
//! - Apply the payroll schema migrations in deterministic order.
//! - Refuse connections whose grade or employee tables are missing.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Accessors only ever see connections whose migrations succeeded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the payroll database.
#[derive(Debug)]
pub enum DbError {
    /// The file (or in-memory handle) could not be opened.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// A connection pragma could not be read or applied.
    Pragma {
        pragma: &'static str,
        source: rusqlite::Error,
    },
    /// Migration `version` failed and was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The schema version is current but a payroll table is absent.
    MissingTable(&'static str),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open payroll database {target}: {source}")
            }
            Self::Pragma { pragma, source } => write!(f, "pragma {pragma} failed: {source}"),
            Self::Migration { version, source } => {
                write!(f, "payroll migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "payroll schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::MissingTable(table) => write!(f, "payroll table `{table}` is missing"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. }
            | Self::Pragma { source, .. }
            | Self::Migration { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } | Self::MissingTable(_) => None,
        }
    }
}

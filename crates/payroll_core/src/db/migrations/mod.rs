//! Payroll schema migrations.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - After migrating, every table in `PAYROLL_TABLES` exists.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, OptionalExtension};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Tables the accessors read from.
pub const PAYROLL_TABLES: &[&'static str] = &["role", "capability", "employee"];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the payroll schema up to `latest_version()` and checks its tables.
///
/// All pending migrations run inside one transaction; a failing step rolls
/// back every step before it.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version < latest {
        run_pending(conn, current_version)?;
        info!(
            "event=db_migrate module=db status=ok from_version={current_version} to_version={latest}"
        );
    }

    verify_payroll_tables(conn)
}

fn run_pending(conn: &mut Connection, current_version: u32) -> DbResult<()> {
    let first_pending = MIGRATIONS
        .iter()
        .find(|migration| migration.version > current_version)
        .map_or(current_version, |migration| migration.version);
    let tx = conn.transaction().map_err(|source| DbError::Migration {
        version: first_pending,
        source,
    })?;

    for migration in MIGRATIONS
        .iter()
        .filter(|migration| migration.version > current_version)
    {
        let applied = tx.execute_batch(migration.sql).and_then(|()| {
            tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))
        });
        if let Err(source) = applied {
            error!(
                "event=db_migrate module=db status=error version={} error={source}",
                migration.version
            );
            return Err(DbError::Migration {
                version: migration.version,
                source,
            });
        }
    }

    tx.commit().map_err(|source| DbError::Migration {
        version: latest_version(),
        source,
    })
}

fn verify_payroll_tables(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;")
        .map_err(|source| DbError::Pragma {
            pragma: "sqlite_master",
            source,
        })?;

    for table in PAYROLL_TABLES {
        let found = stmt
            .query_row([*table], |_| Ok(()))
            .optional()
            .map_err(|source| DbError::Pragma {
                pragma: "sqlite_master",
                source,
            })?;
        if found.is_none() {
            return Err(DbError::MissingTable(*table));
        }
    }
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .map_err(|source| DbError::Pragma {
            pragma: "user_version",
            source,
        })
}

//! Connection bootstrap for the payroll store.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have the payroll schema fully migrated.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the payroll database file and applies pending migrations.
///
/// # Side effects
/// - Creates the file when it does not exist yet.
/// - Emits `db_open` events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with("file", path.display().to_string(), || Connection::open(path))
}

/// Opens an empty in-memory payroll database with the schema applied.
///
/// Used by tests and one-off tooling that seeds its own fixture rows.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", ":memory:".to_string(), Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    target: String,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = connect().map_err(|source| {
        error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={source}",
            started_at.elapsed().as_millis()
        );
        DbError::Open { target, source }
    })?;

    if let Err(err) = bootstrap_connection(&mut conn) {
        error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={err}",
            started_at.elapsed().as_millis()
        );
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|source| DbError::Pragma {
            pragma: "foreign_keys",
            source,
        })?;
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(|source| DbError::Pragma {
            pragma: "busy_timeout",
            source,
        })?;
    apply_migrations(conn)
}

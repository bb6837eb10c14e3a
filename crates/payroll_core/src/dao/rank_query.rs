//! Shared statements for tables keyed by a grade rank.
//!
//! `role` and `capability` have the same shape, so both accessors route
//! through these helpers with their own SELECT prefix and row mapper.

use super::{verify_rank, DaoError, DaoResult};
use log::warn;
use rusqlite::{params_from_iter, Connection, Row};
use std::collections::BTreeSet;

/// Keeps `IN (...)` lists well below SQLite's bound-variable ceiling.
const MAX_RANKS_PER_STATEMENT: usize = 500;

pub(crate) type RowMapper<T> = fn(&Row<'_>) -> rusqlite::Result<T>;

pub(crate) fn get_by_rank<T>(
    conn: &Connection,
    table: &'static str,
    select_sql: &str,
    rank: &str,
    map_row: RowMapper<T>,
) -> DaoResult<T> {
    verify_rank(rank)?;

    let sql = format!("{select_sql} WHERE rank = ?1;");
    let found = conn
        .prepare_cached(&sql)
        .and_then(|mut stmt| {
            let mut rows = stmt.query([rank])?;
            let found = match rows.next()? {
                Some(row) => Some(map_row(row)?),
                None => None,
            };
            Ok(found)
        })
        .inspect_err(|err| log_query_failure(table, "get", err))?;

    found.ok_or_else(|| DaoError::NotFound {
        table,
        key: rank.to_string(),
    })
}

pub(crate) fn find_all<T>(
    conn: &Connection,
    table: &'static str,
    select_sql: &str,
    map_row: RowMapper<T>,
) -> DaoResult<Vec<T>> {
    let sql = format!("{select_sql} ORDER BY rank ASC;");
    let mut stmt = conn
        .prepare_cached(&sql)
        .inspect_err(|err| log_query_failure(table, "find_all", err))?;
    let records = stmt
        .query_map([], map_row)
        .and_then(|mapped| mapped.collect::<rusqlite::Result<Vec<T>>>())
        .inspect_err(|err| log_query_failure(table, "find_all", err))?;
    Ok(records)
}

/// Loads every row whose rank is in `ranks`, one statement per chunk.
///
/// Duplicate ranks are collapsed; unknown ranks are absent from the result.
pub(crate) fn find_by_ranks<T>(
    conn: &Connection,
    table: &'static str,
    select_sql: &str,
    ranks: &[String],
    map_row: RowMapper<T>,
) -> DaoResult<Vec<T>> {
    for rank in ranks {
        verify_rank(rank)?;
    }

    let distinct = ranks
        .iter()
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();

    let mut records = Vec::with_capacity(distinct.len());
    for chunk in distinct.chunks(MAX_RANKS_PER_STATEMENT) {
        let sql = format!(
            "{select_sql} WHERE rank IN ({}) ORDER BY rank ASC;",
            placeholders(chunk.len())
        );
        let mut stmt = conn
            .prepare(&sql)
            .inspect_err(|err| log_query_failure(table, "find_by_ranks", err))?;
        let rows = stmt
            .query_map(params_from_iter(chunk.iter()), map_row)
            .and_then(|mapped| mapped.collect::<rusqlite::Result<Vec<T>>>())
            .inspect_err(|err| log_query_failure(table, "find_by_ranks", err))?;
        records.extend(rows);
    }

    Ok(records)
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn log_query_failure(table: &str, operation: &str, err: &rusqlite::Error) {
    warn!("event=dao_query module=dao status=error table={table} op={operation} error={err}");
}

//! Role grade accessor.
//!
//! # Invariants
//! - Ranks are validated before any statement runs.
//! - Lookups bind the rank as a parameter; SQL text never embeds input.

use super::rank_query;
use super::{DaoError, DaoResult};
use crate::model::rank::Role;
use rusqlite::{Connection, Row};

pub(crate) const ROLE_TABLE: &str = "role";
const ROLE_SELECT_SQL: &str = "SELECT rank, name, amount FROM role";

/// Read access to role grades.
pub trait RoleDao {
    /// Gets the role grade for `rank`, failing with `NotFound` when absent.
    fn get(&self, rank: &str) -> DaoResult<Role>;

    /// Lists every role grade ordered by rank.
    fn find_all(&self) -> DaoResult<Vec<Role>>;

    /// Gets the role grades for a set of ranks; unknown ranks are skipped.
    ///
    /// The default implementation issues one `get` per distinct rank.
    fn find_by_ranks(&self, ranks: &[String]) -> DaoResult<Vec<Role>> {
        let mut roles: Vec<Role> = Vec::new();
        for rank in ranks {
            if roles.iter().any(|role| &role.rank == rank) {
                continue;
            }
            match self.get(rank) {
                Ok(role) => roles.push(role),
                Err(DaoError::NotFound { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(roles)
    }
}

/// SQLite-backed role accessor.
pub struct SqliteRoleDao<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoleDao<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RoleDao for SqliteRoleDao<'_> {
    fn get(&self, rank: &str) -> DaoResult<Role> {
        rank_query::get_by_rank(self.conn, ROLE_TABLE, ROLE_SELECT_SQL, rank, parse_role_row)
    }

    fn find_all(&self) -> DaoResult<Vec<Role>> {
        rank_query::find_all(self.conn, ROLE_TABLE, ROLE_SELECT_SQL, parse_role_row)
    }

    fn find_by_ranks(&self, ranks: &[String]) -> DaoResult<Vec<Role>> {
        rank_query::find_by_ranks(
            self.conn,
            ROLE_TABLE,
            ROLE_SELECT_SQL,
            ranks,
            parse_role_row,
        )
    }
}

fn parse_role_row(row: &Row<'_>) -> rusqlite::Result<Role> {
    Ok(Role {
        rank: row.get("rank")?,
        name: row.get("name")?,
        amount: row.get("amount")?,
    })
}

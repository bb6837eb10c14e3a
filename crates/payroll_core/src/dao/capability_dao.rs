//! Capability grade accessor.
//!
//! # Invariants
//! - Ranks are validated before any statement runs.
//! - Lookups bind the rank as a parameter; SQL text never embeds input.

use super::rank_query;
use super::{DaoError, DaoResult};
use crate::model::rank::Capability;
use rusqlite::{Connection, Row};

pub(crate) const CAPABILITY_TABLE: &str = "capability";
const CAPABILITY_SELECT_SQL: &str = "SELECT rank, name, amount FROM capability";

/// Read access to capability grades.
pub trait CapabilityDao {
    /// Gets the capability grade for `rank`.
    fn get(&self, rank: &str) -> DaoResult<Capability>;

    /// Lists every capability grade ordered by rank.
    fn find_all(&self) -> DaoResult<Vec<Capability>>;

    /// Gets the capability grades for a set of ranks; unknown ranks are skipped.
    ///
    /// The default implementation issues one `get` per distinct rank.
    fn find_by_ranks(&self, ranks: &[String]) -> DaoResult<Vec<Capability>> {
        let mut capabilities: Vec<Capability> = Vec::new();
        for rank in ranks {
            if capabilities.iter().any(|capability| &capability.rank == rank) {
                continue;
            }
            match self.get(rank) {
                Ok(capability) => capabilities.push(capability),
                Err(DaoError::NotFound { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(capabilities)
    }
}

/// SQLite-backed capability accessor.
pub struct SqliteCapabilityDao<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCapabilityDao<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CapabilityDao for SqliteCapabilityDao<'_> {
    fn get(&self, rank: &str) -> DaoResult<Capability> {
        rank_query::get_by_rank(
            self.conn,
            CAPABILITY_TABLE,
            CAPABILITY_SELECT_SQL,
            rank,
            parse_capability_row,
        )
    }

    fn find_all(&self) -> DaoResult<Vec<Capability>> {
        rank_query::find_all(
            self.conn,
            CAPABILITY_TABLE,
            CAPABILITY_SELECT_SQL,
            parse_capability_row,
        )
    }

    fn find_by_ranks(&self, ranks: &[String]) -> DaoResult<Vec<Capability>> {
        rank_query::find_by_ranks(
            self.conn,
            CAPABILITY_TABLE,
            CAPABILITY_SELECT_SQL,
            ranks,
            parse_capability_row,
        )
    }
}

fn parse_capability_row(row: &Row<'_>) -> rusqlite::Result<Capability> {
    Ok(Capability {
        rank: row.get("rank")?,
        name: row.get("name")?,
        amount: row.get("amount")?,
    })
}

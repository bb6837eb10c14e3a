//! Grade tier records keyed by a 2-character rank code.

use serde::{Deserialize, Serialize};

/// Number of characters every rank code must have.
pub const RANK_LENGTH: usize = 2;

/// Role grade (役割等級) with its monthly role allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub rank: String,
    pub name: String,
    /// Monthly allowance paid for holding this role grade.
    pub amount: i64,
}

/// Capability grade (能力等級) with its monthly capability pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    pub rank: String,
    pub name: String,
    /// Monthly pay attached to this capability grade.
    pub amount: i64,
}

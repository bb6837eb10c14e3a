//! Calendar month used to key monthly salary figures.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Rejected year-month input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonthError {
    pub key: i32,
}

impl Display for YearMonthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid year-month `{}`; expected yyyymm with month 01-12",
            self.key
        )
    }
}

impl Error for YearMonthError {}

/// Validated year and month pair.
///
/// The compact key form is `year * 100 + month`, e.g. `201504`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, YearMonthError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return Err(YearMonthError {
                key: year.saturating_mul(100).saturating_add(month as i32),
            });
        }
        Ok(Self { year, month })
    }

    /// Parses the compact `yyyymm` key.
    pub fn from_key(key: i32) -> Result<Self, YearMonthError> {
        if key < 0 {
            return Err(YearMonthError { key });
        }
        Self::new(key / 100, (key % 100) as u32).map_err(|_| YearMonthError { key })
    }

    pub fn key(&self) -> i32 {
        self.year * 100 + self.month as i32
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns whether `date` falls in this month or any earlier one.
    pub fn is_on_or_after(&self, date: NaiveDate) -> bool {
        (date.year(), date.month()) <= (self.year, self.month)
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

//! Stocktake period window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::StocktakeError;

/// The half-open time window `[start, end)` a stocktake covers.
///
/// Half-open so that two consecutive stocktakes sharing a boundary
/// instant never count the same movement twice: a movement at exactly
/// `end` belongs to the next period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPeriod {
    /// Inclusive start of the counting period.
    pub start: DateTime<Utc>,
    /// Exclusive end of the counting period.
    pub end: DateTime<Utc>,
}

impl StockPeriod {
    /// Creates a period window.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is not strictly before `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, StocktakeError> {
        if start >= end {
            return Err(StocktakeError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the instant falls within `[start, end)`.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }

    /// Returns true if the instant is strictly before the period, i.e.
    /// part of the opening balance.
    #[must_use]
    pub fn is_before(&self, at: DateTime<Utc>) -> bool {
        at < self.start
    }
}

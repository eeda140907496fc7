//! Stocktake domain types and lifecycle rules.

use bartally_shared::types::{HotelId, StocktakeId};
use serde::{Deserialize, Serialize};

use super::error::StocktakeError;
use super::period::StockPeriod;

/// Stocktake lifecycle status.
///
/// A stocktake is created DRAFT and transitions once, irreversibly, to
/// APPROVED. There is no reverse transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StocktakeStatus {
    /// Counting in progress; lines may be populated and counted.
    Draft,
    /// Reconciled and locked; the stocktake and its lines are immutable.
    Approved,
}

impl StocktakeStatus {
    /// Returns the stable string form stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Approved => "APPROVED",
        }
    }

    /// Returns true if the stocktake can still be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the stocktake has reached its terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Guards a mutation against an immutable stocktake.
    ///
    /// # Errors
    ///
    /// Returns [`StocktakeError::AlreadyApproved`] unless the status is
    /// DRAFT.
    pub fn ensure_editable(self, id: StocktakeId) -> Result<(), StocktakeError> {
        if self.is_editable() {
            Ok(())
        } else {
            Err(StocktakeError::AlreadyApproved(id))
        }
    }
}

impl std::fmt::Display for StocktakeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StocktakeStatus {
    type Err = StocktakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "APPROVED" => Ok(Self::Approved),
            other => Err(StocktakeError::UnknownStatus(other.to_string())),
        }
    }
}

/// Input for creating a stocktake.
#[derive(Debug, Clone)]
pub struct NewStocktake {
    /// The hotel the stocktake belongs to.
    pub hotel_id: HotelId,
    /// The counting period; validated on construction.
    pub period: StockPeriod,
    /// Free-form notes.
    pub notes: Option<String>,
}

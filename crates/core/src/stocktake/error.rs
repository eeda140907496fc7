//! Stocktake error types for lifecycle and period validation.

use bartally_shared::types::StocktakeId;
use bartally_shared::{DomainError, ErrorKind};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur in the stocktake state machine.
#[derive(Debug, Error)]
pub enum StocktakeError {
    // ========== Validation Errors ==========
    /// Period start must be strictly before period end.
    #[error("Period start {start} must be before period end {end}")]
    InvalidPeriod {
        /// Requested period start.
        start: DateTime<Utc>,
        /// Requested period end.
        end: DateTime<Utc>,
    },

    /// Unknown stocktake status string.
    #[error("Unknown stocktake status: {0}")]
    UnknownStatus(String),

    // ========== State Errors ==========
    /// The stocktake has been approved and is immutable.
    #[error("Stocktake {0} is already approved and cannot be modified")]
    AlreadyApproved(StocktakeId),

    /// Populate was already run for this stocktake.
    #[error("Stocktake {0} already has lines; populate runs exactly once")]
    LinesAlreadyPopulated(StocktakeId),
}

impl StocktakeError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPeriod { .. } => "INVALID_PERIOD",
            Self::UnknownStatus(_) => "UNKNOWN_STOCKTAKE_STATUS",
            Self::AlreadyApproved(_) => "STOCKTAKE_ALREADY_APPROVED",
            Self::LinesAlreadyPopulated(_) => "LINES_ALREADY_POPULATED",
        }
    }
}

impl DomainError for StocktakeError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPeriod { .. } | Self::UnknownStatus(_) => ErrorKind::Validation,
            Self::AlreadyApproved(_) | Self::LinesAlreadyPopulated(_) => ErrorKind::State,
        }
    }

    fn error_code(&self) -> &'static str {
        self.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_error_kinds() {
        let start = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(
            StocktakeError::InvalidPeriod { start, end }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            StocktakeError::AlreadyApproved(StocktakeId::new()).kind(),
            ErrorKind::State
        );
        assert_eq!(
            StocktakeError::LinesAlreadyPopulated(StocktakeId::new()).kind(),
            ErrorKind::State
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            StocktakeError::AlreadyApproved(StocktakeId::new()).code(),
            "STOCKTAKE_ALREADY_APPROVED"
        );
        assert_eq!(
            StocktakeError::LinesAlreadyPopulated(StocktakeId::new()).code(),
            "LINES_ALREADY_POPULATED"
        );
    }
}

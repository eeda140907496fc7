//! Error classification shared by every domain error.
//!
//! Each crate defines its own `thiserror` enums close to the code that
//! raises them; this module only fixes the vocabulary those enums map
//! into, so a presentation layer can translate any error into a stable
//! response category without knowing the concrete type.

use serde::Serialize;

/// Coarse classification of a domain error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Malformed or out-of-range input (negative quantity, zero uom).
    Validation,
    /// Operation not allowed in the entity's current lifecycle state.
    State,
    /// Referenced entity does not exist for the calling hotel.
    NotFound,
    /// Uniqueness or concurrency conflict (duplicate period, lost race).
    Conflict,
    /// Infrastructure failure surfaced from below (database, channel).
    Internal,
}

impl ErrorKind {
    /// Returns the stable string form used in logs and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::State => "STATE",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common surface of every BarTally domain error.
pub trait DomainError: std::error::Error {
    /// The coarse classification of this error.
    fn kind(&self) -> ErrorKind;

    /// A stable machine-readable code for this exact error case.
    fn error_code(&self) -> &'static str;
}

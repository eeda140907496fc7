//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `ItemId` where a
//! `StocktakeId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(HotelId, "Unique identifier for a hotel (the tenant).");
typed_id!(StaffId, "Unique identifier for a staff member (the actor).");
typed_id!(CategoryId, "Unique identifier for a stock category.");
typed_id!(ItemId, "Unique identifier for a stock item.");
typed_id!(MovementId, "Unique identifier for a stock movement.");
typed_id!(StocktakeId, "Unique identifier for a stocktake.");
typed_id!(LineId, "Unique identifier for a stocktake line.");

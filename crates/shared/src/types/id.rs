//! Typed identifiers for type-safe entity references.
//!
//! Records are keyed by natural identifiers issued by the record store
//! (e.g. `"trip1"`, `"TRK1"`), so every ID wraps a string. Wrapping keeps a
//! `DriverId` from being passed where a `SupplierId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Creates an ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the ID is empty or whitespace only.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

typed_id!(UserId, "Identifier of the owning user.");
typed_id!(TripId, "Identifier of a trip.");
typed_id!(ChargeId, "Identifier of a trip charge.");
typed_id!(PaymentId, "Identifier of a party payment.");
typed_id!(PartyId, "Identifier of a party (customer billed for freight).");
typed_id!(DriverId, "Identifier of a driver.");
typed_id!(TruckId, "Identifier of a truck.");
typed_id!(SupplierId, "Identifier of a market-truck supplier.");
typed_id!(AccountEntryId, "Identifier of a supplier or driver account entry.");
typed_id!(ExpenseId, "Identifier of an expense.");

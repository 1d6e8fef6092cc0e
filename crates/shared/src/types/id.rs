//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing an `ExpenseId` where a
//! `ParticipantId` is expected. Identifiers are opaque strings because
//! records may come from a store that mints its own keys.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new random ID from a UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7().simple().to_string())
            }

            /// Wraps an existing identifier.
            #[must_use]
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
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
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

typed_id!(TripId, "Unique identifier for a trip.");
typed_id!(ParticipantId, "Unique identifier for a participant within a trip.");
typed_id!(ExpenseId, "Unique identifier for an expense.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_id_creation() {
        let id = ParticipantId::new();
        assert_eq!(id.as_str().len(), 32);
    }

    #[test]
    fn test_typed_ids_are_unique() {
        assert_ne!(ExpenseId::new(), ExpenseId::new());
    }

    #[test]
    fn test_typed_id_from_str() {
        let id = ParticipantId::from("p-alice");
        assert_eq!(id.as_str(), "p-alice");
        assert_eq!(id.to_string(), "p-alice");
        assert_eq!(id.into_inner(), "p-alice".to_string());
    }

    #[test]
    fn test_typed_id_serde_transparent() {
        let id = TripId::from_string("trip-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"trip-1\"");

        let back: TripId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

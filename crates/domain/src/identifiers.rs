//! Strongly-typed identifiers for judges, teams and evaluations.
//!
//! Each entity gets its own newtype over a UUID v7 so a `TeamId` can never be
//! passed where a `JudgeId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new ID with a time-ordered UUID v7
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Create an ID from an existing UUID
            #[inline]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get a reference to the underlying UUID
            #[inline]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Convert to the underlying UUID
            #[inline]
            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
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

// Define all ID types
define_id!(JudgeId, "Unique identifier for judge accounts");

define_id!(TeamId, "Unique identifier for competing teams");

define_id!(
    EvaluationId,
    "Unique identifier for a judge's evaluation of a team"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = TeamId::new();
        assert_ne!(id.to_string(), "");
    }

    #[test]
    fn test_ids_are_time_ordered() {
        let first = EvaluationId::new();
        let second = EvaluationId::new();
        assert!(first.as_uuid() <= second.as_uuid());
    }

    #[test]
    fn test_id_from_string() {
        let id1 = JudgeId::new();
        let s = id1.to_string();
        let id2: JudgeId = s.parse().unwrap();
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<TeamId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let uuid = Uuid::now_v7();
        let id = JudgeId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}

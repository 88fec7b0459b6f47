//! Newtype domain identifiers.
//!
//! A [`StepId`] and a [`RequestId`] never mix: the first names a step in the
//! documented pipeline, the second correlates the log lines of one chat relay
//! call.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes.
// Generates: struct (Copy), new(), as_u64(), Display, FromStr.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: document-assigned integers
// ---------------------------------------------------------------------------

u64_id! {
    /// Identifies one step of the documented pipeline.
    ///
    /// Assigned by the step document. Unique across the whole step tree,
    /// roots and children alike.
    StepId
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single chat relay request.
///
/// Generated fresh for every `POST /chat`; recorded on the request span so all
/// activity from one call can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a new random request identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_id_parses_with_surrounding_whitespace() {
        assert_eq!(" 21 ".parse::<StepId>().ok(), Some(StepId::new(21)));
        assert!("abc".parse::<StepId>().is_err());
        assert!("-1".parse::<StepId>().is_err());
    }

    #[test]
    fn step_id_serialises_as_bare_integer() {
        let json = serde_json::to_string(&StepId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: StepId = serde_json::from_str("7").unwrap();
        assert_eq!(back, StepId::new(7));
    }

    #[test]
    fn request_ids_are_distinct() {
        assert_ne!(RequestId::new_random(), RequestId::new_random());
    }
}

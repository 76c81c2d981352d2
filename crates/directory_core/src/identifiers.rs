//! Strongly-typed identifiers for database entities
//!
//! Newtype wrappers around the BIGSERIAL primary keys prevent accidental
//! mixing of different identifier types. The wrappers are transparent for
//! serde and sqlx, so they bind and decode as plain `i64` columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps an existing database key
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the underlying key
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(MemberId, "Identifier for a member row");
define_id!(TeamId, "Identifier for a team row");
define_id!(ItemId, "Identifier for an item row");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_id_roundtrips_through_display() {
        let id = MemberId::new(42);
        let parsed: MemberId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn ids_of_different_entities_are_distinct_types() {
        let member = MemberId::new(1);
        let team = TeamId::new(1);
        assert_eq!(member.as_i64(), team.as_i64());
    }

    #[test]
    fn from_str_rejects_garbage() {
        assert!("not-a-number".parse::<ItemId>().is_err());
    }
}

//! Opaque integer identifiers for persons and unions.
//!
//! Both identifier kinds wrap a plain `i64`. Zero and negative values are
//! reserved as "no parent" sentinels and never identify a real individual
//! or union; [`PersonId::normalize`] and [`UnionId::normalize`] fold those
//! sentinel values down to `None` so the rest of the engine only ever sees
//! a real id or nothing at all.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `i64` with the identifier
/// conventions shared by [`PersonId`] and [`UnionId`].
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl $name {
            /// Wrap a raw integer without checking the sentinel convention.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Return the inner raw value.
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Normalize a raw, possibly-sentinel value into `Option<Self>`.
            ///
            /// Zero and negative values are treated as "absent", matching the
            /// importer-side convention described for `PersonId`/`UnionId`.
            pub const fn normalize(raw: i64) -> Option<Self> {
                if raw <= 0 { None } else { Some(Self(raw)) }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of a person, unique within one pedigree.
    PersonId
}

define_id! {
    /// Identifier of a union (family record), unique within one pedigree.
    UnionId
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let person = PersonId::new(1);
        let union = UnionId::new(1);
        assert_eq!(person.into_inner(), union.into_inner());
    }

    #[test]
    fn normalize_folds_zero_and_negative_to_none() {
        assert_eq!(PersonId::normalize(0), None);
        assert_eq!(PersonId::normalize(-7), None);
        assert_eq!(PersonId::normalize(3), Some(PersonId::new(3)));
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = PersonId::new(42);
        let json = serde_json::to_string(&original).unwrap_or_default();
        let restored: PersonId = serde_json::from_str(&json).unwrap_or(PersonId::new(0));
        assert_eq!(original, restored);
    }

    #[test]
    fn id_display_matches_raw_value() {
        let id = PersonId::new(17);
        assert_eq!(id.to_string(), "17");
    }
}

//! UUID-backed identifiers for stored entities.

use thiserror::Error;

/// Raised when an identifier string is not a canonical UUID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} id must be a UUID, got `{value}`")]
pub struct IdParseError {
    kind: &'static str,
    value: String,
}

impl IdParseError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Declare an opaque identifier newtype over [`uuid::Uuid`].
macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::IdParseError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| $crate::domain::IdParseError::new($kind, raw))
            }
        }
    };
}

pub(crate) use define_entity_id;

#[cfg(test)]
mod tests {
    use crate::domain::{PostId, UserId};
    use rstest::rstest;

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    #[case("00000000-0000-0000-0000-000000000000")]
    fn parses_uuid_strings(#[case] raw: &str) {
        let id: UserId = raw.parse().expect("valid id");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("42")]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    fn rejects_non_uuid_strings(#[case] raw: &str) {
        let err = raw.parse::<PostId>().expect_err("invalid id");
        assert!(err.to_string().starts_with("post id must be a UUID"));
    }

    #[test]
    fn deserialises_from_json_string() {
        let id: UserId =
            serde_json::from_str("\"3fa85f64-5717-4562-b3fc-2c963f66afa6\"").expect("decode");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }
}

//! Membership tiers. Reference data: read-only at runtime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a membership tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberTypeId {
    Basic,
    Business,
}

/// Raised when a stored or supplied tier name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown member type `{0}`")]
pub struct UnknownMemberType(pub String);

impl MemberTypeId {
    /// Every tier, in declaration order.
    pub const ALL: [Self; 2] = [Self::Basic, Self::Business];

    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Business => "BUSINESS",
        }
    }
}

impl std::fmt::Display for MemberTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemberTypeId {
    type Err = UnknownMemberType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == raw)
            .ok_or_else(|| UnknownMemberType(raw.to_owned()))
    }
}

/// A membership tier with its perks.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberType {
    id: MemberTypeId,
    discount: f64,
    posts_limit_per_month: i32,
}

impl MemberType {
    /// Build a tier from its stored fields.
    #[must_use]
    pub const fn new(id: MemberTypeId, discount: f64, posts_limit_per_month: i32) -> Self {
        Self {
            id,
            discount,
            posts_limit_per_month,
        }
    }

    /// The tiers every store starts with.
    #[must_use]
    pub const fn seed() -> [Self; 2] {
        [
            Self::new(MemberTypeId::Basic, 2.3, 20),
            Self::new(MemberTypeId::Business, 7.7, 100),
        ]
    }

    #[must_use]
    pub const fn id(&self) -> MemberTypeId {
        self.id
    }

    /// Discount percentage granted by the tier.
    #[must_use]
    pub const fn discount(&self) -> f64 {
        self.discount
    }

    #[must_use]
    pub const fn posts_limit_per_month(&self) -> i32 {
        self.posts_limit_per_month
    }
}

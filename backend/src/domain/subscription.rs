//! Subscription edges between users.

use serde::Deserialize;

use super::{User, UserId};

/// Directed edge: `subscriber_id` follows `author_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    subscriber_id: UserId,
    author_id: UserId,
}

impl Subscription {
    #[must_use]
    pub const fn new(subscriber_id: UserId, author_id: UserId) -> Self {
        Self {
            subscriber_id,
            author_id,
        }
    }

    /// The following user.
    #[must_use]
    pub const fn subscriber_id(&self) -> &UserId {
        &self.subscriber_id
    }

    /// The followed user.
    #[must_use]
    pub const fn author_id(&self) -> &UserId {
        &self.author_id
    }
}

/// A user reached by walking a subscription edge from `anchor`.
///
/// When listing the authors followed by a set of subscribers, `anchor` is the
/// subscriber; when listing followers of a set of authors, it is the author.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedUser {
    pub anchor: UserId,
    pub user: User,
}

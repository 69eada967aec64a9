//! Port abstraction for subscription edges.

use async_trait::async_trait;

use crate::domain::{LinkedUser, Subscription, UserId};

use super::StorageError;

/// Stores follower edges and walks them in both directions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Create an edge. Duplicates and unknown users fail with
    /// [`StorageError::Constraint`].
    async fn insert(&self, edge: &Subscription) -> Result<(), StorageError>;

    /// Remove an edge. Fails with [`StorageError::NotFound`] when it does not exist.
    async fn delete(&self, edge: &Subscription) -> Result<(), StorageError>;

    /// Authors followed by any of `subscriber_ids`, anchored on the subscriber.
    async fn list_authors_of(
        &self,
        subscriber_ids: &[UserId],
    ) -> Result<Vec<LinkedUser>, StorageError>;

    /// Followers of any of `author_ids`, anchored on the author.
    async fn list_subscribers_of(
        &self,
        author_ids: &[UserId],
    ) -> Result<Vec<LinkedUser>, StorageError>;
}

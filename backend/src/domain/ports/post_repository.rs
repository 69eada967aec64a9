//! Port abstraction for post storage adapters.

use async_trait::async_trait;

use crate::domain::{Post, PostId, PostPatch, UserId};

use super::StorageError;

/// Reads and writes [`Post`] rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, StorageError>;

    async fn list_all(&self) -> Result<Vec<Post>, StorageError>;

    /// Posts written by any of `author_ids`, in any order.
    async fn list_by_author_ids(&self, author_ids: &[UserId]) -> Result<Vec<Post>, StorageError>;

    /// Persist a new post. Fails with [`StorageError::Constraint`] for an unknown author.
    async fn insert(&self, post: &Post) -> Result<(), StorageError>;

    async fn update(&self, id: &PostId, patch: &PostPatch) -> Result<Post, StorageError>;

    async fn delete(&self, id: &PostId) -> Result<(), StorageError>;
}

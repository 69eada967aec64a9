//! Port abstraction for user storage adapters.

use async_trait::async_trait;

use crate::domain::{User, UserId, UserPatch};

use super::StorageError;

/// Reads and writes [`User`] rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch one user; `None` when absent.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StorageError>;

    /// Every user, in storage order.
    async fn list_all(&self) -> Result<Vec<User>, StorageError>;

    /// Users whose id is in `ids`, in any order. Missing ids are skipped.
    async fn list_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StorageError>;

    /// Persist a new user.
    async fn insert(&self, user: &User) -> Result<(), StorageError>;

    /// Apply `patch` and return the stored result.
    ///
    /// Fails with [`StorageError::NotFound`] when `id` does not exist.
    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<User, StorageError>;

    /// Remove a user together with its profile, posts and subscription edges.
    async fn delete(&self, id: &UserId) -> Result<(), StorageError>;
}

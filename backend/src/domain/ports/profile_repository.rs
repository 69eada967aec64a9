//! Port abstraction for profile storage adapters.

use async_trait::async_trait;

use crate::domain::{Profile, ProfileId, ProfilePatch, UserId};

use super::StorageError;

/// Reads and writes [`Profile`] rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, StorageError>;

    async fn list_all(&self) -> Result<Vec<Profile>, StorageError>;

    /// Profiles owned by any of `user_ids`, in any order.
    async fn list_by_user_ids(&self, user_ids: &[UserId]) -> Result<Vec<Profile>, StorageError>;

    /// Persist a new profile.
    ///
    /// Fails with [`StorageError::Constraint`] when the owner is unknown or
    /// already has a profile.
    async fn insert(&self, profile: &Profile) -> Result<(), StorageError>;

    async fn update(&self, id: &ProfileId, patch: &ProfilePatch) -> Result<Profile, StorageError>;

    async fn delete(&self, id: &ProfileId) -> Result<(), StorageError>;
}

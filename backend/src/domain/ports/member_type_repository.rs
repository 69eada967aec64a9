//! Port abstraction for the read-only member type table.

use async_trait::async_trait;

use crate::domain::{MemberType, MemberTypeId};

use super::StorageError;

/// Reads [`MemberType`] reference rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberTypeRepository: Send + Sync {
    async fn find_by_id(&self, id: MemberTypeId) -> Result<Option<MemberType>, StorageError>;

    async fn list_all(&self) -> Result<Vec<MemberType>, StorageError>;

    async fn list_by_ids(&self, ids: &[MemberTypeId]) -> Result<Vec<MemberType>, StorageError>;
}

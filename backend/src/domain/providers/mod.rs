//! Entity providers: thin read services over the storage ports.
//!
//! Providers never batch and never raise not-found; absence is `None` or a
//! missing row. Batching lives in [`crate::domain::loader`].

mod member_types;
mod posts;
mod profiles;
mod users;

use std::fmt;
use std::hash::Hash;

use async_trait::async_trait;

use super::Error;
use super::ports::StoragePorts;

pub use member_types::MemberTypesProvider;
pub use posts::PostsProvider;
pub use profiles::ProfilesProvider;
pub use users::UsersProvider;

/// Read capability shared by every entity provider.
#[async_trait]
pub trait EntityProvider: Send + Sync {
    /// Primary key of the entity.
    type Id: Send + Sync;
    /// Key rows are grouped by when listed in bulk.
    type ForeignKey: Clone + Eq + Hash + fmt::Debug + Send + Sync;
    /// The entity itself.
    type Entity: Clone + Send + Sync;

    /// Fetch one entity by primary key.
    async fn get_by_id(&self, id: &Self::Id) -> Result<Option<Self::Entity>, Error>;

    /// Every entity, unfiltered.
    async fn list_all(&self) -> Result<Vec<Self::Entity>, Error>;

    /// Rows whose foreign key is in `keys`, unordered.
    async fn list_by_foreign_keys(
        &self,
        keys: &[Self::ForeignKey],
    ) -> Result<Vec<Self::Entity>, Error>;

    /// Foreign key of one row.
    fn foreign_key(entity: &Self::Entity) -> Self::ForeignKey;
}

/// One provider per entity kind.
#[derive(Clone)]
pub struct Providers {
    pub users: UsersProvider,
    pub profiles: ProfilesProvider,
    pub posts: PostsProvider,
    pub member_types: MemberTypesProvider,
}

impl Providers {
    #[must_use]
    pub fn new(ports: &StoragePorts) -> Self {
        Self {
            users: UsersProvider::new(ports.users.clone(), ports.subscriptions.clone()),
            profiles: ProfilesProvider::new(ports.profiles.clone()),
            posts: PostsProvider::new(ports.posts.clone()),
            member_types: MemberTypesProvider::new(ports.member_types.clone()),
        }
    }
}

fn log_failure(
    provider: &'static str,
    operation: &'static str,
    error: &super::ports::StorageError,
) {
    tracing::debug!(provider, operation, %error, "storage read failed");
}

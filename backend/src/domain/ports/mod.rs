//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod graph_executor;
mod member_type_repository;
mod post_repository;
mod profile_repository;
mod storage_error;
mod subscription_repository;
mod user_repository;

use std::sync::Arc;

pub use graph_executor::GraphExecutor;
#[cfg(test)]
pub use graph_executor::MockGraphExecutor;
#[cfg(test)]
pub use member_type_repository::MockMemberTypeRepository;
pub use member_type_repository::MemberTypeRepository;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::PostRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::ProfileRepository;
pub use storage_error::StorageError;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::SubscriptionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;

/// Handles to every storage port, as wired by the server.
#[derive(Clone)]
pub struct StoragePorts {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub member_types: Arc<dyn MemberTypeRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
}

impl StoragePorts {
    /// Use one adapter for every port.
    pub fn from_adapter<A>(adapter: Arc<A>) -> Self
    where
        A: UserRepository
            + ProfileRepository
            + PostRepository
            + MemberTypeRepository
            + SubscriptionRepository
            + 'static,
    {
        Self {
            users: adapter.clone(),
            profiles: adapter.clone(),
            posts: adapter.clone(),
            member_types: adapter.clone(),
            subscriptions: adapter,
        }
    }
}

use std::sync::Arc;

use async_trait::async_trait;

use super::{EntityProvider, log_failure};
use crate::domain::ports::{SubscriptionRepository, UserRepository};
use crate::domain::{Error, LinkedUser, User, UserId};

/// Reads users and walks subscription edges.
#[derive(Clone)]
pub struct UsersProvider {
    users: Arc<dyn UserRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl UsersProvider {
    pub fn new(
        users: Arc<dyn UserRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            users,
            subscriptions,
        }
    }

    /// Authors followed by each of `subscriber_ids`.
    pub async fn authors_followed_by(
        &self,
        subscriber_ids: &[UserId],
    ) -> Result<Vec<LinkedUser>, Error> {
        self.subscriptions
            .list_authors_of(subscriber_ids)
            .await
            .inspect_err(|err| log_failure("users", "authors_followed_by", err))
            .map_err(Error::from)
    }

    /// Followers of each of `author_ids`.
    pub async fn followers_of(&self, author_ids: &[UserId]) -> Result<Vec<LinkedUser>, Error> {
        self.subscriptions
            .list_subscribers_of(author_ids)
            .await
            .inspect_err(|err| log_failure("users", "followers_of", err))
            .map_err(Error::from)
    }
}

#[async_trait]
impl EntityProvider for UsersProvider {
    type Id = UserId;
    type ForeignKey = UserId;
    type Entity = User;

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .inspect_err(|err| log_failure("users", "get_by_id", err))
            .map_err(Error::from)
    }

    async fn list_all(&self) -> Result<Vec<User>, Error> {
        self.users
            .list_all()
            .await
            .inspect_err(|err| log_failure("users", "list_all", err))
            .map_err(Error::from)
    }

    async fn list_by_foreign_keys(&self, keys: &[UserId]) -> Result<Vec<User>, Error> {
        self.users
            .list_by_ids(keys)
            .await
            .inspect_err(|err| log_failure("users", "list_by_ids", err))
            .map_err(Error::from)
    }

    fn foreign_key(entity: &User) -> UserId {
        *entity.id()
    }
}

//! Write operations exposed as GraphQL mutations.
//!
//! Each handler issues exactly one storage write and never goes through the
//! batch loaders.

use std::sync::Arc;

use tracing::info;

use super::ports::{
    PostRepository, ProfileRepository, StoragePorts, SubscriptionRepository, UserRepository,
};
use super::{
    Error, NewPost, NewProfile, NewUser, Post, PostId, PostPatch, Profile, ProfileId,
    ProfilePatch, Subscription, User, UserId, UserPatch,
};

/// Stateless write service over the storage ports.
#[derive(Clone)]
pub struct MutationHandlers {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
    posts: Arc<dyn PostRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl MutationHandlers {
    #[must_use]
    pub fn new(ports: &StoragePorts) -> Self {
        Self {
            users: ports.users.clone(),
            profiles: ports.profiles.clone(),
            posts: ports.posts.clone(),
            subscriptions: ports.subscriptions.clone(),
        }
    }

    pub async fn create_user(&self, draft: NewUser) -> Result<User, Error> {
        let user = User::from_draft(draft);
        self.users.insert(&user).await?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    pub async fn change_user(&self, id: UserId, patch: UserPatch) -> Result<User, Error> {
        Ok(self.users.update(&id, &patch).await?)
    }

    pub async fn delete_user(&self, id: UserId) -> Result<UserId, Error> {
        self.users.delete(&id).await?;
        info!(user_id = %id, "user deleted");
        Ok(id)
    }

    pub async fn create_profile(&self, draft: NewProfile) -> Result<Profile, Error> {
        let profile = Profile::from_draft(draft);
        self.profiles.insert(&profile).await?;
        Ok(profile)
    }

    pub async fn change_profile(
        &self,
        id: ProfileId,
        patch: ProfilePatch,
    ) -> Result<Profile, Error> {
        Ok(self.profiles.update(&id, &patch).await?)
    }

    pub async fn delete_profile(&self, id: ProfileId) -> Result<ProfileId, Error> {
        self.profiles.delete(&id).await?;
        Ok(id)
    }

    pub async fn create_post(&self, draft: NewPost) -> Result<Post, Error> {
        let post = Post::from_draft(draft);
        self.posts.insert(&post).await?;
        Ok(post)
    }

    pub async fn change_post(&self, id: PostId, patch: PostPatch) -> Result<Post, Error> {
        Ok(self.posts.update(&id, &patch).await?)
    }

    pub async fn delete_post(&self, id: PostId) -> Result<PostId, Error> {
        self.posts.delete(&id).await?;
        Ok(id)
    }

    /// Returns the subscriber's id.
    pub async fn subscribe_to(&self, edge: Subscription) -> Result<UserId, Error> {
        self.subscriptions.insert(&edge).await?;
        Ok(*edge.subscriber_id())
    }

    /// Returns the subscriber's id.
    pub async fn unsubscribe_from(&self, edge: Subscription) -> Result<UserId, Error> {
        self.subscriptions.delete(&edge).await?;
        Ok(*edge.subscriber_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        MockMemberTypeRepository, MockPostRepository, MockProfileRepository,
        MockSubscriptionRepository, MockUserRepository, StorageError,
    };
    use rstest::rstest;

    struct Mocks {
        users: MockUserRepository,
        profiles: MockProfileRepository,
        posts: MockPostRepository,
        subscriptions: MockSubscriptionRepository,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                users: MockUserRepository::new(),
                profiles: MockProfileRepository::new(),
                posts: MockPostRepository::new(),
                subscriptions: MockSubscriptionRepository::new(),
            }
        }

        fn handlers(self) -> MutationHandlers {
            MutationHandlers::new(&StoragePorts {
                users: Arc::new(self.users),
                profiles: Arc::new(self.profiles),
                posts: Arc::new(self.posts),
                member_types: Arc::new(MockMemberTypeRepository::new()),
                subscriptions: Arc::new(self.subscriptions),
            })
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_user_writes_once_and_returns_entity() {
        let mut mocks = Mocks::new();
        mocks
            .users
            .expect_insert()
            .withf(|user| user.name() == "Ada")
            .times(1)
            .returning(|_| Ok(()));

        let user = mocks
            .handlers()
            .create_user(NewUser {
                name: "Ada".to_owned(),
                balance: 3.5,
            })
            .await
            .expect("created");

        assert_eq!(user.name(), "Ada");
    }

    #[rstest]
    #[tokio::test]
    async fn unsubscribe_missing_edge_is_not_found() {
        let mut mocks = Mocks::new();
        mocks
            .subscriptions
            .expect_delete()
            .times(1)
            .returning(|_| Err(StorageError::not_found("subscription does not exist")));

        let err = mocks
            .handlers()
            .unsubscribe_from(Subscription::new(UserId::random(), UserId::random()))
            .await
            .expect_err("missing edge");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "subscription does not exist");
    }

    #[rstest]
    #[tokio::test]
    async fn subscribe_returns_subscriber_id() {
        let (subscriber, author) = (UserId::random(), UserId::random());
        let mut mocks = Mocks::new();
        mocks
            .subscriptions
            .expect_insert()
            .withf(move |edge| *edge.author_id() == author)
            .times(1)
            .returning(|_| Ok(()));

        let id = mocks
            .handlers()
            .subscribe_to(Subscription::new(subscriber, author))
            .await
            .expect("subscribed");

        assert_eq!(id, subscriber);
    }

    #[rstest]
    #[tokio::test]
    async fn create_post_propagates_constraint_violations() {
        let mut mocks = Mocks::new();
        mocks
            .posts
            .expect_insert()
            .returning(|_| Err(StorageError::constraint("author does not exist")));

        let err = mocks
            .handlers()
            .create_post(NewPost {
                title: "t".to_owned(),
                content: "c".to_owned(),
                author_id: UserId::random(),
            })
            .await
            .expect_err("dangling author");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }
}

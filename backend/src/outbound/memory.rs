//! In-memory storage adapter.
//!
//! Used when no database is configured and by the test suites. It enforces
//! the same constraints as the PostgreSQL schema (referential integrity,
//! one profile per user, unique subscription edges, cascading user deletes).
//! A store built with [`InMemoryStore::recording`] also keeps a journal of
//! every port call so tests can count storage round trips.

use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    MemberTypeRepository, PostRepository, ProfileRepository, StorageError,
    SubscriptionRepository, UserRepository,
};
use crate::domain::{
    LinkedUser, MemberType, MemberTypeId, Post, PostId, PostPatch, Profile, ProfileId,
    ProfilePatch, Subscription, User, UserId, UserPatch,
};

/// One recorded port call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Port operation, e.g. `posts.list_by_author_ids`.
    pub operation: &'static str,
    /// Number of keys passed to the call.
    pub keys: usize,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: Vec<Profile>,
    posts: Vec<Post>,
    member_types: Vec<MemberType>,
    subscriptions: Vec<Subscription>,
}

impl Tables {
    fn has_user(&self, id: &UserId) -> bool {
        self.users.iter().any(|user| user.id() == id)
    }

    fn require_user(&self, id: &UserId) -> Result<(), StorageError> {
        if self.has_user(id) {
            Ok(())
        } else {
            Err(StorageError::constraint(format!("user {id} does not exist")))
        }
    }

    fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }
}

/// Process-local store implementing every storage port.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    journal: Option<Mutex<Vec<RecordedCall>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Empty store holding only the seeded member types.
    #[must_use]
    pub fn new() -> Self {
        Self::with_journal(None)
    }

    /// Like [`InMemoryStore::new`], but every port call is journaled.
    #[must_use]
    pub fn recording() -> Self {
        Self::with_journal(Some(Mutex::new(Vec::new())))
    }

    fn with_journal(journal: Option<Mutex<Vec<RecordedCall>>>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                member_types: MemberType::seed().to_vec(),
                ..Tables::default()
            }),
            journal,
        }
    }

    /// Every port call made so far, oldest first. Always empty unless the
    /// store was built with [`InMemoryStore::recording`].
    pub fn journal(&self) -> Vec<RecordedCall> {
        self.journal.as_ref().map_or_else(Vec::new, |journal| {
            journal
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        })
    }

    /// Key counts of the recorded calls to `operation`.
    pub fn calls_to(&self, operation: &str) -> Vec<usize> {
        self.journal()
            .into_iter()
            .filter(|call| call.operation == operation)
            .map(|call| call.keys)
            .collect()
    }

    /// Forget recorded calls.
    pub fn clear_journal(&self) {
        if let Some(journal) = &self.journal {
            journal.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }

    fn record(&self, operation: &'static str, keys: usize) {
        if let Some(journal) = &self.journal {
            journal
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(RecordedCall { operation, keys });
        }
    }

    fn read(&self, operation: &'static str, keys: usize) -> RwLockReadGuard<'_, Tables> {
        self.record(operation, keys);
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, operation: &'static str) -> RwLockWriteGuard<'_, Tables> {
        self.record(operation, 1);
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StorageError> {
        Ok(self.read("users.find_by_id", 1).user(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.read("users.list_all", 0).users.clone())
    }

    async fn list_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StorageError> {
        let tables = self.read("users.list_by_ids", ids.len());
        Ok(tables
            .users
            .iter()
            .filter(|user| ids.contains(user.id()))
            .cloned()
            .collect())
    }

    async fn insert(&self, user: &User) -> Result<(), StorageError> {
        let mut tables = self.write("users.insert");
        if tables.has_user(user.id()) {
            return Err(StorageError::constraint(format!(
                "user {} already exists",
                user.id()
            )));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<User, StorageError> {
        let mut tables = self.write("users.update");
        let user = tables
            .users
            .iter_mut()
            .find(|user| user.id() == id)
            .ok_or_else(|| StorageError::not_found(format!("user {id} does not exist")))?;
        user.apply(patch);
        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), StorageError> {
        let mut tables = self.write("users.delete");
        if !tables.has_user(id) {
            return Err(StorageError::not_found(format!("user {id} does not exist")));
        }
        tables.users.retain(|user| user.id() != id);
        tables.profiles.retain(|profile| profile.user_id() != id);
        tables.posts.retain(|post| post.author_id() != id);
        tables
            .subscriptions
            .retain(|edge| edge.subscriber_id() != id && edge.author_id() != id);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, StorageError> {
        let tables = self.read("profiles.find_by_id", 1);
        Ok(tables.profiles.iter().find(|p| p.id() == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Profile>, StorageError> {
        Ok(self.read("profiles.list_all", 0).profiles.clone())
    }

    async fn list_by_user_ids(&self, user_ids: &[UserId]) -> Result<Vec<Profile>, StorageError> {
        let tables = self.read("profiles.list_by_user_ids", user_ids.len());
        Ok(tables
            .profiles
            .iter()
            .filter(|profile| user_ids.contains(profile.user_id()))
            .cloned()
            .collect())
    }

    async fn insert(&self, profile: &Profile) -> Result<(), StorageError> {
        let mut tables = self.write("profiles.insert");
        tables.require_user(profile.user_id())?;
        if tables
            .profiles
            .iter()
            .any(|existing| existing.user_id() == profile.user_id())
        {
            return Err(StorageError::constraint(format!(
                "user {} already has a profile",
                profile.user_id()
            )));
        }
        tables.profiles.push(profile.clone());
        Ok(())
    }

    async fn update(&self, id: &ProfileId, patch: &ProfilePatch) -> Result<Profile, StorageError> {
        let mut tables = self.write("profiles.update");
        let profile = tables
            .profiles
            .iter_mut()
            .find(|profile| profile.id() == id)
            .ok_or_else(|| StorageError::not_found(format!("profile {id} does not exist")))?;
        profile.apply(patch);
        Ok(profile.clone())
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), StorageError> {
        let mut tables = self.write("profiles.delete");
        let before = tables.profiles.len();
        tables.profiles.retain(|profile| profile.id() != id);
        if tables.profiles.len() == before {
            return Err(StorageError::not_found(format!("profile {id} does not exist")));
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, StorageError> {
        let tables = self.read("posts.find_by_id", 1);
        Ok(tables.posts.iter().find(|post| post.id() == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Post>, StorageError> {
        Ok(self.read("posts.list_all", 0).posts.clone())
    }

    async fn list_by_author_ids(&self, author_ids: &[UserId]) -> Result<Vec<Post>, StorageError> {
        let tables = self.read("posts.list_by_author_ids", author_ids.len());
        Ok(tables
            .posts
            .iter()
            .filter(|post| author_ids.contains(post.author_id()))
            .cloned()
            .collect())
    }

    async fn insert(&self, post: &Post) -> Result<(), StorageError> {
        let mut tables = self.write("posts.insert");
        tables.require_user(post.author_id())?;
        tables.posts.push(post.clone());
        Ok(())
    }

    async fn update(&self, id: &PostId, patch: &PostPatch) -> Result<Post, StorageError> {
        let mut tables = self.write("posts.update");
        let post = tables
            .posts
            .iter_mut()
            .find(|post| post.id() == id)
            .ok_or_else(|| StorageError::not_found(format!("post {id} does not exist")))?;
        post.apply(patch);
        Ok(post.clone())
    }

    async fn delete(&self, id: &PostId) -> Result<(), StorageError> {
        let mut tables = self.write("posts.delete");
        let before = tables.posts.len();
        tables.posts.retain(|post| post.id() != id);
        if tables.posts.len() == before {
            return Err(StorageError::not_found(format!("post {id} does not exist")));
        }
        Ok(())
    }
}

#[async_trait]
impl MemberTypeRepository for InMemoryStore {
    async fn find_by_id(&self, id: MemberTypeId) -> Result<Option<MemberType>, StorageError> {
        let tables = self.read("member_types.find_by_id", 1);
        Ok(tables.member_types.iter().find(|m| m.id() == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<MemberType>, StorageError> {
        Ok(self.read("member_types.list_all", 0).member_types.clone())
    }

    async fn list_by_ids(&self, ids: &[MemberTypeId]) -> Result<Vec<MemberType>, StorageError> {
        let tables = self.read("member_types.list_by_ids", ids.len());
        Ok(tables
            .member_types
            .iter()
            .filter(|member_type| ids.contains(&member_type.id()))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn insert(&self, edge: &Subscription) -> Result<(), StorageError> {
        let mut tables = self.write("subscriptions.insert");
        tables.require_user(edge.subscriber_id())?;
        tables.require_user(edge.author_id())?;
        if tables.subscriptions.contains(edge) {
            return Err(StorageError::constraint(format!(
                "user {} already subscribes to {}",
                edge.subscriber_id(),
                edge.author_id()
            )));
        }
        tables.subscriptions.push(*edge);
        Ok(())
    }

    async fn delete(&self, edge: &Subscription) -> Result<(), StorageError> {
        let mut tables = self.write("subscriptions.delete");
        let before = tables.subscriptions.len();
        tables.subscriptions.retain(|existing| existing != edge);
        if tables.subscriptions.len() == before {
            return Err(StorageError::not_found(format!(
                "user {} does not subscribe to {}",
                edge.subscriber_id(),
                edge.author_id()
            )));
        }
        Ok(())
    }

    async fn list_authors_of(
        &self,
        subscriber_ids: &[UserId],
    ) -> Result<Vec<LinkedUser>, StorageError> {
        let tables = self.read("subscriptions.list_authors_of", subscriber_ids.len());
        Ok(tables
            .subscriptions
            .iter()
            .filter(|edge| subscriber_ids.contains(edge.subscriber_id()))
            .filter_map(|edge| {
                tables.user(edge.author_id()).map(|author| LinkedUser {
                    anchor: *edge.subscriber_id(),
                    user: author.clone(),
                })
            })
            .collect())
    }

    async fn list_subscribers_of(
        &self,
        author_ids: &[UserId],
    ) -> Result<Vec<LinkedUser>, StorageError> {
        let tables = self.read("subscriptions.list_subscribers_of", author_ids.len());
        Ok(tables
            .subscriptions
            .iter()
            .filter(|edge| author_ids.contains(edge.author_id()))
            .filter_map(|edge| {
                tables.user(edge.subscriber_id()).map(|subscriber| LinkedUser {
                    anchor: *edge.author_id(),
                    user: subscriber.clone(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    async fn add_user(store: &InMemoryStore, name: &str) -> User {
        let user = User::new(UserId::random(), name, 0.0);
        UserRepository::insert(store, &user).await.expect("insert user");
        user
    }

    #[rstest]
    #[tokio::test]
    async fn seeds_member_types(store: InMemoryStore) {
        let tiers = MemberTypeRepository::list_all(&store).await.expect("list");
        let ids: Vec<_> = tiers.iter().map(MemberType::id).collect();
        assert_eq!(ids, [MemberTypeId::Basic, MemberTypeId::Business]);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_user_cascades(store: InMemoryStore) {
        let alice = add_user(&store, "alice").await;
        let bob = add_user(&store, "bob").await;
        PostRepository::insert(&store, &Post::new(PostId::random(), "t", "c", *alice.id()))
            .await
            .expect("post");
        SubscriptionRepository::insert(&store, &Subscription::new(*bob.id(), *alice.id()))
            .await
            .expect("edge");

        UserRepository::delete(&store, alice.id()).await.expect("delete");

        assert!(PostRepository::list_all(&store).await.expect("posts").is_empty());
        let followed = store.list_authors_of(&[*bob.id()]).await.expect("edges");
        assert!(followed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn one_profile_per_user(store: InMemoryStore) {
        let alice = add_user(&store, "alice").await;
        let profile = |id| Profile::new(id, true, 1990, *alice.id(), MemberTypeId::Basic);

        ProfileRepository::insert(&store, &profile(ProfileId::random()))
            .await
            .expect("first profile");
        let err = ProfileRepository::insert(&store, &profile(ProfileId::random()))
            .await
            .expect_err("second profile");

        assert!(matches!(err, StorageError::Constraint { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn edges_are_unique_and_deletion_checks_existence(store: InMemoryStore) {
        let alice = add_user(&store, "alice").await;
        let bob = add_user(&store, "bob").await;
        let edge = Subscription::new(*alice.id(), *bob.id());

        SubscriptionRepository::insert(&store, &edge).await.expect("first");
        let duplicate = SubscriptionRepository::insert(&store, &edge).await;
        SubscriptionRepository::delete(&store, &edge).await.expect("delete");
        let missing = SubscriptionRepository::delete(&store, &edge).await;

        assert!(matches!(duplicate, Err(StorageError::Constraint { .. })));
        assert!(matches!(missing, Err(StorageError::NotFound { .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn dangling_author_is_a_constraint_violation(store: InMemoryStore) {
        let post = Post::new(PostId::random(), "t", "c", UserId::random());
        let err = PostRepository::insert(&store, &post).await.expect_err("dangling");
        assert!(matches!(err, StorageError::Constraint { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn journal_records_key_counts() {
        let store = InMemoryStore::recording();
        let ids = [UserId::random(), UserId::random()];
        store.list_by_author_ids(&ids).await.expect("list");
        assert_eq!(store.calls_to("posts.list_by_author_ids"), vec![2]);
        store.clear_journal();
        assert!(store.journal().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn plain_store_keeps_no_journal(store: InMemoryStore) {
        let ids = [UserId::random()];
        for _ in 0..100 {
            store.list_by_author_ids(&ids).await.expect("list");
        }
        assert!(store.journal().is_empty());
        assert!(store.calls_to("posts.list_by_author_ids").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn update_missing_user_is_not_found(store: InMemoryStore) {
        let err = UserRepository::update(&store, &UserId::random(), &UserPatch::default())
            .await
            .expect_err("missing");
        assert!(matches!(err, StorageError::NotFound { .. }));
    }
}

//! Per-request resolution context.

use super::loader::{
    BatchLoader, Direction, SubscriptionAttribution, SubscriptionBatch, ToMany, ToOne,
};
use super::providers::{MemberTypesProvider, PostsProvider, ProfilesProvider, Providers};

/// The batch loaders of one request, one per relationship field.
///
/// Built when a request starts and dropped when it ends; two requests never
/// see each other's loaders.
pub struct RequestContext {
    pub profile: BatchLoader<ToOne<ProfilesProvider>>,
    pub posts: BatchLoader<ToMany<PostsProvider>>,
    pub member_type: BatchLoader<ToOne<MemberTypesProvider>>,
    pub user_subscribed_to: BatchLoader<SubscriptionBatch>,
    pub subscribed_to_user: BatchLoader<SubscriptionBatch>,
}

impl RequestContext {
    #[must_use]
    pub fn new(providers: &Providers, attribution: SubscriptionAttribution) -> Self {
        Self {
            profile: BatchLoader::new(ToOne::new("profile", providers.profiles.clone())),
            posts: BatchLoader::new(ToMany::new("posts", providers.posts.clone())),
            member_type: BatchLoader::new(ToOne::new(
                "member_type",
                providers.member_types.clone(),
            )),
            user_subscribed_to: BatchLoader::new(SubscriptionBatch::new(
                providers.users.clone(),
                Direction::AuthorsFollowed,
                attribution,
            )),
            subscribed_to_user: BatchLoader::new(SubscriptionBatch::new(
                providers.users.clone(),
                Direction::Followers,
                attribution,
            )),
        }
    }

    /// Drop cached results after a write so later reads see it.
    pub fn invalidate(&self) {
        self.profile.clear();
        self.posts.clear();
        self.member_type.clear();
        self.user_subscribed_to.clear();
        self.subscribed_to_user.clear();
    }

    /// Fetches issued by every loader of this request.
    #[must_use]
    pub fn dispatch_count(&self) -> usize {
        self.profile.dispatch_count()
            + self.posts.dispatch_count()
            + self.member_type.dispatch_count()
            + self.user_subscribed_to.dispatch_count()
            + self.subscribed_to_user.dispatch_count()
    }
}

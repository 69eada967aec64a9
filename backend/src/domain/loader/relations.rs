//! Batch functions backing the relationship fields of the graph.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use super::{BatchFn, BatchOutput};
use crate::domain::providers::{EntityProvider, UsersProvider};
use crate::domain::{Error, User, UserId};

/// At most one related row per key (`User.profile`, `Profile.memberType`).
pub struct ToOne<P> {
    name: &'static str,
    provider: P,
}

impl<P> ToOne<P> {
    pub const fn new(name: &'static str, provider: P) -> Self {
        Self { name, provider }
    }
}

#[async_trait]
impl<P: EntityProvider> BatchFn for ToOne<P> {
    type Key = P::ForeignKey;
    type Value = P::Entity;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, keys: &[P::ForeignKey]) -> Result<BatchOutput<P::Entity>, Error> {
        let rows = self.provider.list_by_foreign_keys(keys).await?;
        let mut by_key = HashMap::with_capacity(rows.len());
        for row in rows {
            by_key.entry(P::foreign_key(&row)).or_insert(row);
        }
        Ok(BatchOutput::Positional(
            keys.iter().map(|key| by_key.remove(key)).collect(),
        ))
    }
}

/// Every related row per key (`User.posts`). Keys without rows get an empty list.
pub struct ToMany<P> {
    name: &'static str,
    provider: P,
}

impl<P> ToMany<P> {
    pub const fn new(name: &'static str, provider: P) -> Self {
        Self { name, provider }
    }
}

#[async_trait]
impl<P: EntityProvider> BatchFn for ToMany<P> {
    type Key = P::ForeignKey;
    type Value = Vec<P::Entity>;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, keys: &[P::ForeignKey]) -> Result<BatchOutput<Vec<P::Entity>>, Error> {
        let rows = self.provider.list_by_foreign_keys(keys).await?;
        let mut by_key: HashMap<P::ForeignKey, Vec<P::Entity>> = HashMap::new();
        for row in rows {
            by_key.entry(P::foreign_key(&row)).or_default().push(row);
        }
        Ok(BatchOutput::Positional(
            keys.iter()
                .map(|key| Some(by_key.remove(key).unwrap_or_default()))
                .collect(),
        ))
    }
}

/// Which way a subscription edge is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From a subscriber to the authors it follows (`User.userSubscribedTo`).
    AuthorsFollowed,
    /// From an author to its followers (`User.subscribedToUser`).
    Followers,
}

/// How subscription neighbours are handed back to the requesting users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionAttribution {
    /// Each user receives only its own neighbours.
    #[default]
    PerKey,
    /// Every user of a batch receives the union of all neighbours.
    Broadcast,
}

impl SubscriptionAttribution {
    #[must_use]
    pub const fn from_broadcast_flag(broadcast: bool) -> Self {
        if broadcast {
            Self::Broadcast
        } else {
            Self::PerKey
        }
    }
}

/// Subscription neighbours of a batch of users.
pub struct SubscriptionBatch {
    users: UsersProvider,
    direction: Direction,
    attribution: SubscriptionAttribution,
}

impl SubscriptionBatch {
    pub const fn new(
        users: UsersProvider,
        direction: Direction,
        attribution: SubscriptionAttribution,
    ) -> Self {
        Self {
            users,
            direction,
            attribution,
        }
    }
}

#[async_trait]
impl BatchFn for SubscriptionBatch {
    type Key = UserId;
    type Value = Vec<User>;

    fn name(&self) -> &'static str {
        match self.direction {
            Direction::AuthorsFollowed => "user_subscribed_to",
            Direction::Followers => "subscribed_to_user",
        }
    }

    async fn fetch(&self, keys: &[UserId]) -> Result<BatchOutput<Vec<User>>, Error> {
        let links = match self.direction {
            Direction::AuthorsFollowed => self.users.authors_followed_by(keys).await?,
            Direction::Followers => self.users.followers_of(keys).await?,
        };

        let output = match self.attribution {
            SubscriptionAttribution::PerKey => {
                let mut grouped: HashMap<UserId, Vec<User>> = HashMap::new();
                for link in links {
                    grouped.entry(link.anchor).or_default().push(link.user);
                }
                BatchOutput::Positional(
                    keys.iter()
                        .map(|key| Some(grouped.remove(key).unwrap_or_default()))
                        .collect(),
                )
            }
            SubscriptionAttribution::Broadcast => {
                let mut seen = HashSet::new();
                BatchOutput::Broadcast(
                    links
                        .into_iter()
                        .map(|link| link.user)
                        .filter(|user| seen.insert(*user.id()))
                        .collect(),
                )
            }
        };
        Ok(output)
    }
}

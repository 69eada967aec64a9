use std::sync::Arc;

use async_trait::async_trait;

use super::{EntityProvider, log_failure};
use crate::domain::ports::ProfileRepository;
use crate::domain::{Error, Profile, ProfileId, UserId};

/// Reads profiles, grouped by owning user.
#[derive(Clone)]
pub struct ProfilesProvider {
    repository: Arc<dyn ProfileRepository>,
}

impl ProfilesProvider {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EntityProvider for ProfilesProvider {
    type Id = ProfileId;
    type ForeignKey = UserId;
    type Entity = Profile;

    async fn get_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .inspect_err(|err| log_failure("profiles", "get_by_id", err))
            .map_err(Error::from)
    }

    async fn list_all(&self) -> Result<Vec<Profile>, Error> {
        self.repository
            .list_all()
            .await
            .inspect_err(|err| log_failure("profiles", "list_all", err))
            .map_err(Error::from)
    }

    async fn list_by_foreign_keys(&self, keys: &[UserId]) -> Result<Vec<Profile>, Error> {
        self.repository
            .list_by_user_ids(keys)
            .await
            .inspect_err(|err| log_failure("profiles", "list_by_user_ids", err))
            .map_err(Error::from)
    }

    fn foreign_key(entity: &Profile) -> UserId {
        *entity.user_id()
    }
}

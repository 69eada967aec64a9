use std::sync::Arc;

use async_trait::async_trait;

use super::{EntityProvider, log_failure};
use crate::domain::ports::MemberTypeRepository;
use crate::domain::{Error, MemberType, MemberTypeId};

/// Reads membership tiers; rows are keyed by their own id.
#[derive(Clone)]
pub struct MemberTypesProvider {
    repository: Arc<dyn MemberTypeRepository>,
}

impl MemberTypesProvider {
    pub fn new(repository: Arc<dyn MemberTypeRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EntityProvider for MemberTypesProvider {
    type Id = MemberTypeId;
    type ForeignKey = MemberTypeId;
    type Entity = MemberType;

    async fn get_by_id(&self, id: &MemberTypeId) -> Result<Option<MemberType>, Error> {
        self.repository
            .find_by_id(*id)
            .await
            .inspect_err(|err| log_failure("member_types", "get_by_id", err))
            .map_err(Error::from)
    }

    async fn list_all(&self) -> Result<Vec<MemberType>, Error> {
        self.repository
            .list_all()
            .await
            .inspect_err(|err| log_failure("member_types", "list_all", err))
            .map_err(Error::from)
    }

    async fn list_by_foreign_keys(&self, keys: &[MemberTypeId]) -> Result<Vec<MemberType>, Error> {
        self.repository
            .list_by_ids(keys)
            .await
            .inspect_err(|err| log_failure("member_types", "list_by_ids", err))
            .map_err(Error::from)
    }

    fn foreign_key(entity: &MemberType) -> MemberTypeId {
        entity.id()
    }
}

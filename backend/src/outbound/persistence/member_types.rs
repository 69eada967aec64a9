//! `MemberTypeRepository` over the seeded `member_types` table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MemberTypeRepository, StorageError};
use crate::domain::{MemberType, MemberTypeId};

use super::error_mapping::map_diesel_error;
use super::models::MemberTypeRow;
use super::schema::member_types;
use super::store::DieselStore;

fn into_member_types(rows: Vec<MemberTypeRow>) -> Result<Vec<MemberType>, StorageError> {
    rows.into_iter().map(MemberType::try_from).collect()
}

#[async_trait]
impl MemberTypeRepository for DieselStore {
    async fn find_by_id(&self, id: MemberTypeId) -> Result<Option<MemberType>, StorageError> {
        let mut conn = self.connection().await?;
        let row = member_types::table
            .find(id.as_str())
            .select(MemberTypeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(MemberType::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<MemberType>, StorageError> {
        let mut conn = self.connection().await?;
        let rows = member_types::table
            .order(member_types::id.asc())
            .select(MemberTypeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_member_types(rows)
    }

    async fn list_by_ids(&self, ids: &[MemberTypeId]) -> Result<Vec<MemberType>, StorageError> {
        let keys: Vec<&'static str> = ids.iter().map(|id| id.as_str()).collect();
        let mut conn = self.connection().await?;
        let rows = member_types::table
            .filter(member_types::id.eq_any(keys))
            .select(MemberTypeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_member_types(rows)
    }
}

//! `ProfileRepository` over the `profiles` table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ProfileRepository, StorageError};
use crate::domain::{Profile, ProfileId, ProfilePatch, UserId};

use super::error_mapping::map_diesel_error;
use super::models::{NewProfileRow, ProfileChangeset, ProfileRow};
use super::schema::profiles;
use super::store::DieselStore;

fn missing(id: &ProfileId) -> StorageError {
    StorageError::not_found(format!("profile {id} does not exist"))
}

fn into_profiles(rows: Vec<ProfileRow>) -> Result<Vec<Profile>, StorageError> {
    rows.into_iter().map(Profile::try_from).collect()
}

#[async_trait]
impl ProfileRepository for DieselStore {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, StorageError> {
        let mut conn = self.connection().await?;
        let row = profiles::table
            .find(id.as_uuid())
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Profile::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Profile>, StorageError> {
        let mut conn = self.connection().await?;
        let rows = profiles::table
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_profiles(rows)
    }

    async fn list_by_user_ids(&self, user_ids: &[UserId]) -> Result<Vec<Profile>, StorageError> {
        let keys: Vec<Uuid> = user_ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.connection().await?;
        let rows = profiles::table
            .filter(profiles::user_id.eq_any(keys))
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        into_profiles(rows)
    }

    async fn insert(&self, profile: &Profile) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        diesel::insert_into(profiles::table)
            .values(NewProfileRow::from(profile))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, id: &ProfileId, patch: &ProfilePatch) -> Result<Profile, StorageError> {
        if patch.is_empty() {
            return ProfileRepository::find_by_id(self, id)
                .await?
                .ok_or_else(|| missing(id));
        }
        let mut conn = self.connection().await?;
        let row = diesel::update(profiles::table.find(id.as_uuid()))
            .set(ProfileChangeset::from(patch))
            .returning(ProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.ok_or_else(|| missing(id)).and_then(Profile::try_from)
    }

    async fn delete(&self, id: &ProfileId) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        let removed = diesel::delete(profiles::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if removed == 0 {
            return Err(missing(id));
        }
        Ok(())
    }
}

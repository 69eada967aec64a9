//! `UserRepository` over the `users` table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{StorageError, UserRepository};
use crate::domain::{User, UserId, UserPatch};

use super::error_mapping::map_diesel_error;
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::schema::users;
use super::store::DieselStore;

fn missing(id: &UserId) -> StorageError {
    StorageError::not_found(format!("user {id} does not exist"))
}

#[async_trait]
impl UserRepository for DieselStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StorageError> {
        let mut conn = self.connection().await?;
        let row = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }

    async fn list_all(&self) -> Result<Vec<User>, StorageError> {
        let mut conn = self.connection().await?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn list_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, StorageError> {
        let keys: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.connection().await?;
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(keys))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn insert(&self, user: &User) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<User, StorageError> {
        if patch.is_empty() {
            return UserRepository::find_by_id(self, id)
                .await?
                .ok_or_else(|| missing(id));
        }
        let mut conn = self.connection().await?;
        let row = diesel::update(users::table.find(id.as_uuid()))
            .set(UserChangeset::from(patch))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(User::from).ok_or_else(|| missing(id))
    }

    async fn delete(&self, id: &UserId) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        // Profiles, posts and edges go with the user via ON DELETE CASCADE.
        let removed = diesel::delete(users::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if removed == 0 {
            return Err(missing(id));
        }
        Ok(())
    }
}

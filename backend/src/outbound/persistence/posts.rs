//! `PostRepository` over the `posts` table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PostRepository, StorageError};
use crate::domain::{Post, PostId, PostPatch, UserId};

use super::error_mapping::map_diesel_error;
use super::models::{NewPostRow, PostChangeset, PostRow};
use super::schema::posts;
use super::store::DieselStore;

fn missing(id: &PostId) -> StorageError {
    StorageError::not_found(format!("post {id} does not exist"))
}

#[async_trait]
impl PostRepository for DieselStore {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, StorageError> {
        let mut conn = self.connection().await?;
        let row = posts::table
            .find(id.as_uuid())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Post::from))
    }

    async fn list_all(&self) -> Result<Vec<Post>, StorageError> {
        let mut conn = self.connection().await?;
        let rows: Vec<PostRow> = posts::table
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn list_by_author_ids(&self, author_ids: &[UserId]) -> Result<Vec<Post>, StorageError> {
        let keys: Vec<Uuid> = author_ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.connection().await?;
        let rows: Vec<PostRow> = posts::table
            .filter(posts::author_id.eq_any(keys))
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn insert(&self, post: &Post) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        diesel::insert_into(posts::table)
            .values(NewPostRow::from(post))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn update(&self, id: &PostId, patch: &PostPatch) -> Result<Post, StorageError> {
        if patch.is_empty() {
            return PostRepository::find_by_id(self, id)
                .await?
                .ok_or_else(|| missing(id));
        }
        let mut conn = self.connection().await?;
        let row = diesel::update(posts::table.find(id.as_uuid()))
            .set(PostChangeset::from(patch))
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Post::from).ok_or_else(|| missing(id))
    }

    async fn delete(&self, id: &PostId) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        let removed = diesel::delete(posts::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if removed == 0 {
            return Err(missing(id));
        }
        Ok(())
    }
}

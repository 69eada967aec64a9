//! `SubscriptionRepository` over the `subscriptions` edge table.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{StorageError, SubscriptionRepository};
use crate::domain::{LinkedUser, Subscription, User, UserId};

use super::error_mapping::map_diesel_error;
use super::models::{SubscriptionRow, UserRow};
use super::schema::{subscriptions, users};
use super::store::DieselStore;

fn uuids(ids: &[UserId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

fn linked(rows: Vec<(Uuid, UserRow)>) -> Vec<LinkedUser> {
    rows.into_iter()
        .map(|(anchor, row)| LinkedUser {
            anchor: UserId::from_uuid(anchor),
            user: User::from(row),
        })
        .collect()
}

#[async_trait]
impl SubscriptionRepository for DieselStore {
    async fn insert(&self, edge: &Subscription) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        diesel::insert_into(subscriptions::table)
            .values(SubscriptionRow::from(edge))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, edge: &Subscription) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        let removed = diesel::delete(
            subscriptions::table
                .filter(subscriptions::subscriber_id.eq(edge.subscriber_id().as_uuid()))
                .filter(subscriptions::author_id.eq(edge.author_id().as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        if removed == 0 {
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
        let mut conn = self.connection().await?;
        let rows = subscriptions::table
            .inner_join(users::table.on(users::id.eq(subscriptions::author_id)))
            .filter(subscriptions::subscriber_id.eq_any(uuids(subscriber_ids)))
            .select((subscriptions::subscriber_id, UserRow::as_select()))
            .load::<(Uuid, UserRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(linked(rows))
    }

    async fn list_subscribers_of(
        &self,
        author_ids: &[UserId],
    ) -> Result<Vec<LinkedUser>, StorageError> {
        let mut conn = self.connection().await?;
        let rows = subscriptions::table
            .inner_join(users::table.on(users::id.eq(subscriptions::subscriber_id)))
            .filter(subscriptions::author_id.eq_any(uuids(author_ids)))
            .select((subscriptions::author_id, UserRow::as_select()))
            .load::<(Uuid, UserRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(linked(rows))
    }
}

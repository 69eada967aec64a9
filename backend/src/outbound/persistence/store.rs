//! Shared handle behind every Diesel-backed port.

use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::AsyncPgConnection;

use crate::domain::ports::StorageError;

use super::error_mapping::map_pool_error;
use super::pool::DbPool;

/// PostgreSQL implementation of the storage ports.
///
/// One struct serves all five ports so a single pool backs the whole graph;
/// the per-entity `impl` blocks live alongside in `users.rs`, `profiles.rs`
/// and friends.
#[derive(Clone)]
pub struct DieselStore {
    pool: DbPool,
}

impl DieselStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(super) async fn connection(
        &self,
    ) -> Result<PooledConnection<'_, AsyncPgConnection>, StorageError> {
        self.pool.get().await.map_err(map_pool_error)
    }
}

//! Builders for storage ports and HTTP state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use tracing::info;

use social_graph::domain::graph::GraphService;
use social_graph::domain::loader::SubscriptionAttribution;
use social_graph::domain::ports::StoragePorts;
use social_graph::inbound::http::state::HttpState;
use social_graph::outbound::memory::InMemoryStore;
use social_graph::outbound::persistence::{
    DbPool, DieselStore, PoolConfig, run_pending_migrations,
};

use super::settings::ServerSettings;

/// Storage chosen at startup and the label reported by health probes.
pub struct Storage {
    pub ports: StoragePorts,
    pub label: &'static str,
}

/// Connect the configured storage adapter.
///
/// PostgreSQL is used when a database URL is configured, running pending
/// migrations first unless disabled; otherwise an empty in-memory store.
///
/// # Errors
///
/// Returns an I/O error when migrations fail or the pool cannot be built.
pub async fn build_storage(settings: &ServerSettings) -> io::Result<Storage> {
    let Some(url) = settings.database_url.as_deref() else {
        info!("no database configured; using in-memory storage");
        return Ok(Storage {
            ports: StoragePorts::from_adapter(Arc::new(InMemoryStore::new())),
            label: "memory",
        });
    };

    if settings.run_migrations() {
        run_pending_migrations(url).await.map_err(io::Error::other)?;
    }
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
        .await
        .map_err(io::Error::other)?;
    info!(pool_max_size = settings.pool_max_size(), "using PostgreSQL storage");
    Ok(Storage {
        ports: StoragePorts::from_adapter(Arc::new(DieselStore::new(pool))),
        label: "postgres",
    })
}

/// Wrap a graph service over `ports` for the HTTP handlers.
pub fn build_http_state(
    ports: &StoragePorts,
    attribution: SubscriptionAttribution,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(GraphService::new(
        ports,
        attribution,
    ))))
}

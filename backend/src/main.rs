//! Service entry point: loads settings, connects storage and serves
//! `/graphql` with health probes and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use social_graph::domain::loader::SubscriptionAttribution;
use social_graph::inbound::http::health::HealthState;

use server::{ServerConfig, ServerSettings, build_storage, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let storage = build_storage(&settings).await?;
    let attribution =
        SubscriptionAttribution::from_broadcast_flag(settings.broadcast_subscriptions());

    let config =
        ServerConfig::new(settings.bind_addr()?, storage.ports).with_attribution(attribution);
    info!(
        addr = %config.bind_addr(),
        storage = storage.label,
        ?attribution,
        "starting social-graph server"
    );

    let health_state = web::Data::new(HealthState::new(storage.label));
    create_server(health_state, config)?.await
}

//! Server settings loaded via OrthoConfig.
//!
//! Values are layered from defaults, a configuration file, `SOCIAL_GRAPH_*`
//! environment variables and command-line flags.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Runtime configuration for the HTTP server and its storage.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SOCIAL_GRAPH")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL; without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving; defaults to true.
    pub run_migrations: Option<bool>,
    /// Give every subscription batch member the union of all results.
    pub broadcast_subscriptions: Option<bool>,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    pub fn broadcast_subscriptions(&self) -> bool {
        self.broadcast_subscriptions.unwrap_or(false)
    }

    /// Resolve `host:port` to the first matching socket address.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the host cannot be resolved.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no address found for {}:{}", self.host(), self.port()),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "SOCIAL_GRAPH_HOST",
        "SOCIAL_GRAPH_PORT",
        "SOCIAL_GRAPH_DATABASE_URL",
        "SOCIAL_GRAPH_POOL_MAX_SIZE",
        "SOCIAL_GRAPH_RUN_MIGRATIONS",
        "SOCIAL_GRAPH_BROADCAST_SUBSCRIPTIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("social-graph")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
        assert!(settings.database_url.is_none());
        assert!(settings.run_migrations());
        assert!(!settings.broadcast_subscriptions());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SOCIAL_GRAPH_HOST", Some("127.0.0.1")),
            ("SOCIAL_GRAPH_PORT", Some("9090")),
            ("SOCIAL_GRAPH_DATABASE_URL", Some("postgres://localhost/graph")),
            ("SOCIAL_GRAPH_POOL_MAX_SIZE", Some("4")),
            ("SOCIAL_GRAPH_RUN_MIGRATIONS", Some("false")),
            ("SOCIAL_GRAPH_BROADCAST_SUBSCRIPTIONS", Some("true")),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("resolvable"),
            "127.0.0.1:9090".parse().expect("valid address")
        );
        assert_eq!(settings.database_url.as_deref(), Some("postgres://localhost/graph"));
        assert_eq!(settings.pool_max_size(), 4);
        assert!(!settings.run_migrations());
        assert!(settings.broadcast_subscriptions());
    }

    #[rstest]
    fn broadcast_flag_alone_keeps_migrations_enabled() {
        let _guard = lock_env(VARS.map(|name| {
            let value =
                (name == "SOCIAL_GRAPH_BROADCAST_SUBSCRIPTIONS").then(|| "true".to_owned());
            (name, value)
        }));

        let settings = load_from_empty_args();

        assert!(settings.broadcast_subscriptions());
        assert!(settings.run_migrations());
    }
}

//! HTTP server configuration object.

use std::net::SocketAddr;

use social_graph::domain::loader::SubscriptionAttribution;
use social_graph::domain::ports::StoragePorts;

/// Everything `create_server` needs beyond the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) ports: StoragePorts,
    pub(crate) attribution: SubscriptionAttribution,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, ports: StoragePorts) -> Self {
        Self {
            bind_addr,
            ports,
            attribution: SubscriptionAttribution::default(),
        }
    }

    /// Choose how subscription batches attribute their results.
    #[must_use]
    pub fn with_attribution(mut self, attribution: SubscriptionAttribution) -> Self {
        self.attribution = attribution;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on domain ports, so
//! they can be tested against mocks without storage.

use std::sync::Arc;

use crate::domain::ports::GraphExecutor;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub graph: Arc<dyn GraphExecutor>,
}

impl HttpState {
    pub fn new(graph: Arc<dyn GraphExecutor>) -> Self {
        Self { graph }
    }
}

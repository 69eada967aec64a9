//! Graph service: validation plus execution behind the [`GraphExecutor`] port.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{Instrument, debug, info_span};

use super::bind::bind;
use super::document::Operation;
use super::engine::Engine;
use super::response::GraphResponse;
use crate::domain::context::RequestContext;
use crate::domain::loader::SubscriptionAttribution;
use crate::domain::mutations::MutationHandlers;
use crate::domain::ports::{GraphExecutor, StoragePorts};
use crate::domain::providers::Providers;

/// Executes operations against the storage ports.
///
/// Holds only storage handles; every call builds a fresh [`RequestContext`].
#[derive(Clone)]
pub struct GraphService {
    providers: Providers,
    mutations: MutationHandlers,
    attribution: SubscriptionAttribution,
}

impl GraphService {
    #[must_use]
    pub fn new(ports: &StoragePorts, attribution: SubscriptionAttribution) -> Self {
        Self {
            providers: Providers::new(ports),
            mutations: MutationHandlers::new(ports),
            attribution,
        }
    }
}

#[async_trait]
impl GraphExecutor for GraphService {
    async fn execute(
        &self,
        operation: &Operation,
        variables: &Map<String, Value>,
    ) -> GraphResponse {
        let bound = match bind(operation, variables) {
            Ok(bound) => bound,
            Err(errors) => {
                debug!(errors = errors.len(), "operation rejected");
                return GraphResponse::rejected(errors);
            }
        };

        let context = RequestContext::new(&self.providers, self.attribution);
        let span = info_span!(
            "graphql.execute",
            kind = bound.kind.as_str(),
            name = operation.name.as_deref().unwrap_or_default(),
        );
        let response = Engine::new(&context, &self.providers, &self.mutations)
            .run(&bound)
            .instrument(span)
            .await;
        debug!(
            batches = context.dispatch_count(),
            errors = response.errors.len(),
            "operation executed"
        );
        response
    }
}

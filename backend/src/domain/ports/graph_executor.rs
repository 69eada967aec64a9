//! Driving port for executing GraphQL operations.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::graph::{GraphResponse, Operation};

/// Executes one parsed operation against the graph.
///
/// Inbound adapters parse the request document, then hand the selected
/// operation and its variables to this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphExecutor: Send + Sync {
    async fn execute(&self, operation: &Operation, variables: &Map<String, Value>)
    -> GraphResponse;
}

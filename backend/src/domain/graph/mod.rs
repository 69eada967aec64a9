//! GraphQL resolution: query tree, schema binding and execution.

mod bind;
pub mod document;
mod engine;
pub mod response;
pub mod schema;
mod service;

pub use bind::bind;
pub use document::{
    FieldNode, InputValue, Operation, OperationKind, Position, VariableDefinition,
};
pub use response::{GraphError, GraphResponse, PathSegment};
pub use schema::MAX_DEPTH;
pub use service::GraphService;

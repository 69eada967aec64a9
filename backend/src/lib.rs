//! GraphQL backend over a small social graph.
//!
//! The crate follows a hexagonal layout: [`domain`] holds entities, ports,
//! the batch coalescer and the resolution engine; [`inbound`] parses and
//! serves GraphQL over HTTP; [`outbound`] implements the storage ports in
//! memory and on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

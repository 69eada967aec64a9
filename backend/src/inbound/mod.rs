//! Inbound adapters translating external requests into domain calls.
//!
//! [`graphql`] turns request text into the domain's operation tree;
//! [`http`] exposes it, together with health probes, over Actix.

pub mod graphql;
pub mod http;

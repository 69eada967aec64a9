//! HTTP inbound adapter.

pub mod error;
pub mod graphql;
pub mod health;
pub mod schemas;
pub mod state;

pub use error::{ApiResult, json_config};

//! PostgreSQL persistence adapter using Diesel.
//!
//! [`DieselStore`] implements every storage port over a `bb8` pool of
//! `diesel-async` connections. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module; repositories
//! convert them to domain entities at the boundary.
//!
//! ```ignore
//! use social_graph::outbound::persistence::{DbPool, DieselStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/graph")).await?;
//! let ports = StoragePorts::from_adapter(Arc::new(DieselStore::new(pool)));
//! ```

mod error_mapping;
mod member_types;
mod migrations;
mod models;
mod pool;
mod posts;
mod profiles;
mod schema;
mod store;
mod subscriptions;
mod users;

pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use store::DieselStore;

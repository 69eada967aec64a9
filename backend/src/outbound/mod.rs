//! Outbound adapters implementing the storage ports.
//!
//! - **memory**: process-local tables, used when no database is configured
//!   and throughout the test suites
//! - **persistence**: PostgreSQL via Diesel and `diesel-async`

pub mod memory;
pub mod persistence;

//! Server store
//!
//! Holds the list of monitored TNFS servers with their last known status
//! and the "down since" timestamp maintained by the check cycle.

pub mod migrations;
pub mod models;
pub mod repository;

#[cfg(test)]
pub mod memory;

pub use models::{CheckUpdate, ServerRecord};
pub use repository::{LibsqlStore, ServerStore};

use anyhow::Result;

/// Initialize database with schema
pub async fn initialize_database(conn: &libsql::Connection) -> Result<()> {
    migrations::run_migrations(conn).await
}

//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the employee schema
//! - The employee store backing `employees-core`
//! - Pool setup from [`DatabaseConfig`]

pub mod entities;
pub mod repositories;
pub mod update;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use repositories::EmployeeStore;

use std::time::Duration;

use employees_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Opens the connection pool.
///
/// Every store operation borrows a connection from this pool for its own
/// duration and returns it afterwards.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.connection_url());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(true);

    let db = Database::connect(options).await?;
    info!(
        host = %config.host,
        database = %config.name,
        max_connections = config.max_connections,
        "Database pool ready"
    );
    Ok(db)
}

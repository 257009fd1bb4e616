use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::error::AppError;

/// Connect to the database at `database_url`. Does NOT run migrations.
///
/// In-memory SQLite is pinned to a single connection: every pooled
/// connection would otherwise open its own empty database.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(database_url.to_string());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    if database_url.starts_with("sqlite::memory:") {
        options.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(options)
        .await
        .map_err(|e| AppError::db_unavailable(format!("failed to connect to database: {e}")))?;
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(database_url).await?;
    migration::migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migrations failed: {e}")))?;
    info!(backend = ?conn.get_database_backend(), "database ready");
    Ok(conn)
}

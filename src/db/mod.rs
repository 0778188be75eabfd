use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

const MAX_CONNECTIONS: u32 = 10;
const MIN_CONNECTIONS: u32 = 1;

/// Open the connection pool for `database_url` (Postgres or SQLite).
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url);
    opts.max_connections(MAX_CONNECTIONS)
        .min_connections(MIN_CONNECTIONS)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {e}"))?;
    Ok(db)
}

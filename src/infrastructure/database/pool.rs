use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// The acquire timeout is the fail-fast bound for requests while the store is
/// down: callers get an error within this window instead of queuing.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await?;
    Ok(pool)
}

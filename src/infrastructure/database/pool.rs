use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Opens the pool shared by every Postgres repository and the health check.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    tracing::info!("Database pool ready (max {} connections)", max_connections);
    Ok(pool)
}

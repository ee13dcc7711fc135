use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
  tracing::info!(max_connections = config.max_connections, "Connecting to database");

  PgPoolOptions::new()
    .max_connections(config.max_connections)
    .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
    .connect(&config.url)
    .await
}

mod session_repository;

pub use session_repository::PostgresSessionRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub struct PostgresConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

pub async fn create_pool(config: &PostgresConfig) -> sqlx::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.connection_string)
        .await
}

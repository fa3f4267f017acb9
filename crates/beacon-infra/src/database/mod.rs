//! Post persistence - SeaORM-backed store plus in-memory fallbacks.

mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres;

pub use memory::{InMemoryPostRepository, UnavailablePostRepository};

#[cfg(feature = "postgres")]
pub use postgres::PostgresPostRepository;


/// Configuration for the post store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[cfg(feature = "postgres")]
pub async fn connect(config: &DatabaseConfig) -> Result<sea_orm::DbConn, sea_orm::DbErr> {
    use std::time::Duration;

    use sea_orm::{ConnectOptions, Database};

    let opts = ConnectOptions::new(&config.url)
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let conn = Database::connect(opts).await?;
    tracing::info!(pool = config.max_connections, "Post store connected");
    Ok(conn)
}

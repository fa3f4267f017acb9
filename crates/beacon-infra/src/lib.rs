//! # Beacon Infrastructure
//!
//! Concrete implementations of the ports defined in `beacon-core`.
//! This crate contains database, cache, session, mail, and image-storage
//! integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - Post persistence via SeaORM
//! - `smtp` - Outbound mail via lettre
//! - `redis` - Redis-backed cache (and therefore sessions)

pub mod cache;
pub mod database;
pub mod mailer;
pub mod media;
pub mod session;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use database::{DatabaseConfig, InMemoryPostRepository, UnavailablePostRepository};
pub use mailer::DisabledMailer;
pub use media::{HttpMediaStore, HttpMediaStoreConfig, UnconfiguredMediaStore};
pub use session::CacheSessionStore;

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;

#[cfg(feature = "smtp")]
pub use mailer::{SmtpMailer, SmtpMailerConfig};

#[cfg(feature = "redis")]
pub use cache::{RedisCache, RedisConfig};

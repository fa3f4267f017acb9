//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use beacon_core::domain::FormRegistry;
use beacon_core::ports::{Cache, MediaStore, PostRepository, SessionStore, UploadPolicy};
use beacon_infra::{
    CacheSessionStore, DisabledMailer, HttpMediaStore, HttpMediaStoreConfig, InMemoryCache,
    InMemoryPostRepository, UnconfiguredMediaStore,
};

use crate::config::{AdminCredentials, AppConfig};
use crate::forms;

/// Which implementation each optional collaborator resolved to at startup.
/// Surfaced by the health endpoint; `store: "unavailable"` marks the
/// degraded mode where store-backed routes fail per call.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BackendStatus {
    pub store: &'static str,
    pub mail: &'static str,
    pub media: &'static str,
}

/// Shared application state. Every collaborator sits behind a port trait,
/// created here at process start.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub mailer: Arc<dyn beacon_core::ports::Mailer>,
    pub media: Arc<dyn MediaStore>,
    pub forms: Arc<FormRegistry>,
    pub admin: Option<AdminCredentials>,
    pub upload_policy: UploadPolicy,
    pub session_ttl: Duration,
    pub cookie_secure: bool,
    pub backends: BackendStatus,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let cache = Self::build_cache().await;
        let sessions: Arc<dyn SessionStore> =
            Arc::new(CacheSessionStore::new(cache, config.session_ttl));

        let (posts, store_status) = Self::build_posts(config).await;
        let (mailer, mail_status) = Self::build_mailer(config);

        let (media, media_status): (Arc<dyn MediaStore>, &'static str) = match &config.media {
            Some(settings) => (
                Arc::new(HttpMediaStore::new(HttpMediaStoreConfig {
                    upload_url: settings.upload_url.clone(),
                    api_key: settings.api_key.clone(),
                    folder: settings.folder.clone(),
                })),
                "remote",
            ),
            None => {
                tracing::warn!("MEDIA_UPLOAD_URL not set; image uploads will be rejected");
                (Arc::new(UnconfiguredMediaStore), "unconfigured")
            }
        };

        if config.admin.is_none() {
            tracing::warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set; operator login is disabled");
        }

        tracing::info!("Application state initialized");

        Self {
            posts,
            sessions,
            mailer,
            media,
            forms: Arc::new(forms::registry()),
            admin: config.admin.clone(),
            upload_policy: config.upload_policy.clone(),
            session_ttl: config.session_ttl,
            cookie_secure: config.cookie_secure,
            backends: BackendStatus {
                store: store_status,
                mail: mail_status,
                media: media_status,
            },
        }
    }

    #[cfg(feature = "redis")]
    async fn build_cache() -> Arc<dyn Cache> {
        use beacon_infra::{RedisCache, RedisConfig};

        match RedisConfig::from_env() {
            Some(redis_config) => match RedisCache::new(redis_config).await {
                Ok(cache) => Arc::new(cache),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to Redis: {}. Sessions fall back to memory.",
                        e
                    );
                    Arc::new(InMemoryCache::new())
                }
            },
            None => Arc::new(InMemoryCache::new()),
        }
    }

    #[cfg(not(feature = "redis"))]
    async fn build_cache() -> Arc<dyn Cache> {
        Arc::new(InMemoryCache::new())
    }

    #[cfg(feature = "postgres")]
    async fn build_posts(config: &AppConfig) -> (Arc<dyn PostRepository>, &'static str) {
        use beacon_infra::{PostgresPostRepository, UnavailablePostRepository, database};

        match &config.database {
            Some(db_config) => match database::connect(db_config).await {
                Ok(conn) => (Arc::new(PostgresPostRepository::new(conn)), "postgres"),
                Err(e) => {
                    // Keep serving: store-backed routes fail per call instead
                    // of taking the contact-form relay down with them.
                    tracing::error!(
                        "Failed to connect to the post store: {}. Running degraded.",
                        e
                    );
                    (Arc::new(UnavailablePostRepository), "unavailable")
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Posts are stored in memory only.");
                (Arc::new(InMemoryPostRepository::new()), "memory")
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn build_posts(_config: &AppConfig) -> (Arc<dyn PostRepository>, &'static str) {
        tracing::info!("Running without postgres feature - using in-memory post store");
        (Arc::new(InMemoryPostRepository::new()), "memory")
    }

    #[cfg(feature = "smtp")]
    fn build_mailer(config: &AppConfig) -> (Arc<dyn beacon_core::ports::Mailer>, &'static str) {
        use beacon_infra::{SmtpMailer, SmtpMailerConfig};

        match &config.mail {
            Some(settings) => {
                let mailer_config = SmtpMailerConfig {
                    host: settings.smtp_host.clone(),
                    username: settings.username.clone(),
                    password: settings.password.clone(),
                    recipient: settings.recipient.clone(),
                };
                match SmtpMailer::new(mailer_config) {
                    Ok(mailer) => (Arc::new(mailer), "smtp"),
                    Err(e) => {
                        tracing::error!("Invalid mail configuration: {}. Mail is disabled.", e);
                        (Arc::new(DisabledMailer), "disabled")
                    }
                }
            }
            None => {
                tracing::warn!("Mail credentials not set; form submissions will fail");
                (Arc::new(DisabledMailer), "disabled")
            }
        }
    }

    #[cfg(not(feature = "smtp"))]
    fn build_mailer(_config: &AppConfig) -> (Arc<dyn beacon_core::ports::Mailer>, &'static str) {
        tracing::info!("Running without smtp feature - mail is disabled");
        (Arc::new(DisabledMailer), "disabled")
    }
}

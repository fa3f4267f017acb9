//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use beacon_core::ports::UploadPolicy;
use beacon_infra::DatabaseConfig;

/// The single operator credential pair. Configured, never hard-coded.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

/// SMTP relay settings for the contact-form relay.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub smtp_host: String,
    pub username: String,
    pub password: String,
    pub recipient: String,
}

/// External image host settings.
#[derive(Debug, Clone)]
pub struct MediaSettings {
    pub upload_url: String,
    pub api_key: Option<String>,
    pub folder: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub admin: Option<AdminCredentials>,
    /// Idle expiry of an operator session; also the session cookie lifetime.
    pub session_ttl: Duration,
    pub cookie_secure: bool,
    pub mail: Option<MailSettings>,
    pub media: Option<MediaSettings>,
    pub upload_policy: UploadPolicy,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        });

        let admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
            (Ok(username), Ok(password)) => Some(AdminCredentials { username, password }),
            _ => None,
        };

        let mail = match (
            env::var("SMTP_HOST"),
            env::var("EMAIL_USER"),
            env::var("EMAIL_PASS"),
            env::var("RECEIVER_EMAIL"),
        ) {
            (Ok(smtp_host), Ok(username), Ok(password), Ok(recipient)) => Some(MailSettings {
                smtp_host,
                username,
                password,
                recipient,
            }),
            _ => None,
        };

        let media = env::var("MEDIA_UPLOAD_URL").ok().map(|upload_url| MediaSettings {
            upload_url,
            api_key: env::var("MEDIA_API_KEY").ok(),
            folder: env::var("MEDIA_FOLDER").ok(),
        });

        let upload_policy = UploadPolicy {
            max_bytes: env::var("UPLOAD_MAX_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(UploadPolicy::default().max_bytes),
            allow_gif: env::var("UPLOAD_ALLOW_GIF")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            admin,
            session_ttl: Duration::from_secs(
                env::var("SESSION_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(24 * 60 * 60),
            ),
            cookie_secure: env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            mail,
            media,
            upload_policy,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

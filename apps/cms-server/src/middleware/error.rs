//! Error handling at the handler boundary - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use beacon_shared::ErrorResponse;
use thiserror::Error;

use beacon_core::error::{DomainError, RepoError};
use beacon_core::ports::{MailError, MediaError, SessionError, UploadError};

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Mail delivery failed: {0}")]
    MailDelivery(String),

    #[error("Post store unavailable")]
    StoreUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            AppError::MailDelivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::InvalidUpload(detail) => {
                ErrorResponse::new(400, "Invalid Upload").with_detail(detail)
            }
            AppError::MailDelivery(detail) => {
                tracing::error!("Mail delivery failed: {}", detail);
                ErrorResponse::new(500, "Email Delivery Failed")
            }
            AppError::StoreUnavailable => {
                ErrorResponse::service_unavailable("The post store is unavailable")
            }
            AppError::Internal(detail) => {
                // Log internal errors, never leak details to clients
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity, id))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Unauthorized => AppError::Unauthorized,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::StoreUnavailable
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::InvalidUpload(err.to_string())
    }
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        tracing::error!("Image storage error: {}", err);
        AppError::Internal("Image storage failed".to_string())
    }
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        AppError::MailDelivery(err.to_string())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::{AppState, BackendStatus};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub backends: BackendStatus,
}

/// GET /api/health
///
/// Reports whether the process is fully up or running degraded, plus which
/// implementation each optional collaborator resolved to at startup.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let backends = state.backends;
    let status = if backends.store == "unavailable" {
        "degraded"
    } else {
        "ok"
    };

    HttpResponse::Ok().json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        backends,
    })
}

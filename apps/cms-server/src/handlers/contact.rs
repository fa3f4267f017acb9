//! Contact-form relay handlers.
//!
//! Every `/send*` route funnels through [`relay`]: look up the form spec,
//! render the submitted payload into an email, and hand it to the mailer.
//! The response shape mirrors what the marketing frontends expect, including
//! the 500 body when the relay itself fails.

use actix_web::{HttpResponse, web};
use serde_json::Value;

use beacon_core::DomainError;

use crate::forms::DEFAULT_FORM;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /send - the demo-class booking form.
pub async fn send_default(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> AppResult<HttpResponse> {
    relay(&state, DEFAULT_FORM, payload.into_inner()).await
}

/// POST /send-{form}
pub async fn send_form(
    state: web::Data<AppState>,
    form: web::Path<String>,
    payload: web::Json<Value>,
) -> AppResult<HttpResponse> {
    relay(&state, &form, payload.into_inner()).await
}

async fn relay(state: &AppState, slug: &str, payload: Value) -> AppResult<HttpResponse> {
    let spec = state
        .forms
        .get(slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown form '{slug}'")))?;

    let empty = serde_json::Map::new();
    let fields = payload.as_object().unwrap_or(&empty);

    let message = match spec.render(fields) {
        Ok(message) => message,
        Err(DomainError::Validation(reason)) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "message": reason,
            })));
        }
        Err(e) => return Err(e.into()),
    };

    match state.mailer.send(message).await {
        Ok(()) => {
            tracing::info!(form = slug, "Contact form relayed");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "message": "Email sent successfully!",
            })))
        }
        Err(e) => {
            tracing::error!(form = slug, error = %e, "Contact form relay failed");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Email sending failed.",
            })))
        }
    }
}

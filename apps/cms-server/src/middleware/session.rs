//! Session gate - extractor guarding operator-only routes.

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, http::header};
use futures::future::LocalBoxFuture;

use beacon_shared::ErrorResponse;

use crate::state::AppState;

/// Cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "sid";

/// Where browsers are sent when they need to authenticate. The page itself
/// is served elsewhere; only the redirect target lives here.
pub const LOGIN_PAGE: &str = "/admin/login.html";

/// True when the caller prefers a JSON error over an HTML redirect.
pub fn wants_json(req: &HttpRequest) -> bool {
    let accepts_json = req
        .headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);

    let is_xhr = req
        .headers()
        .get("X-Requested-With")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
        .unwrap_or(false);

    accepts_json || is_xhr
}

/// Authenticated operator session extractor. The token itself stays in the
/// cookie; handlers only need proof that it maps to a live session.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(_session: AdminSession) -> impl Responder {
///     ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

/// Rejection raised when no live session backs the request. Rendered as a
/// 401 JSON body or a redirect to the login surface, per the caller's
/// declared content preference.
#[derive(Debug)]
pub struct SessionRejection {
    wants_json: bool,
}

impl std::fmt::Display for SessionRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing or invalid operator session")
    }
}

impl actix_web::ResponseError for SessionRejection {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        if self.wants_json {
            HttpResponse::Unauthorized().json(ErrorResponse::unauthorized())
        } else {
            HttpResponse::Found()
                .insert_header((header::LOCATION, LOGIN_PAGE))
                .finish()
        }
    }
}

impl FromRequest for AdminSession {
    type Error = SessionRejection;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let wants_json = wants_json(req);
        let state = req.app_data::<actix_web::web::Data<AppState>>().cloned();
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        Box::pin(async move {
            let state = match state {
                Some(state) => state,
                None => {
                    tracing::error!("AppState not found in app data");
                    return Err(SessionRejection { wants_json });
                }
            };

            let token = token.ok_or(SessionRejection { wants_json })?;

            if state.sessions.verify(&token).await {
                Ok(AdminSession)
            } else {
                Err(SessionRejection { wants_json })
            }
        })
    }
}

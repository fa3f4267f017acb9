//! Session gate handlers: operator login, logout, and the dashboard shell.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::{Either, HttpRequest, HttpResponse, web};

use beacon_shared::dto::{LoginRequest, LoginResponse, MessageResponse};

use crate::middleware::error::AppResult;
use crate::middleware::session::{AdminSession, LOGIN_PAGE, SESSION_COOKIE, wants_json};
use crate::state::AppState;

const DASHBOARD: &str = "/dashboard";

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    // SameSite=None lets the admin frontend on another origin carry the
    // cookie; that mode requires the secure flag.
    let same_site = if state.cookie_secure {
        SameSite::None
    } else {
        SameSite::Lax
    };

    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(same_site)
        .max_age(CookieDuration::seconds(state.session_ttl.as_secs() as i64))
        .finish()
}

fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

fn redirect_to(target: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, target))
        .finish()
}

/// GET / - the root only points browsers at the login surface.
pub async fn index() -> HttpResponse {
    redirect_to(LOGIN_PAGE)
}

/// POST /login
///
/// Accepts both JSON and form-encoded bodies: the admin frontend posts
/// JSON, plain browser forms post urlencoded. Compares against the
/// configured operator credential pair; the failure response never reveals
/// which field was wrong.
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Either<web::Json<LoginRequest>, web::Form<LoginRequest>>,
) -> AppResult<HttpResponse> {
    let creds = body.into_inner();

    if creds.username.is_empty() || creds.password.is_empty() {
        let resp = LoginResponse {
            success: false,
            redirect: None,
            message: Some("Missing credentials".to_string()),
        };
        return Ok(if wants_json(&req) {
            HttpResponse::BadRequest().json(resp)
        } else {
            HttpResponse::BadRequest().body("Missing credentials")
        });
    }

    let authenticated = state
        .admin
        .as_ref()
        .map(|admin| admin.username == creds.username && admin.password == creds.password)
        .unwrap_or(false);

    if !authenticated {
        tracing::debug!("Rejected operator login attempt");
        let resp = LoginResponse {
            success: false,
            redirect: None,
            message: Some("Invalid credentials".to_string()),
        };
        return Ok(if wants_json(&req) {
            HttpResponse::Unauthorized().json(resp)
        } else {
            redirect_to(LOGIN_PAGE)
        });
    }

    let token = state.sessions.begin().await?;
    let cookie = session_cookie(&state, token);

    tracing::info!("Operator logged in");

    Ok(if wants_json(&req) {
        HttpResponse::Ok().cookie(cookie).json(LoginResponse {
            success: true,
            redirect: Some(DASHBOARD.to_string()),
            message: None,
        })
    } else {
        HttpResponse::Found()
            .cookie(cookie)
            .insert_header((header::LOCATION, DASHBOARD))
            .finish()
    })
}

/// GET /logout - revokes the session and clears the cookie.
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        state.sessions.revoke(cookie.value()).await?;
    }

    Ok(if wants_json(&req) {
        HttpResponse::Ok().cookie(removal_cookie()).json(MessageResponse {
            message: "Logged out".to_string(),
        })
    } else {
        HttpResponse::Found()
            .cookie(removal_cookie())
            .insert_header((header::LOCATION, LOGIN_PAGE))
            .finish()
    })
}

/// GET /dashboard - protected. Page markup is served by the admin frontend;
/// this endpoint exists so the gate covers the dashboard view itself.
pub async fn dashboard(_session: AdminSession) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("<!doctype html><title>Dashboard</title><h1>Beacon CMS</h1>")
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::http::header;
    use actix_web::test;

    use beacon_shared::dto::{LoginRequest, LoginResponse};

    use crate::handlers::test_support::{
        RecordingMailer, StaticMediaStore, TEST_PASSWORD, TEST_USER, login, spawn_app, test_state,
    };
    use crate::middleware::session::{LOGIN_PAGE, SESSION_COOKIE};

    fn state() -> crate::state::AppState {
        test_state(
            RecordingMailer::working(),
            StaticMediaStore::new("https://cdn.example.com/x.png"),
        )
    }

    #[actix_web::test]
    async fn login_success_sets_cookie_and_reports_redirect() {
        let app = spawn_app(state()).await;
        let cookie = login(&app).await;
        assert!(!cookie.value().is_empty());

        // The cookie opens the dashboard.
        let req = test::TestRequest::get()
            .uri("/dashboard")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn login_failure_is_generic() {
        let app = spawn_app(state()).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .insert_header((header::ACCEPT, "application/json"))
            .set_json(LoginRequest {
                username: TEST_USER.to_string(),
                password: "wrong".to_string(),
            })
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: LoginResponse = test::read_body_json(resp).await;
        assert!(!body.success);
        assert_eq!(body.message.as_deref(), Some("Invalid credentials"));
    }

    #[actix_web::test]
    async fn login_with_blank_fields_is_bad_request() {
        let app = spawn_app(state()).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .insert_header((header::ACCEPT, "application/json"))
            .set_json(LoginRequest {
                username: String::new(),
                password: String::new(),
            })
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn form_encoded_login_sets_cookie_and_redirects_to_dashboard() {
        let app = spawn_app(state()).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_form(LoginRequest {
                username: TEST_USER.to_string(),
                password: TEST_PASSWORD.to_string(),
            })
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/dashboard");

        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("form login did not set a session cookie");
        assert!(!cookie.value().is_empty());
    }

    #[actix_web::test]
    async fn browser_login_failure_redirects_to_login_page() {
        let app = spawn_app(state()).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(LoginRequest {
                username: "nobody".to_string(),
                password: "nothing".to_string(),
            })
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            LOGIN_PAGE
        );
    }

    #[actix_web::test]
    async fn dashboard_without_session_negotiates_401_or_redirect() {
        let app = spawn_app(state()).await;

        let json_req = test::TestRequest::get()
            .uri("/dashboard")
            .insert_header((header::ACCEPT, "application/json"))
            .to_request();
        let resp = test::call_service(&app, json_req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let browser_req = test::TestRequest::get().uri("/dashboard").to_request();
        let resp = test::call_service(&app, browser_req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            LOGIN_PAGE
        );
    }

    #[actix_web::test]
    async fn logout_revokes_the_session() {
        let app = spawn_app(state()).await;
        let cookie = login(&app).await;

        let req = test::TestRequest::get()
            .uri("/logout")
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        // The removal cookie is present and empty.
        let removed = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .unwrap();
        assert!(removed.value().is_empty());

        // The old token no longer opens the gate.
        let req = test::TestRequest::get()
            .uri("/dashboard")
            .insert_header((header::ACCEPT, "application/json"))
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}

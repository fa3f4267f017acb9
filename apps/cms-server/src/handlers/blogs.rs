//! Blog CRUD handlers. Writes accept either a JSON body or a multipart form
//! carrying the same fields plus one `image` file.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use uuid::Uuid;

use beacon_core::domain::{Post, PostDraft, is_absolute_http_url};
use beacon_core::error::RepoError;
use beacon_core::ports::ImageUpload;
use beacon_shared::dto::{BlogMutationResponse, BlogRequest, MessageResponse, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::{AdminSession, wants_json};
use crate::state::AppState;

/// GET /blogs and GET /api/blogs - public, image-normalized.
pub async fn list_blogs(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent().await?;
    let body: Vec<PostResponse> = posts.iter().map(PostResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /add-blog - operator only.
pub async fn add_blog(
    req: HttpRequest,
    state: web::Data<AppState>,
    _session: AdminSession,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let (form, file) = read_blog_form(&req, payload, &state).await?;
    let image_url = resolve_image(&state, file, form.image).await?;

    let post = Post::create(PostDraft {
        title: form.title.unwrap_or_default(),
        content: form.content.unwrap_or_default(),
        image_url,
        created_at: form.date,
    })?;

    let post = state.posts.insert(post).await?;
    tracing::info!(post_id = %post.id, "Blog added");

    mutation_response(&req, "Blog added successfully!", &post)
}

/// POST /edit-blog/{id} - operator only. Full overwrite, no partial patch.
pub async fn edit_blog(
    req: HttpRequest,
    state: web::Data<AppState>,
    _session: AdminSession,
    path: web::Path<Uuid>,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let (form, file) = read_blog_form(&req, payload, &state).await?;

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".to_string()))?;

    let image_url = resolve_image(&state, file, form.image).await?;

    if let Some(new_ts) = form.date {
        if new_ts != post.created_at {
            // Editorial republish; deliberately allowed but worth a trace.
            tracing::warn!(post_id = %id, "Edit overwrites the creation timestamp");
        }
    }

    post.apply(PostDraft {
        title: form.title.unwrap_or_default(),
        content: form.content.unwrap_or_default(),
        image_url,
        created_at: form.date,
    })?;

    let post = state.posts.update(post).await?;
    tracing::info!(post_id = %post.id, "Blog updated");

    mutation_response(&req, "Blog updated successfully!", &post)
}

/// POST /delete-blog/{id} - operator only, hard delete.
pub async fn delete_blog(
    state: web::Data<AppState>,
    _session: AdminSession,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.delete(id).await {
        Ok(()) => {
            tracing::info!(post_id = %id, "Blog deleted");
            Ok(HttpResponse::Ok().json(MessageResponse {
                message: "Blog deleted successfully!".to_string(),
            }))
        }
        Err(RepoError::NotFound) => Err(AppError::NotFound("Blog not found".to_string())),
        Err(e) => Err(e.into()),
    }
}

fn mutation_response(req: &HttpRequest, message: &str, post: &Post) -> AppResult<HttpResponse> {
    Ok(if wants_json(req) {
        HttpResponse::Ok().json(BlogMutationResponse {
            message: message.to_string(),
            blog: PostResponse::from(post),
        })
    } else {
        HttpResponse::Found()
            .insert_header((header::LOCATION, "/dashboard"))
            .finish()
    })
}

/// Store the uploaded file, or validate a raw reference string. The upload
/// is rejected before any post is written.
async fn resolve_image(
    state: &AppState,
    file: Option<ImageUpload>,
    raw_ref: Option<String>,
) -> Result<Option<String>, AppError> {
    if let Some(file) = file {
        state
            .upload_policy
            .validate(&file.filename, file.bytes.len())?;
        let url = state.media.store(file).await?;
        return Ok(Some(url));
    }

    match raw_ref {
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => {
            if !is_absolute_http_url(&raw) {
                return Err(AppError::BadRequest(
                    "image must be an absolute http(s) URL".to_string(),
                ));
            }
            Ok(Some(raw))
        }
        None => Ok(None),
    }
}

/// Upper bound on buffered text: the JSON write body and each multipart
/// text field. File parts are capped by the upload policy instead.
const TEXT_BODY_LIMIT: usize = 100 * 1024;

fn bad_multipart(e: MultipartError) -> AppError {
    AppError::BadRequest(format!("invalid multipart body: {e}"))
}

async fn read_text(field: &mut Field) -> Result<String, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
        if data.len() + chunk.len() > TEXT_BODY_LIMIT {
            return Err(AppError::BadRequest("form field is too large".to_string()));
        }
        data.extend_from_slice(&chunk);
    }
    String::from_utf8(data)
        .map_err(|_| AppError::BadRequest("form field is not valid UTF-8".to_string()))
}

/// Read a write-request body: multipart form or JSON, by content type.
/// At most one file is accepted, under the `image` field; its size is
/// capped while streaming so an oversized body never buffers fully.
async fn read_blog_form(
    req: &HttpRequest,
    payload: web::Payload,
    state: &AppState,
) -> Result<(BlogRequest, Option<ImageUpload>), AppError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !content_type.starts_with("multipart/form-data") {
        let mut payload = payload;
        let mut bytes = Vec::new();
        while let Some(chunk) = payload
            .try_next()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            if bytes.len() + chunk.len() > TEXT_BODY_LIMIT {
                return Err(AppError::BadRequest("request body is too large".to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }
        let form: BlogRequest = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))?;
        return Ok((form, None));
    }

    let mut multipart = Multipart::new(req.headers(), payload);
    let mut form = BlogRequest::default();
    let mut file: Option<ImageUpload> = None;

    while let Some(mut field) = multipart.try_next().await.map_err(bad_multipart)? {
        let name = field.name().to_string();
        let filename = field
            .content_disposition()
            .get_filename()
            .map(str::to_string);

        match (name.as_str(), filename) {
            ("image", Some(filename)) => {
                let limit = state.upload_policy.max_bytes;
                let mut bytes: Vec<u8> = Vec::new();
                while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
                    if bytes.len() + chunk.len() > limit {
                        return Err(AppError::InvalidUpload(format!(
                            "File exceeds the {limit} byte upload limit"
                        )));
                    }
                    bytes.extend_from_slice(&chunk);
                }
                file = Some(ImageUpload { filename, bytes });
            }
            ("title", _) => form.title = Some(read_text(&mut field).await?),
            ("content", _) => form.content = Some(read_text(&mut field).await?),
            ("image", None) => form.image = Some(read_text(&mut field).await?),
            ("date", _) => {
                let text = read_text(&mut field).await?;
                if !text.trim().is_empty() {
                    let parsed = DateTime::parse_from_rfc3339(text.trim()).map_err(|_| {
                        AppError::BadRequest("date must be an RFC 3339 timestamp".to_string())
                    })?;
                    form.date = Some(parsed.with_timezone(&Utc));
                }
            }
            // Unknown fields are drained and ignored.
            _ => {
                let _ = read_text(&mut field).await?;
            }
        }
    }

    Ok((form, file))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::http::header;
    use actix_web::test;
    use serde_json::json;

    use beacon_core::domain::PLACEHOLDER_IMAGE_URL;
    use beacon_core::ports::UploadPolicy;
    use beacon_shared::dto::{BlogMutationResponse, PostResponse};

    use crate::handlers::test_support::{
        RecordingMailer, StaticMediaStore, login, spawn_app, test_state,
    };

    const CDN_URL: &str = "https://cdn.example.com/stored.png";

    fn state_with_media() -> (crate::state::AppState, std::sync::Arc<StaticMediaStore>) {
        let media = StaticMediaStore::new(CDN_URL);
        let state = test_state(RecordingMailer::working(), media.clone());
        (state, media)
    }

    fn multipart_body(boundary: &str, parts: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, filename, value) in parts {
            body.push_str(&format!("--{boundary}\r\n"));
            match filename {
                Some(f) => {
                    body.push_str(&format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n"
                    ));
                    body.push_str("Content-Type: application/octet-stream\r\n\r\n");
                }
                None => {
                    body.push_str(&format!(
                        "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                    ));
                }
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{boundary}--\r\n"));
        body
    }

    async fn list<S>(app: &S) -> Vec<PostResponse>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
    {
        let req = test::TestRequest::get().uri("/blogs").to_request();
        let resp = test::call_service(app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        test::read_body_json(resp).await
    }

    #[actix_web::test]
    async fn crud_scenario_over_http() {
        let (state, _media) = state_with_media();
        let app = spawn_app(state).await;
        let cookie = login(&app).await;

        // Create.
        let req = test::TestRequest::post()
            .uri("/add-blog")
            .insert_header((header::ACCEPT, "application/json"))
            .cookie(cookie.clone())
            .set_json(json!({"title": "A", "content": "B"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let created: BlogMutationResponse = test::read_body_json(resp).await;
        let id = created.blog.id;

        let posts = list(&app).await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, id);
        assert_eq!(posts[0].image_url, PLACEHOLDER_IMAGE_URL);

        // Update.
        let req = test::TestRequest::post()
            .uri(&format!("/edit-blog/{id}"))
            .insert_header((header::ACCEPT, "application/json"))
            .cookie(cookie.clone())
            .set_json(json!({"title": "A2", "content": "B2"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let posts = list(&app).await;
        assert_eq!(posts[0].title, "A2");
        assert_eq!(posts[0].content, "B2");

        // Delete, then the id is gone for every mutation.
        let req = test::TestRequest::post()
            .uri(&format!("/delete-blog/{id}"))
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        assert!(list(&app).await.is_empty());

        let req = test::TestRequest::post()
            .uri(&format!("/delete-blog/{id}"))
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri(&format!("/edit-blog/{id}"))
            .insert_header((header::ACCEPT, "application/json"))
            .cookie(cookie)
            .set_json(json!({"title": "A3", "content": "B3"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn create_with_missing_title_fails_validation() {
        let (state, _media) = state_with_media();
        let app = spawn_app(state).await;
        let cookie = login(&app).await;

        let req = test::TestRequest::post()
            .uri("/add-blog")
            .insert_header((header::ACCEPT, "application/json"))
            .cookie(cookie)
            .set_json(json!({"content": "B"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        assert!(list(&app).await.is_empty());
    }

    #[actix_web::test]
    async fn oversized_json_body_is_rejected_before_buffering_completes() {
        let (state, _media) = state_with_media();
        let app = spawn_app(state).await;
        let cookie = login(&app).await;

        let req = test::TestRequest::post()
            .uri("/add-blog")
            .insert_header((header::ACCEPT, "application/json"))
            .cookie(cookie)
            .set_json(json!({"title": "A", "content": "x".repeat(200 * 1024)}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        assert!(list(&app).await.is_empty());
    }

    #[actix_web::test]
    async fn mutations_require_a_session() {
        let (state, _media) = state_with_media();
        let app = spawn_app(state).await;

        let req = test::TestRequest::post()
            .uri("/add-blog")
            .insert_header((header::ACCEPT, "application/json"))
            .set_json(json!({"title": "A", "content": "B"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn multipart_upload_records_the_stored_url() {
        let (state, media) = state_with_media();
        let app = spawn_app(state).await;
        let cookie = login(&app).await;

        let boundary = "test-boundary";
        let body = multipart_body(
            boundary,
            &[
                ("title", None, "With image"),
                ("content", None, "Body"),
                ("image", Some("pic.png"), "PNGDATA"),
            ],
        );

        let req = test::TestRequest::post()
            .uri("/add-blog")
            .insert_header((header::ACCEPT, "application/json"))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            ))
            .cookie(cookie)
            .set_payload(body)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let created: BlogMutationResponse = test::read_body_json(resp).await;
        assert_eq!(created.blog.image_url, CDN_URL);
        assert_eq!(media.stored.lock().await.as_slice(), ["pic.png"]);
    }

    #[actix_web::test]
    async fn disallowed_extension_is_rejected_before_any_mutation() {
        let (state, media) = state_with_media();
        let app = spawn_app(state).await;
        let cookie = login(&app).await;

        let boundary = "test-boundary";
        let body = multipart_body(
            boundary,
            &[
                ("title", None, "Evil"),
                ("content", None, "Body"),
                ("image", Some("payload.exe"), "MZ..."),
            ],
        );

        let req = test::TestRequest::post()
            .uri("/add-blog")
            .insert_header((header::ACCEPT, "application/json"))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            ))
            .cookie(cookie)
            .set_payload(body)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        assert!(list(&app).await.is_empty());
        assert!(media.stored.lock().await.is_empty());
    }

    #[actix_web::test]
    async fn oversized_upload_is_rejected_while_streaming() {
        let (mut state, media) = state_with_media();
        state.upload_policy = UploadPolicy {
            max_bytes: 8,
            allow_gif: false,
        };
        let app = spawn_app(state).await;
        let cookie = login(&app).await;

        let boundary = "test-boundary";
        let body = multipart_body(
            boundary,
            &[
                ("title", None, "Big"),
                ("content", None, "Body"),
                ("image", Some("big.png"), "way more than eight bytes"),
            ],
        );

        let req = test::TestRequest::post()
            .uri("/add-blog")
            .insert_header((header::ACCEPT, "application/json"))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            ))
            .cookie(cookie)
            .set_payload(body)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(media.stored.lock().await.is_empty());
    }

    #[actix_web::test]
    async fn raw_image_ref_must_be_an_absolute_url() {
        let (state, _media) = state_with_media();
        let app = spawn_app(state).await;
        let cookie = login(&app).await;

        let req = test::TestRequest::post()
            .uri("/add-blog")
            .insert_header((header::ACCEPT, "application/json"))
            .cookie(cookie.clone())
            .set_json(json!({"title": "A", "content": "B", "image": "javascript:alert(1)"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/add-blog")
            .insert_header((header::ACCEPT, "application/json"))
            .cookie(cookie)
            .set_json(json!({
                "title": "A",
                "content": "B",
                "image": "https://img.example.com/a.jpg"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let created: BlogMutationResponse = test::read_body_json(resp).await;
        assert_eq!(created.blog.image_url, "https://img.example.com/a.jpg");
    }

    #[actix_web::test]
    async fn edit_without_image_retains_the_existing_reference() {
        let (state, _media) = state_with_media();
        let app = spawn_app(state).await;
        let cookie = login(&app).await;

        let req = test::TestRequest::post()
            .uri("/add-blog")
            .insert_header((header::ACCEPT, "application/json"))
            .cookie(cookie.clone())
            .set_json(json!({
                "title": "A",
                "content": "B",
                "image": "https://img.example.com/keep.jpg"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let created: BlogMutationResponse = test::read_body_json(resp).await;
        let id = created.blog.id;

        let req = test::TestRequest::post()
            .uri(&format!("/edit-blog/{id}"))
            .insert_header((header::ACCEPT, "application/json"))
            .cookie(cookie)
            .set_json(json!({"title": "A2", "content": "B2"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let edited: BlogMutationResponse = test::read_body_json(resp).await;
        assert_eq!(edited.blog.image_url, "https://img.example.com/keep.jpg");
    }

    #[actix_web::test]
    async fn malformed_id_is_a_client_error() {
        let (state, _media) = state_with_media();
        let app = spawn_app(state).await;
        let cookie = login(&app).await;

        let req = test::TestRequest::post()
            .uri("/delete-blog/not-a-uuid")
            .insert_header((header::ACCEPT, "application/json"))
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }
}

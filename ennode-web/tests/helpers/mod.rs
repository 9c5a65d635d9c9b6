//! Test helpers: stub content backend and request utilities
//!
//! The stub is a real axum server bound to an ephemeral localhost port, so
//! the site's reqwest client is exercised end to end. Every request the stub
//! receives is recorded for assertions.

#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use ennode_common::config::SiteConfig;
use ennode_web::{build_router, AppState};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One request as seen by the stub backend
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub accept_language: Option<String>,
    pub content_type: Option<String>,
    pub query: HashMap<String, String>,
    pub body: Bytes,
}

#[derive(Clone, Default)]
pub struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubState {
    fn record(&self, path: &str, headers: &HeaderMap, query: HashMap<String, String>, body: Bytes) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            path: path.to_string(),
            accept_language: header("accept-language"),
            content_type: header("content-type"),
            query,
            body,
        });
    }

    /// Requests received so far whose path starts with `prefix`
    pub fn requests_to(&self, prefix: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path.starts_with(prefix))
            .cloned()
            .collect()
    }
}

fn tag(id: i64, en: &str, ko: &str) -> Value {
    json!({ "id": id, "name": { "en": en, "ko": ko } })
}

fn work(id: i64, slug: &str, title: &str, tags: Vec<Value>, video: Option<&str>) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "title": title,
        "description": format!("{} description", title),
        "tags": tags,
        "attachment_url": format!("https://cdn.test/{}.jpg", slug),
        "optimize_attachment_url": format!("https://cdn.test/{}.webp", slug),
        "link_video": video,
        "video_link": null,
        "category": { "id": 1, "slug": "image", "title": { "en": "Image", "ko": "이미지" }, "description": "" }
    })
}

pub fn categories() -> Value {
    json!({ "data": [
        { "id": 1, "slug": "image", "title": { "en": "Image", "ko": "이미지" }, "description": "Still renders" },
        { "id": 2, "slug": "cinematic", "title": { "en": "Cinematic", "ko": "영상" }, "description": "Films" }
    ]})
}

/// Portfolio fixture: two Tropical House variants, one S-Factory, one
/// misspelled Dongdaemun entry, and a video work
pub fn works() -> Value {
    json!({ "data": [
        work(1, "tropical-house", "Tropical House", vec![tag(1, "Exterior", "외관")], None),
        work(2, "tropical-house-2", "Tropical House-2", vec![tag(2, "Interior", "실내")], None),
        work(3, "s-factory", "S-Factory", vec![], None),
        work(4, "ddp", "Dongdeamun Design Plaza", vec![tag(3, "Aerial", "조감도")], None),
        work(5, "ddp-film", "Dongdaemun Design Plaza 2", vec![], Some("https://vimeo.com/42")),
        work(6, "tropical-house-3", "Tropical House 3", vec![], None)
    ]})
}

fn news_items(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| json!({ "id": i, "slug": format!("post-{}", i), "title": format!("Post {}", i) }))
        .collect()
}

async fn list(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    request_path: axum::extract::OriginalUri,
) -> Response {
    let path = request_path.0.path().to_string();
    stub.record(&path, &headers, query, Bytes::new());

    let body = match path.as_str() {
        "/public/attachments" => json!({ "data": [{ "group": "banner", "url": "https://cdn.test/banner.jpg" }] }),
        "/public/clients" => json!({ "data": [{ "id": 1, "name": "Samsung C&T", "logo": "https://cdn.test/c1.png" }] }),
        "/public/employees" => json!({ "data": [{ "id": 1, "name": "Lee", "position": "CEO" }] }),
        "/public/categories" => categories(),
        "/public/tags" => json!({ "data": [tag(1, "Exterior", "외관"), tag(2, "Interior", "실내"), tag(3, "Aerial", "조감도")] }),
        "/public/works" => works(),
        "/public/posts" => json!({ "data": news_items(6), "meta": { "total": 14 } }),
        "/public/platforms" => json!({ "data": [{ "id": 1, "name": "Vimeo", "url": "https://vimeo.com/ennode" }] }),
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    Json(body).into_response()
}

async fn work_by_slug(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    stub.record(&format!("/public/works/{}", slug), &headers, HashMap::new(), Bytes::new());

    if slug == "tropical-house" {
        let data = works()["data"][0].clone();
        return Json(json!({ "data": data })).into_response();
    }
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Work not found" }))).into_response()
}

async fn post_by_slug(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    stub.record(&format!("/public/posts/{}", slug), &headers, HashMap::new(), Bytes::new());

    if slug == "opening" {
        return Json(json!({ "data": { "id": 9, "slug": "opening", "title": "Studio opening" } }))
            .into_response();
    }
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Post not found" }))).into_response()
}

/// Contact endpoint; the submitted `name` selects the backend behavior
async fn send_contact(State(stub): State<StubState>, headers: HeaderMap, body: Bytes) -> Response {
    stub.record("/public/mails/send-contact", &headers, HashMap::new(), body.clone());

    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    match payload["name"].as_str().unwrap_or_default() {
        "invalid" => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "message": "The email field must be a valid email address.",
                "errors": { "email": ["The email field must be a valid email address."] }
            })),
        )
            .into_response(),
        "throttle" => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "message": "Too Many Attempts." })),
        )
            .into_response(),
        "crash" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Server Error" })),
        )
            .into_response(),
        "teapot" => StatusCode::IM_A_TEAPOT.into_response(),
        _ => Json(json!({ "message": "sent" })).into_response(),
    }
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

/// CV endpoint; a field value of `throttle` or `invalid` selects the failure
async fn send_cv(State(stub): State<StubState>, headers: HeaderMap, body: Bytes) -> Response {
    stub.record("/public/mails/send-cv", &headers, HashMap::new(), body.clone());

    if contains(&body, "throttle") {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "message": "Too Many Attempts." })),
        )
            .into_response();
    }
    if contains(&body, "invalid") {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "message": "The cv field must be a file of type: pdf.",
                "errors": { "cv": ["The cv field must be a file of type: pdf."] }
            })),
        )
            .into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

/// Start the stub backend and return its base URL and recorder
pub async fn start_stub_backend() -> (String, StubState) {
    let stub = StubState::default();

    let app = Router::new()
        .route("/public/attachments", get(list))
        .route("/public/clients", get(list))
        .route("/public/employees", get(list))
        .route("/public/categories", get(list))
        .route("/public/tags", get(list))
        .route("/public/works", get(list))
        .route("/public/works/:slug", get(work_by_slug))
        .route("/public/posts", get(list))
        .route("/public/posts/:slug", get(post_by_slug))
        .route("/public/platforms", get(list))
        .route("/public/mails/send-contact", post(send_contact))
        .route(
            "/public/mails/send-cv",
            post(send_cv).layer(DefaultBodyLimit::disable()),
        )
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind stub backend");
    let addr = listener.local_addr().expect("Should have local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub backend failed");
    });

    (format!("http://{}", addr), stub)
}

/// Site router wired to `base_url`
pub fn setup_app(base_url: &str) -> Router {
    app_with_config(base_url, |_| {})
}

fn app_with_config(base_url: &str, configure: impl FnOnce(&mut SiteConfig)) -> Router {
    let mut config = SiteConfig {
        base_api_url: base_url.to_string(),
        ..Default::default()
    };
    configure(&mut config);
    build_router(AppState::new(config).expect("Should build client"))
}

/// Site router wired to a fresh stub backend
pub async fn setup() -> (Router, StubState) {
    setup_with(|_| {}).await
}

/// Like [`setup`], with configuration adjusted by `configure`
pub async fn setup_with(configure: impl FnOnce(&mut SiteConfig)) -> (Router, StubState) {
    let (base_url, stub) = start_stub_backend().await;
    (app_with_config(&base_url, configure), stub)
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn form_request(uri: &str, body: &str, json_caller: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded");
    if json_caller {
        builder = builder.header("accept", "application/json");
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Extract JSON body from response
pub async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

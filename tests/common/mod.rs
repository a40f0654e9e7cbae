//! Shared harness for integration tests.
//!
//! Builds the real router over the in-memory adapters, so tests drive the
//! full HTTP surface without Postgres or SMTP and can assert on persisted
//! state through the store handle.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use classyfyed::config::cors::CorsConfig;
use classyfyed::config::jwt::JwtConfig;
use classyfyed::modules::colleges::model::College;
use classyfyed::modules::users::model::{Role, User};
use classyfyed::router::init_router;
use classyfyed::state::AppState;
use classyfyed::store::memory::MemoryStore;
use classyfyed::utils::email::RecordingMailer;
use classyfyed::utils::file_storage::MemoryFileStorage;
use classyfyed::utils::jwt::create_access_token;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub files: Arc<MemoryFileStorage>,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn build_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let mailer = Arc::new(RecordingMailer::new());
    let files = Arc::new(MemoryFileStorage::new());

    let state = AppState {
        store: store.clone(),
        mailer: mailer.clone(),
        files: files.clone(),
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    };

    TestApp {
        router: init_router(state),
        store,
        mailer,
        files,
    }
}

pub fn mit_college() -> College {
    let now = Utc::now();
    College {
        id: Uuid::new_v4(),
        name: "Massachusetts Institute of Technology".to_string(),
        short_code: "MIT".to_string(),
        email_extensions: vec!["mit.edu".to_string()],
        created_at: now,
        updated_at: now,
    }
}

/// Seed a verified actor and mint a token for them.
pub fn seed_actor(app: &TestApp, email: &str, role: Role) -> String {
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: "$2b$12$not-a-real-hash".to_string(),
        first_name: "Seeded".to_string(),
        last_name: "Actor".to_string(),
        role,
        college: "MIT".to_string(),
        verified: true,
        verification_data: None,
        register_otp: None,
        last_otp: None,
        created_at: now,
        updated_at: now,
    };
    let token = create_access_token(user.id, role, &test_jwt_config()).unwrap();
    app.store.seed_user(user);
    token
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn post_json(app: &TestApp, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn request_with_auth(
    app: &TestApp,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

pub async fn get(app: &TestApp, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Register through the API and return the OTP persisted for the user.
pub async fn register_user(app: &TestApp, email: &str, college: &str) -> String {
    let (status, _) = post_json(
        app,
        "/api/register",
        json!({
            "email": email,
            "password": "hunter2hunter2",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "student",
            "college": college,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    app.store.user_snapshot(email).unwrap().register_otp.unwrap()
}

/// Build a `multipart/form-data` body for the ID upload endpoint.
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, file_name, content)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: &TestApp, path: &str, body: Vec<u8>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=test-boundary",
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use fitlog::config::Config;
use fitlog::db::{Db, FirestoreStore};
use fitlog::middleware::auth::{create_session_token, SESSION_COOKIE};
use fitlog::models::{user_id_for_email, User};
use fitlog::routes::create_router;
use fitlog::services::GoogleSignIn;
use fitlog::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection (emulator).
#[allow(dead_code)]
pub async fn test_db() -> FirestoreStore {
    FirestoreStore::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Build an app around explicit dependencies.
#[allow(dead_code)]
pub fn create_test_app_with(
    config: Config,
    db: Db,
    google: Option<GoogleSignIn>,
) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState { config, db, google });
    (create_router(state.clone()), state)
}

/// Create a test app backed by the in-memory store, Google sign-in disabled.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default(), Db::in_memory(), None)
}

/// Create a test app whose every storage call fails.
#[allow(dead_code)]
pub fn create_offline_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default(), Db::offline(), None)
}

/// Store a user with the given email.
#[allow(dead_code)]
pub async fn seed_user(state: &AppState, email: &str) -> User {
    let user = User {
        id: user_id_for_email(email),
        email: email.to_string(),
        name: email.split('@').next().unwrap_or_default().to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        last_sign_in_at: "2024-01-01T00:00:00Z".to_string(),
    };
    state.db.upsert_user(&user).await.unwrap();
    user
}

/// Mint a session token for `email`.
#[allow(dead_code)]
pub fn session_token(state: &AppState, email: &str) -> String {
    create_session_token(email, None, &state.config.session_signing_key).unwrap()
}

/// Cookie header value carrying a session token.
#[allow(dead_code)]
pub fn session_cookie_header(token: &str) -> String {
    format!("{}={}", SESSION_COOKIE, token)
}

/// GET request, optionally authenticated with a bearer token.
#[allow(dead_code)]
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// DELETE request, optionally authenticated with a bearer token.
#[allow(dead_code)]
pub fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// POST a JSON body, optionally authenticated with a bearer token.
#[allow(dead_code)]
pub fn post_json(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as text.
#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

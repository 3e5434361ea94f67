// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth cookie attribute tests.
//!
//! These tests verify cookie removal attributes on logout match the creation
//! attributes for localhost and https deployments.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use fitlog::config::Config;
use fitlog::db::Db;
use tower::ServiceExt;

mod common;

fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

fn find_cookie(headers: &[String], name: &str) -> String {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for {name}: {headers:?}"))
}

fn logout_request(cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/auth/logout");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_logout_cookie_removal_localhost_attributes() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(logout_request(Some("fitlog_session=test")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let set_cookies = set_cookie_headers(&response);
    let session_cookie = find_cookie(&set_cookies, "fitlog_session");

    assert!(session_cookie.starts_with("fitlog_session=;"));
    assert!(session_cookie.contains("Max-Age=0"));
    assert!(session_cookie.contains("HttpOnly"));
    assert!(session_cookie.contains("SameSite=Lax"));
    assert!(session_cookie.contains("Path=/"));
    assert!(!session_cookie.contains("Secure"));
}

#[tokio::test]
async fn test_logout_without_cookie_still_clears() {
    let (app, _) = common::create_test_app();

    let response = app.oneshot(logout_request(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let session_cookie = find_cookie(&set_cookie_headers(&response), "fitlog_session");
    assert!(session_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_cookie_removal_https_attributes() {
    let config = Config {
        public_url: "https://fitlog.example.com".to_string(),
        ..Config::test_default()
    };
    let (app, _) = common::create_test_app_with(config, Db::in_memory(), None);

    let response = app
        .oneshot(logout_request(Some("fitlog_session=test")))
        .await
        .unwrap();

    let session_cookie = find_cookie(&set_cookie_headers(&response), "fitlog_session");
    assert!(session_cookie.contains("Secure"));
    assert!(session_cookie.contains("HttpOnly"));
    assert!(session_cookie.contains("Max-Age=0"));
}

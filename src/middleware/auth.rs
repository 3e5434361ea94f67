// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token authentication.
//!
//! A session is an HS256 JWT whose subject is the user's email. It travels in
//! the `fitlog_session` cookie, or in an `Authorization: Bearer` header for
//! API clients.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "fitlog_session";

/// Session lifetime.
pub const SESSION_TTL_DAYS: i64 = 30;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Display name at sign-in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from the session token.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub email: String,
    pub name: Option<String>,
}

/// Create a session token for a signed-in user.
pub fn create_session_token(
    email: &str,
    name: Option<&str>,
    signing_key: &[u8],
) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: email.to_string(),
        name: name.map(str::to_string),
        iat: now,
        exp: now + (SESSION_TTL_DAYS as usize) * 24 * 60 * 60,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Decode a session token; invalid, expired or malformed tokens yield `None`.
pub fn decode_session_token(token: &str, signing_key: &[u8]) -> Option<SessionUser> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let claims = decode::<Claims>(token, &key, &validation).ok()?.claims;
    if claims.sub.is_empty() {
        return None;
    }

    Some(SessionUser {
        email: claims.sub,
        name: claims.name,
    })
}

/// Find and verify the session carried by a request's headers.
///
/// The cookie is checked first, then the bearer header.
pub fn session_from_headers(headers: &HeaderMap, signing_key: &[u8]) -> Option<SessionUser> {
    let jar = CookieJar::from_headers(headers);
    if let Some(session) = jar
        .get(SESSION_COOKIE)
        .and_then(|c| decode_session_token(c.value(), signing_key))
    {
        return Some(session);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .and_then(|token| decode_session_token(token, signing_key))
}

/// Middleware that requires a valid session.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = session_from_headers(request.headers(), &state.config.session_signing_key)
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(secure)
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Cookie that clears the session in the browser.
///
/// Attributes match `session_cookie` so the browser replaces it.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(secure)
        .max_age(time::Duration::ZERO)
        .build()
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google sign-in routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_session_token, removal_cookie, session_cookie};
use crate::middleware::route_guard::SIGN_IN_PATH;
use crate::services::accounts::sign_in_user;
use crate::views::pages::sign_in_page;
use crate::AppState;

type HmacSha256 = Hmac<Sha256>;

/// OAuth state older than this is rejected.
const STATE_MAX_AGE_MS: u128 = 10 * 60 * 1000;
/// Tolerated clock difference for state timestamps from the future.
const STATE_FUTURE_SKEW_MS: u128 = 60 * 1000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signin", get(sign_in))
        .route("/auth/google", get(google_start))
        .route("/auth/google/callback", get(google_callback))
        .route("/auth/logout", post(logout))
}

/// Only same-origin relative paths are honored as post-sign-in targets.
pub fn sanitize_redirect(raw: Option<&str>) -> String {
    match raw {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

#[derive(Deserialize)]
pub struct SignInParams {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    redirect_to: Option<String>,
}

async fn sign_in(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SignInParams>,
) -> Html<String> {
    let redirect_to = sanitize_redirect(params.redirect_to.as_deref());
    Html(sign_in_page(
        state.google.is_some(),
        &redirect_to,
        params.error.as_deref(),
    ))
}

#[derive(Deserialize)]
pub struct AuthStartParams {
    #[serde(default)]
    redirect_to: Option<String>,
}

/// Start OAuth flow - redirect to Google's consent screen.
async fn google_start(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuthStartParams>,
) -> Result<Redirect> {
    let google = state
        .google
        .as_ref()
        .ok_or_else(|| AppError::ProviderUnavailable("google".to_string()))?;

    let redirect_to = sanitize_redirect(params.redirect_to.as_deref());
    let oauth_state = sign_state(&redirect_to, &state.config.oauth_state_key, now_millis()?)?;
    let auth_url = google
        .oauth
        .authorize_url(&state.config.google_callback_url(), &oauth_state);

    tracing::info!(
        client_id = %google.oauth.client_id(),
        redirect_to = %redirect_to,
        "Starting OAuth flow, redirecting to Google"
    );

    Ok(Redirect::temporary(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn sign_in_failure(code: &str) -> Response {
    Redirect::to(&format!("{}?error={}", SIGN_IN_PATH, code)).into_response()
}

/// OAuth callback - exchange code, verify identity, start a session.
///
/// Failures come back to the sign-in page with an `error` code.
async fn google_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    let Some(google) = state.google.as_ref() else {
        tracing::warn!("OAuth callback with Google sign-in disabled");
        return sign_in_failure("Configuration");
    };

    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Google");
        return sign_in_failure("AccessDenied");
    }

    let now = match now_millis() {
        Ok(now) => now,
        Err(e) => {
            tracing::error!(error = %e, "Clock unavailable");
            return sign_in_failure("Callback");
        }
    };

    let Some(redirect_to) = params
        .state
        .as_deref()
        .and_then(|s| verify_state(s, &state.config.oauth_state_key, now))
    else {
        tracing::warn!("Invalid, expired or tampered OAuth state parameter");
        return sign_in_failure("InvalidState");
    };

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        tracing::warn!("OAuth callback without authorization code");
        return sign_in_failure("OAuthCallback");
    };

    tracing::info!("Exchanging authorization code for tokens");

    let identity = match google
        .complete(&code, &state.config.google_callback_url())
        .await
    {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(error = %e, "Google sign-in failed");
            return sign_in_failure("OAuthCallback");
        }
    };

    let user = match sign_in_user(&state.db, &identity).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, email = %identity.email, "Failed to store user");
            return sign_in_failure("Callback");
        }
    };

    let name = Some(user.name.as_str()).filter(|n| !n.is_empty());
    let token = match create_session_token(&user.email, name, &state.config.session_signing_key) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "Session token creation failed");
            return sign_in_failure("Callback");
        }
    };

    tracing::info!(user_id = %user.id, "Sign-in successful");

    let jar = jar.add(session_cookie(token, state.config.cookie_secure()));
    (jar, Redirect::to(&redirect_to)).into_response()
}

/// Clear the session cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    // Added explicitly: the jar only emits removals for cookies it received.
    let jar = jar.add(removal_cookie(state.config.cookie_secure()));
    (jar, StatusCode::NO_CONTENT)
}

fn now_millis() -> Result<u128> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis())
}

fn state_mac(payload: &str, secret: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Encode `redirect|timestamp_hex|signature_hex` as the OAuth `state`.
pub fn sign_state(redirect_to: &str, secret: &[u8], now_ms: u128) -> Result<String> {
    let payload = format!("{}|{:x}", redirect_to, now_ms);
    let signature = state_mac(&payload, secret)?;
    let signed = format!("{}|{}", payload, hex::encode(signature));
    Ok(URL_SAFE_NO_PAD.encode(signed.as_bytes()))
}

/// Verify the OAuth `state` and return its redirect target.
///
/// Fails on a bad signature, a malformed value, or an age above ten minutes.
pub fn verify_state(state: &str, secret: &[u8], now_ms: u128) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
    let state_str = String::from_utf8(bytes).ok()?;

    // The redirect path may itself contain '|', so split from the right.
    let mut parts = state_str.rsplitn(3, '|');
    let signature_hex = parts.next()?;
    let timestamp_hex = parts.next()?;
    let redirect_to = parts.next()?;

    let payload = format!("{}|{}", redirect_to, timestamp_hex);
    let expected = state_mac(&payload, secret).ok()?;
    let provided = hex::decode(signature_hex).ok()?;

    if !bool::from(expected.ct_eq(&provided)) {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return None;
    }

    let issued_ms = u128::from_str_radix(timestamp_hex, 16).ok()?;
    if issued_ms > now_ms + STATE_FUTURE_SKEW_MS || now_ms.saturating_sub(issued_ms) > STATE_MAX_AGE_MS
    {
        tracing::warn!("OAuth state expired");
        return None;
    }

    Some(sanitize_redirect(Some(redirect_to)))
}

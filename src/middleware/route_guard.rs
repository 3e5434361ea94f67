// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Redirect unauthenticated page navigation to the sign-in page.

use crate::middleware::auth::{session_from_headers, SessionUser};
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// Path prefixes that need a session.
pub const PROTECTED_PREFIXES: [&str; 2] = ["/workouts", "/food"];

/// Where unauthenticated visitors are sent.
pub const SIGN_IN_PATH: &str = "/auth/signin";

pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Attach `Option<SessionUser>` to the request; redirect protected paths
/// without a session.
pub async fn guard_pages(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let session: Option<SessionUser> =
        session_from_headers(request.headers(), &state.config.session_signing_key);

    if session.is_none() && is_protected(request.uri().path()) {
        tracing::debug!(path = %request.uri().path(), "Redirecting unauthenticated request");
        return Redirect::to(SIGN_IN_PATH).into_response();
    }

    request.extensions_mut().insert(session);
    next.run(request).await
}

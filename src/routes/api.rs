// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{FailedExt, Result};
use crate::middleware::auth::SessionUser;
use crate::models::{Food, Workout};
use crate::routes::{food, workouts};
use crate::services::dashboard::{build_dashboard, Dashboard};
use crate::services::entries::resolve_user;
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require a session).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/dashboard", get(get_dashboard))
        .merge(food::routes())
        .merge(workouts::routes())
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<UserResponse>> {
    let user = resolve_user(&state.db, &session)
        .await
        .or_failed("fetch user")?;

    Ok(Json(UserResponse {
        id: user.id,
        email: user.email,
        name: user.name,
    }))
}

// ─── Dashboard ───────────────────────────────────────────────

/// Calories and workout minutes for the last seven days.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<Dashboard>> {
    let user = resolve_user(&state.db, &session)
        .await
        .or_failed("load dashboard")?;

    let foods = state
        .db
        .list_entries::<Food>(&user.id)
        .await
        .or_failed("load dashboard")?;
    let workouts = state
        .db
        .list_entries::<Workout>(&user.id)
        .await
        .or_failed("load dashboard")?;

    Ok(Json(build_dashboard(&foods, &workouts, today_utc())))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML pages and their static assets.
//!
//! The route guard runs in front of these handlers and attaches the
//! (optional) session.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Extension, Router,
};
use chrono::Utc;
use std::sync::Arc;

use crate::error::{FailedExt, Result};
use crate::middleware::auth::SessionUser;
use crate::models::{Food, User, Workout};
use crate::services::dashboard::build_dashboard;
use crate::services::history::{group_by_date, recent_workouts};
use crate::time_utils::{format_entry_date, today_utc};
use crate::views::pages::{food_page, home_page, workouts_page};
use crate::AppState;

const APP_JS: &str = include_str!("../../assets/app.js");
const APP_CSS: &str = include_str!("../../assets/app.css");

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/food", get(food))
        .route("/workouts", get(workouts))
        .route("/assets/app.js", get(app_js))
        .route("/assets/app.css", get(app_css))
}

/// A session whose user row does not exist yet renders as an empty log.
async fn session_owner(state: &AppState, session: Option<&SessionUser>) -> Result<Option<User>> {
    match session {
        Some(session) => state.db.find_user_by_email(&session.email).await,
        None => Ok(None),
    }
}

async fn home(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Option<SessionUser>>,
) -> Result<Html<String>> {
    let today = today_utc();

    let (foods, workouts) = match session_owner(&state, session.as_ref())
        .await
        .or_failed("load dashboard")?
    {
        Some(user) => (
            state
                .db
                .list_entries::<Food>(&user.id)
                .await
                .or_failed("load dashboard")?,
            state
                .db
                .list_entries::<Workout>(&user.id)
                .await
                .or_failed("load dashboard")?,
        ),
        None => (Vec::new(), Vec::new()),
    };

    let dashboard = build_dashboard(&foods, &workouts, today);
    Ok(Html(home_page(&dashboard, session.as_ref())))
}

async fn food(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Option<SessionUser>>,
) -> Result<Html<String>> {
    let foods = match session_owner(&state, session.as_ref())
        .await
        .or_failed("fetch foods")?
    {
        Some(user) => state
            .db
            .list_entries::<Food>(&user.id)
            .await
            .or_failed("fetch foods")?,
        None => Vec::new(),
    };

    let groups = group_by_date(foods);
    let today = format_entry_date(today_utc());
    Ok(Html(food_page(&groups, &today, session.as_ref())))
}

async fn workouts(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Option<SessionUser>>,
) -> Result<Html<String>> {
    let all = match session_owner(&state, session.as_ref())
        .await
        .or_failed("fetch workouts")?
    {
        Some(user) => state
            .db
            .list_entries::<Workout>(&user.id)
            .await
            .or_failed("fetch workouts")?,
        None => Vec::new(),
    };

    let recent = recent_workouts(all, Utc::now());
    let today = format_entry_date(today_utc());
    Ok(Html(workouts_page(&recent, &today, session.as_ref())))
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        APP_JS,
    )
}

async fn app_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], APP_CSS)
}

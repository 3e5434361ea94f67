// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout REST handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use std::sync::Arc;

use crate::error::{FailedExt, Result};
use crate::middleware::auth::SessionUser;
use crate::models::{CreateWorkoutRequest, Workout};
use crate::routes::extract::ValidatedJson;
use crate::routes::SuccessResponse;
use crate::services::entries::{delete_owned_entry, resolve_user};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route("/api/workouts/{id}", delete(delete_workout))
}

async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<Vec<Workout>>> {
    let user = resolve_user(&state.db, &session)
        .await
        .or_failed("fetch workouts")?;

    let workouts = state
        .db
        .list_entries::<Workout>(&user.id)
        .await
        .or_failed("fetch workouts")?;

    Ok(Json(workouts))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    ValidatedJson(body): ValidatedJson<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<Workout>)> {
    let user = resolve_user(&state.db, &session)
        .await
        .or_failed("create workout")?;

    let workout = body.into_workout(&user.id)?;
    state
        .db
        .insert_entry(&workout)
        .await
        .or_failed("create workout")?;

    tracing::info!(
        user_id = %user.id,
        workout_id = %workout.id,
        date = %workout.date,
        duration = workout.duration,
        "Created workout"
    );

    Ok((StatusCode::CREATED, Json(workout)))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    delete_owned_entry::<Workout>(&state.db, &session, &id)
        .await
        .or_failed("delete workout")?;

    Ok(Json(SuccessResponse { success: true }))
}

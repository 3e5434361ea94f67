// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food-intake REST handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use std::sync::Arc;

use crate::error::{FailedExt, Result};
use crate::middleware::auth::SessionUser;
use crate::models::{CreateFoodRequest, Food};
use crate::routes::extract::ValidatedJson;
use crate::routes::SuccessResponse;
use crate::services::entries::{delete_owned_entry, resolve_user};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/food", get(list_food).post(create_food))
        .route("/api/food/{id}", delete(delete_food))
}

/// All of the caller's food entries, newest date first.
async fn list_food(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
) -> Result<Json<Vec<Food>>> {
    let user = resolve_user(&state.db, &session)
        .await
        .or_failed("fetch foods")?;

    let foods = state
        .db
        .list_entries::<Food>(&user.id)
        .await
        .or_failed("fetch foods")?;

    Ok(Json(foods))
}

async fn create_food(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    ValidatedJson(body): ValidatedJson<CreateFoodRequest>,
) -> Result<(StatusCode, Json<Food>)> {
    let user = resolve_user(&state.db, &session)
        .await
        .or_failed("create food")?;

    let food = body.into_food(&user.id)?;
    state
        .db
        .insert_entry(&food)
        .await
        .or_failed("create food")?;

    tracing::info!(
        user_id = %user.id,
        food_id = %food.id,
        date = %food.date,
        calories = food.calories,
        "Created food entry"
    );

    Ok((StatusCode::CREATED, Json(food)))
}

async fn delete_food(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionUser>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    delete_owned_entry::<Food>(&state.db, &session, &id)
        .await
        .or_failed("delete food")?;

    Ok(Json(SuccessResponse { success: true }))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API tests.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_create_with_and_without_notes() {
    let (app, state) = common::create_test_app();
    let alice = common::seed_user(&state, "alice@example.com").await;
    let token = common::session_token(&state, "alice@example.com");

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/workouts",
            Some(&token),
            json!({"date": "2024-03-01", "title": "Run", "duration": 30, "notes": "Easy pace"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let with_notes = common::body_json(response).await;
    assert_eq!(with_notes["userId"], alice.id);
    assert_eq!(with_notes["notes"], "Easy pace");
    assert_eq!(with_notes["duration"], 30);

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/workouts",
            Some(&token),
            json!({"date": "2024-03-02", "title": "Swim", "duration": "45"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let without_notes = common::body_json(response).await;
    assert!(without_notes.get("notes").is_none());
    assert_eq!(without_notes["duration"], 45);

    let response = app
        .oneshot(common::get("/api/workouts", Some(&token)))
        .await
        .unwrap();
    assert_eq!(
        common::body_json(response).await,
        json!([without_notes, with_notes])
    );
}

#[tokio::test]
async fn test_required_fields_match_food_policy() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "alice@example.com").await;
    let token = common::session_token(&state, "alice@example.com");

    for body in [
        json!({"title": "Run", "duration": 30}),
        json!({"date": "2024-03-01", "duration": 30}),
        json!({"date": "2024-03-01", "title": "Run"}),
        json!({"date": "2024-03-01", "title": "  ", "duration": 30, "notes": "x"}),
    ] {
        let response = app
            .clone()
            .oneshot(common::post_json("/api/workouts", Some(&token), body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(
            common::body_json(response).await,
            json!({"error": "Missing required fields"}),
            "{body}"
        );
    }

    let response = app
        .oneshot(common::post_json(
            "/api/workouts",
            Some(&token),
            json!({"date": "2024-03-01", "title": "Run", "duration": 2.5}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_ownership() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "alice@example.com").await;
    common::seed_user(&state, "bob@example.com").await;
    let alice_token = common::session_token(&state, "alice@example.com");
    let bob_token = common::session_token(&state, "bob@example.com");

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/workouts",
            Some(&alice_token),
            json!({"date": "2024-03-01", "title": "Run", "duration": 30}),
        ))
        .await
        .unwrap();
    let id = common::body_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let uri = format!("/api/workouts/{id}");

    let response = app
        .clone()
        .oneshot(common::delete(&uri, Some(&bob_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        common::body_json(response).await,
        json!({"error": "Unauthorized"})
    );

    let response = app
        .clone()
        .oneshot(common::delete(&uri, Some(&alice_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await, json!({"success": true}));

    // Gone now
    let response = app
        .oneshot(common::delete(&uri, Some(&alice_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        common::body_json(response).await,
        json!({"error": "Workout not found"})
    );
}

#[tokio::test]
async fn test_food_id_is_not_a_workout() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "alice@example.com").await;
    let token = common::session_token(&state, "alice@example.com");

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/food",
            Some(&token),
            json!({"date": "2024-03-01", "name": "Apple", "calories": 95}),
        ))
        .await
        .unwrap();
    let id = common::body_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .oneshot(common::delete(&format!("/api/workouts/{id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

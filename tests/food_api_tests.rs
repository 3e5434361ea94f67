// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food API tests: creation, validation, listing and ownership.

use axum::http::StatusCode;
use fitlog::models::Food;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_create_is_owned_by_caller_and_invisible_to_others() {
    let (app, state) = common::create_test_app();
    let alice = common::seed_user(&state, "alice@example.com").await;
    common::seed_user(&state, "bob@example.com").await;
    let alice_token = common::session_token(&state, "alice@example.com");
    let bob_token = common::session_token(&state, "bob@example.com");

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/food",
            Some(&alice_token),
            json!({"date": "2024-01-01", "name": "Apple", "calories": 95}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = common::body_json(response).await;
    assert_eq!(created["userId"], alice.id);
    assert_eq!(created["date"], "2024-01-01");
    assert_eq!(created["name"], "Apple");
    assert_eq!(created["calories"], 95);
    assert!(created["id"].as_str().is_some_and(|id| !id.is_empty()));

    let response = app
        .clone()
        .oneshot(common::get("/api/food", Some(&bob_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await, json!([]));

    let response = app
        .oneshot(common::get("/api/food", Some(&alice_token)))
        .await
        .unwrap();
    let listed = common::body_json(response).await;
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn test_list_is_newest_date_first() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "alice@example.com").await;
    let token = common::session_token(&state, "alice@example.com");

    for (date, name) in [
        ("2024-01-02", "Lunch"),
        ("2024-01-05", "Dinner"),
        ("2024-01-02", "Snack"),
        ("2023-12-31", "Cake"),
    ] {
        let response = app
            .clone()
            .oneshot(common::post_json(
                "/api/food",
                Some(&token),
                json!({"date": date, "name": name, "calories": 100}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(common::get("/api/food", Some(&token)))
        .await
        .unwrap();
    let foods: Vec<Food> = serde_json::from_value(common::body_json(response).await).unwrap();

    let names: Vec<&str> = foods.iter().map(|f| f.name.as_str()).collect();
    // Same-day entries: the later insert comes first
    assert_eq!(names, vec!["Dinner", "Snack", "Lunch", "Cake"]);
}

#[tokio::test]
async fn test_missing_or_empty_fields_rejected() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "alice@example.com").await;
    let token = common::session_token(&state, "alice@example.com");

    let bodies = [
        json!({"date": "2024-01-01", "calories": 95}),
        json!({"date": "2024-01-01", "name": "", "calories": 95}),
        json!({"date": "", "name": "Apple", "calories": 95}),
        json!({"date": "2024-01-01", "name": "Apple"}),
        json!({"date": "2024-01-01", "name": "Apple", "calories": ""}),
        json!({}),
    ];

    for body in bodies {
        let response = app
            .clone()
            .oneshot(common::post_json("/api/food", Some(&token), body.clone()))
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
        .oneshot(common::get("/api/food", Some(&token)))
        .await
        .unwrap();
    assert_eq!(common::body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_malformed_values_rejected() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "alice@example.com").await;
    let token = common::session_token(&state, "alice@example.com");

    let bodies = [
        json!({"date": "2024-01-01", "name": "Apple", "calories": "lots"}),
        json!({"date": "2024-01-01", "name": "Apple", "calories": -5}),
        json!({"date": "01/01/2024", "name": "Apple", "calories": 95}),
        json!({"date": "2024-01-01", "name": "Apple", "calories": 95, "userId": "x"}),
        json!({"date": "2024-01-01", "name": 42, "calories": 95}),
    ];

    for body in bodies {
        let response = app
            .clone()
            .oneshot(common::post_json("/api/food", Some(&token), body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        let error = common::body_json(response).await;
        assert!(error["error"].is_string(), "{body}");
    }
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "alice@example.com").await;
    let token = common::session_token(&state, "alice@example.com");

    // Past the default 2 MB body limit
    let body = json!({"date": "2024-01-01", "name": "x".repeat(3 * 1024 * 1024), "calories": 95});
    let response = app
        .clone()
        .oneshot(common::post_json("/api/food", Some(&token), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(common::body_json(response).await["error"].is_string());

    let response = app
        .oneshot(common::get("/api/food", Some(&token)))
        .await
        .unwrap();
    assert_eq!(common::body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_numeric_string_calories_coerced() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "alice@example.com").await;
    let token = common::session_token(&state, "alice@example.com");

    let response = app
        .oneshot(common::post_json(
            "/api/food",
            Some(&token),
            json!({"date": "2024-01-01", "name": "Toast", "calories": "120"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(common::body_json(response).await["calories"], 120);
}

#[tokio::test]
async fn test_delete_own_entry() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "alice@example.com").await;
    let token = common::session_token(&state, "alice@example.com");

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/food",
            Some(&token),
            json!({"date": "2024-01-01", "name": "Apple", "calories": 95}),
        ))
        .await
        .unwrap();
    let id = common::body_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(common::delete(&format!("/api/food/{id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await, json!({"success": true}));

    let response = app
        .oneshot(common::get("/api/food", Some(&token)))
        .await
        .unwrap();
    assert_eq!(common::body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_delete_someone_elses_entry_is_forbidden() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "alice@example.com").await;
    common::seed_user(&state, "bob@example.com").await;
    let alice_token = common::session_token(&state, "alice@example.com");
    let bob_token = common::session_token(&state, "bob@example.com");

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/food",
            Some(&alice_token),
            json!({"date": "2024-01-01", "name": "Apple", "calories": 95}),
        ))
        .await
        .unwrap();
    let id = common::body_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(common::delete(&format!("/api/food/{id}"), Some(&bob_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        common::body_json(response).await,
        json!({"error": "Unauthorized"})
    );

    // Still there for its owner
    let response = app
        .oneshot(common::get("/api/food", Some(&alice_token)))
        .await
        .unwrap();
    assert_eq!(
        common::body_json(response).await.as_array().unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_delete_missing_entry_is_not_found() {
    let (app, state) = common::create_test_app();
    common::seed_user(&state, "alice@example.com").await;
    let token = common::session_token(&state, "alice@example.com");

    let response = app
        .oneshot(common::delete("/api/food/does-not-exist", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        common::body_json(response).await,
        json!({"error": "Food entry not found"})
    );
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod fields;
pub mod food;
pub mod user;
pub mod workout;

pub use food::{CreateFoodRequest, Food};
pub use user::{user_id_for_email, User};
pub use workout::{CreateWorkoutRequest, Workout};

use serde::{de::DeserializeOwned, Serialize};

/// A dated record owned by a single user (food intake, workout).
pub trait Entry: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human-readable kind, used in not-found messages ("Food entry").
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn user_id(&self) -> &str;
    /// Calendar day as `YYYY-MM-DD`.
    fn date(&self) -> &str;
}

/// Generate a new entry ID.
///
/// UUIDv7 embeds the creation time, so ids sort in creation order.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Order entries newest day first; within a day, newest entry first.
pub fn sort_newest_first<T: Entry>(entries: &mut [T]) {
    entries.sort_by(|a, b| b.date().cmp(a.date()).then_with(|| b.id().cmp(a.id())));
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout session model and its create request.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::error::{AppError, MISSING_REQUIRED_FIELDS};
use crate::models::{fields, new_id, Entry};
use crate::time_utils::parse_entry_date;

/// Stored workout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    /// Calendar day (`YYYY-MM-DD`)
    pub date: String,
    pub title: String,
    /// Minutes
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(optional))]
    pub notes: Option<String>,
}

impl Entry for Workout {
    const KIND: &'static str = "Workout";

    fn id(&self) -> &str {
        &self.id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn date(&self) -> &str {
        &self.date
    }
}

/// Body of `POST /api/workouts`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateWorkoutRequest {
    #[serde(default, deserialize_with = "fields::non_empty_string")]
    #[validate(required)]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "fields::non_empty_string")]
    #[validate(required, length(max = 200))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "fields::lenient_count")]
    #[validate(required)]
    pub duration: Option<u32>,

    #[serde(default, deserialize_with = "fields::non_empty_string")]
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl CreateWorkoutRequest {
    /// Turn the request into a stored workout owned by `user_id`.
    pub fn into_workout(self, user_id: &str) -> Result<Workout, AppError> {
        let (Some(date), Some(title), Some(duration)) = (self.date, self.title, self.duration)
        else {
            return Err(AppError::Validation(MISSING_REQUIRED_FIELDS.to_string()));
        };

        if parse_entry_date(&date).is_none() {
            return Err(AppError::Validation(
                "Invalid date: expected YYYY-MM-DD".to_string(),
            ));
        }

        Ok(Workout {
            id: new_id(),
            user_id: user_id.to_string(),
            date,
            title,
            duration,
            notes: self.notes,
        })
    }
}

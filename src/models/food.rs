// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Food-intake entry model and its create request.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::error::{AppError, MISSING_REQUIRED_FIELDS};
use crate::models::{fields, new_id, Entry};
use crate::time_utils::parse_entry_date;

/// Stored food-intake record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Food {
    /// Entry ID (also used as document ID)
    pub id: String,
    /// Owning user's ID
    pub user_id: String,
    /// Calendar day (`YYYY-MM-DD`)
    pub date: String,
    /// What was eaten
    pub name: String,
    /// Energy in kcal
    pub calories: u32,
}

impl Food {
    /// Build a new entry for `user_id` from a validated request.
    pub fn new(user_id: &str, date: String, name: String, calories: u32) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.to_string(),
            date,
            name,
            calories,
        }
    }
}

impl Entry for Food {
    const KIND: &'static str = "Food entry";

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

/// Body of `POST /api/food`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateFoodRequest {
    #[serde(default, deserialize_with = "fields::non_empty_string")]
    #[validate(required)]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "fields::non_empty_string")]
    #[validate(required, length(max = 200))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "fields::lenient_count")]
    #[validate(required)]
    pub calories: Option<u32>,
}

impl CreateFoodRequest {
    /// Turn the request into a stored entry owned by `user_id`.
    pub fn into_food(self, user_id: &str) -> Result<Food, AppError> {
        let (Some(date), Some(name), Some(calories)) = (self.date, self.name, self.calories) else {
            return Err(AppError::Validation(MISSING_REQUIRED_FIELDS.to_string()));
        };

        if parse_entry_date(&date).is_none() {
            return Err(AppError::Validation(
                "Invalid date: expected YYYY-MM-DD".to_string(),
            ));
        }

        Ok(Food::new(user_id, date, name, calories))
    }
}

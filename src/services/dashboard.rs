// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seven-day calorie and workout-minute summary.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Food, Workout};
use crate::time_utils::format_entry_date;

/// Number of calendar days the dashboard covers.
pub const DASHBOARD_DAYS: usize = 7;

/// Per-day series for the dashboard charts.
///
/// `calories[i]` and `minutes[i]` are the totals for `dates[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Dashboard {
    /// Oldest first, ending with today
    pub dates: Vec<String>,
    pub calories: Vec<u64>,
    pub minutes: Vec<u64>,
    pub total_calories: u64,
    pub total_minutes: u64,
}

/// The `n` calendar days ending with `today`, oldest first.
pub fn last_n_dates(today: NaiveDate, n: usize) -> Vec<String> {
    (0..n)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset as u64)))
        .map(format_entry_date)
        .collect()
}

/// Sum calories and workout minutes per day over the last week.
///
/// Records dated outside the window are ignored; days with no records are 0.
pub fn build_dashboard(foods: &[Food], workouts: &[Workout], today: NaiveDate) -> Dashboard {
    let dates = last_n_dates(today, DASHBOARD_DAYS);
    let index: HashMap<&str, usize> = dates
        .iter()
        .enumerate()
        .map(|(i, d)| (d.as_str(), i))
        .collect();

    let mut calories = vec![0u64; dates.len()];
    let mut minutes = vec![0u64; dates.len()];

    for food in foods {
        if let Some(&i) = index.get(food.date.as_str()) {
            calories[i] += u64::from(food.calories);
        }
    }
    for workout in workouts {
        if let Some(&i) = index.get(workout.date.as_str()) {
            minutes[i] += u64::from(workout.duration);
        }
    }

    Dashboard {
        total_calories: calories.iter().sum(),
        total_minutes: minutes.iter().sum(),
        dates,
        calories,
        minutes,
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shaping of the food log and workout list pages.

use chrono::{DateTime, Duration, Utc};

use crate::models::{sort_newest_first, Food, Workout};
use crate::time_utils::{parse_entry_date, start_of_day_utc};

/// How far back the workout page looks.
pub const RECENT_WORKOUT_DAYS: i64 = 7;

/// Food entries sharing one date, with their calorie subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: String,
    pub entries: Vec<Food>,
    pub total_calories: u64,
}

/// Group food entries by exact date string, newest date first.
///
/// Entries inside a group are newest first.
pub fn group_by_date(mut foods: Vec<Food>) -> Vec<DayGroup> {
    sort_newest_first(&mut foods);

    let mut groups: Vec<DayGroup> = Vec::new();
    for food in foods {
        match groups.last_mut() {
            Some(group) if group.date == food.date => {
                group.total_calories += u64::from(food.calories);
                group.entries.push(food);
            }
            _ => groups.push(DayGroup {
                date: food.date.clone(),
                total_calories: u64::from(food.calories),
                entries: vec![food],
            }),
        }
    }
    groups
}

/// Workouts whose day starts no earlier than a week before `now`, newest first.
///
/// A workout dated exactly seven days ago is dropped once `now` is past its
/// midnight.
pub fn recent_workouts(mut workouts: Vec<Workout>, now: DateTime<Utc>) -> Vec<Workout> {
    let cutoff = now - Duration::days(RECENT_WORKOUT_DAYS);
    workouts.retain(|w| {
        parse_entry_date(&w.date).is_some_and(|date| start_of_day_utc(date) >= cutoff)
    });
    sort_newest_first(&mut workouts);
    workouts
}

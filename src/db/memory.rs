// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store used for local development and tests.

use dashmap::DashMap;

use crate::db::Collection;
use crate::models::{Food, User, Workout};

/// Documents keyed by ID, one map per collection.
#[derive(Default)]
pub struct MemoryStore {
    pub(crate) users: DashMap<String, User>,
    pub(crate) foods: DashMap<String, Food>,
    pub(crate) workouts: DashMap<String, Workout>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone())
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|u| u.value().clone())
    }

    pub fn upsert_user(&self, user: &User) {
        self.users.insert(user.id.clone(), user.clone());
    }

    pub fn list_entries<T: Collection>(&self, user_id: &str) -> Vec<T> {
        T::memory_table(self)
            .iter()
            .filter(|e| e.user_id() == user_id)
            .map(|e| e.value().clone())
            .collect()
    }

    pub fn get_entry<T: Collection>(&self, entry_id: &str) -> Option<T> {
        T::memory_table(self).get(entry_id).map(|e| e.value().clone())
    }

    pub fn insert_entry<T: Collection>(&self, entry: &T) {
        T::memory_table(self).insert(entry.id().to_string(), entry.clone());
    }

    pub fn delete_entry<T: Collection>(&self, entry_id: &str) {
        T::memory_table(self).remove(entry_id);
    }
}

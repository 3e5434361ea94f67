//! Database layer (Firestore, or an in-process store for development).

pub mod firestore;
pub mod memory;

use std::sync::Arc;

use dashmap::DashMap;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use crate::models::{sort_newest_first, Entry, Food, User, Workout};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const FOODS: &str = "foods";
    pub const WORKOUTS: &str = "workouts";
}

/// An entry type with its own collection.
pub trait Collection: Entry {
    const NAME: &'static str;

    fn memory_table(store: &MemoryStore) -> &DashMap<String, Self>;
}

impl Collection for Food {
    const NAME: &'static str = collections::FOODS;

    fn memory_table(store: &MemoryStore) -> &DashMap<String, Self> {
        &store.foods
    }
}

impl Collection for Workout {
    const NAME: &'static str = collections::WORKOUTS;

    fn memory_table(store: &MemoryStore) -> &DashMap<String, Self> {
        &store.workouts
    }
}

/// Storage handle shared by all handlers.
#[derive(Clone)]
pub enum Db {
    Firestore(FirestoreStore),
    Memory(Arc<MemoryStore>),
}

impl Db {
    /// Open the backend selected by configuration.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.storage_backend {
            StorageBackend::Firestore => Ok(Self::Firestore(
                FirestoreStore::new(&config.gcp_project_id).await?,
            )),
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }

    pub fn in_memory() -> Self {
        Self::Memory(Arc::new(MemoryStore::new()))
    }

    /// A handle whose every operation fails with `AppError::Database`.
    pub fn offline() -> Self {
        Self::Firestore(FirestoreStore::new_mock())
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        match self {
            Self::Firestore(db) => db.find_user_by_email(email).await,
            Self::Memory(store) => Ok(store.find_user_by_email(email)),
        }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        match self {
            Self::Firestore(db) => db.get_user(user_id).await,
            Self::Memory(store) => Ok(store.get_user(user_id)),
        }
    }

    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        match self {
            Self::Firestore(db) => db.upsert_user(user).await,
            Self::Memory(store) => {
                store.upsert_user(user);
                Ok(())
            }
        }
    }

    /// Entries owned by `user_id`, newest date first (ties: newest ID first).
    pub async fn list_entries<T: Collection>(&self, user_id: &str) -> Result<Vec<T>, AppError> {
        let mut entries = match self {
            Self::Firestore(db) => db.list_entries::<T>(user_id).await?,
            Self::Memory(store) => store.list_entries::<T>(user_id),
        };
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    pub async fn get_entry<T: Collection>(&self, entry_id: &str) -> Result<Option<T>, AppError> {
        match self {
            Self::Firestore(db) => db.get_entry(entry_id).await,
            Self::Memory(store) => Ok(store.get_entry(entry_id)),
        }
    }

    pub async fn insert_entry<T: Collection>(&self, entry: &T) -> Result<(), AppError> {
        match self {
            Self::Firestore(db) => db.insert_entry(entry).await,
            Self::Memory(store) => {
                store.insert_entry(entry);
                Ok(())
            }
        }
    }

    pub async fn delete_entry<T: Collection>(&self, entry_id: &str) -> Result<(), AppError> {
        match self {
            Self::Firestore(db) => db.delete_entry::<T>(entry_id).await,
            Self::Memory(store) => {
                store.delete_entry::<T>(entry_id);
                Ok(())
            }
        }
    }
}

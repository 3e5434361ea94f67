// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ownership checks shared by the food and workout handlers.

use crate::db::{Collection, Db};
use crate::error::{AppError, Result};
use crate::middleware::auth::SessionUser;
use crate::models::User;

/// Resolve the session's email to its stored user.
pub async fn resolve_user(db: &Db, session: &SessionUser) -> Result<User> {
    db.find_user_by_email(&session.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Load an entry and check that the session user owns it.
///
/// A missing entry is `NotFound`; an entry whose owner is missing or has a
/// different email is `Forbidden`.
pub async fn load_owned_entry<T: Collection>(
    db: &Db,
    session: &SessionUser,
    entry_id: &str,
) -> Result<T> {
    let entry: T = db
        .get_entry(entry_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", T::KIND)))?;

    let owner = db.get_user(entry.user_id()).await?;
    match owner {
        Some(owner) if owner.email == session.email => Ok(entry),
        _ => {
            tracing::warn!(
                kind = T::KIND,
                entry_id = %entry_id,
                email = %session.email,
                "Rejected access to entry owned by another user"
            );
            Err(AppError::Forbidden)
        }
    }
}

/// Delete an entry after the ownership check.
pub async fn delete_owned_entry<T: Collection>(
    db: &Db,
    session: &SessionUser,
    entry_id: &str,
) -> Result<()> {
    let entry: T = load_owned_entry(db, session, entry_id).await?;
    db.delete_entry::<T>(entry.id()).await?;

    tracing::info!(kind = T::KIND, entry_id = %entry_id, "Deleted entry");
    Ok(())
}

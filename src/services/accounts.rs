// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account creation on sign-in.

use chrono::Utc;

use crate::db::Db;
use crate::error::Result;
use crate::models::{user_id_for_email, User};
use crate::services::google_oidc::GoogleIdentity;
use crate::time_utils::format_utc_rfc3339;

/// Find or create the user for a verified identity.
///
/// The user ID is derived from the email, so repeated or concurrent sign-ins
/// land on one document. The display name is refreshed from the identity
/// provider.
pub async fn sign_in_user(db: &Db, identity: &GoogleIdentity) -> Result<User> {
    let now = format_utc_rfc3339(Utc::now());
    let id = user_id_for_email(&identity.email);

    let user = match db.get_user(&id).await? {
        Some(mut user) => {
            if let Some(name) = &identity.name {
                user.name = name.clone();
            }
            user.last_sign_in_at = now;
            user
        }
        None => {
            let user = User {
                id,
                email: identity.email.clone(),
                name: identity.name.clone().unwrap_or_default(),
                created_at: now.clone(),
                last_sign_in_at: now,
            };
            tracing::info!(user_id = %user.id, email = %user.email, "Created user");
            user
        }
    };

    db.upsert_user(&user).await?;
    Ok(user)
}

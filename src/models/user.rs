//! User model for storage and API.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User profile stored in the `users` collection.
///
/// The email address (from Google) is the identity; `id` is derived from it
/// with [`user_id_for_email`] and is what entries reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Document ID, derived from the email
    pub id: String,
    /// Verified email address from the identity provider
    pub email: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// When the user first signed in
    #[serde(default)]
    pub created_at: String,
    /// Most recent sign-in
    #[serde(default)]
    pub last_sign_in_at: String,
}

/// Document ID for the user with `email`.
///
/// Firestore cannot enforce a unique email, so the ID is a function of it:
/// concurrent first sign-ins write the same document.
pub fn user_id_for_email(email: &str) -> String {
    hex::encode(Sha256::digest(email.trim().to_lowercase().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_ignores_case_and_whitespace() {
        let id = user_id_for_email("Alice@Example.com ");
        assert_eq!(id, user_id_for_email("alice@example.com"));
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, user_id_for_email("bob@example.com"));
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Signing keys are never read directly: both the session key and the OAuth
//! state key are derived from `AUTH_SECRET` with HKDF so one secret can be
//! rotated in one place.

use hkdf::Hkdf;
use sha2::Sha256;
use std::env;

const SESSION_KEY_LABEL: &str = "fitlog session signing key v1";
const OAUTH_STATE_KEY_LABEL: &str = "fitlog oauth state key v1";
const DERIVED_KEY_LEN: usize = 32;

/// Where entries and users are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Google Firestore (or its emulator when FIRESTORE_EMULATOR_HOST is set)
    Firestore,
    /// Process-local maps; data is lost on restart
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Google OAuth client ID; sign-in is disabled when unset
    pub google_client_id: Option<String>,
    /// Externally visible base URL (OAuth callback, cookie `Secure` flag)
    pub public_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Persistence backend
    pub storage_backend: StorageBackend,

    // --- Secrets ---
    /// Google OAuth client secret; sign-in is disabled when unset
    pub google_client_secret: Option<String>,
    /// HS256 key for session tokens (derived from AUTH_SECRET)
    pub session_signing_key: Vec<u8>,
    /// HMAC key for the OAuth `state` parameter (derived from AUTH_SECRET)
    pub oauth_state_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_secret = lookup("AUTH_SECRET")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("AUTH_SECRET"))?;

        let google_client_id = non_empty(lookup("GOOGLE_ID"));
        let google_client_secret = non_empty(lookup("GOOGLE_SECRET"));
        if google_client_id.is_none() || google_client_secret.is_none() {
            tracing::warn!(
                "Missing GOOGLE_ID or GOOGLE_SECRET environment variables; Google sign-in is disabled"
            );
        }

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("'{}' is not a valid port", raw),
            })?,
            None => 8080,
        };

        let storage_backend = match lookup("STORAGE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("firestore") => StorageBackend::Firestore,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE_BACKEND",
                    reason: format!("unknown backend '{}' (expected firestore or memory)", other),
                })
            }
        };

        Ok(Self {
            google_client_id,
            public_url: lookup("PUBLIC_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            gcp_project_id: lookup("GCP_PROJECT_ID").unwrap_or_else(|| "local-dev".to_string()),
            port,
            storage_backend,
            google_client_secret,
            session_signing_key: derive_key(auth_secret.as_bytes(), SESSION_KEY_LABEL)?,
            oauth_state_key: derive_key(auth_secret.as_bytes(), OAUTH_STATE_KEY_LABEL)?,
        })
    }

    /// Deterministic config for tests: memory storage, Google sign-in disabled.
    pub fn test_default() -> Self {
        Self {
            google_client_id: None,
            public_url: "http://localhost:8080".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            storage_backend: StorageBackend::Memory,
            google_client_secret: None,
            session_signing_key: b"test_session_key_32_bytes_min!!!".to_vec(),
            oauth_state_key: b"test_oauth_state_key_32_bytes!!!".to_vec(),
        }
    }

    /// Google OAuth credentials, if both halves are configured.
    pub fn google_credentials(&self) -> Option<(&str, &str)> {
        match (&self.google_client_id, &self.google_client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }

    /// Whether cookies must carry the `Secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        self.public_url.starts_with("https://")
    }

    /// Absolute URL Google redirects back to after consent.
    pub fn google_callback_url(&self) -> String {
        format!("{}/auth/google/callback", self.public_url)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Derive a purpose-specific key from the master secret (HKDF-SHA256).
fn derive_key(secret: &[u8], label: &str) -> Result<Vec<u8>, ConfigError> {
    let hk = Hkdf::<Sha256>::new(None, secret);
    let mut okm = vec![0u8; DERIVED_KEY_LEN];
    hk.expand(label.as_bytes(), &mut okm)
        .map_err(|e| ConfigError::Invalid {
            name: "AUTH_SECRET",
            reason: format!("key derivation failed: {}", e),
        })?;
    Ok(okm)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

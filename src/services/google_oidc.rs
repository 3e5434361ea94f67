// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OIDC ID token verification for sign-in.

use anyhow::Context;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::services::google_keys::GoogleKeyStore;

pub(crate) const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);
const CLOCK_SKEW_SECS: u64 = 60;

/// Google issuer values accepted in the `iss` claim.
pub const GOOGLE_ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];

/// Identity extracted from a verified Google ID token.
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleIdentity {
    pub email: String,
    pub name: Option<String>,
    pub subject: String,
}

/// Why an ID token was not accepted.
#[derive(Debug, Clone)]
pub enum OidcError {
    /// The token itself is bad: signature, claims or key id.
    Rejected(String),
    /// Google's keys could not be fetched; the token may be fine.
    Transient(String),
}

impl std::fmt::Display for OidcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OidcError::Rejected(msg) => write!(f, "ID token rejected: {msg}"),
            OidcError::Transient(msg) => write!(f, "ID token verification unavailable: {msg}"),
        }
    }
}

/// Where signing keys come from.
enum Keys {
    /// Google's JWKS, RS256.
    Google(GoogleKeyStore),
    /// One fixed key, for tests.
    Fixed {
        kid: String,
        algorithm: Algorithm,
        key: Arc<DecodingKey>,
    },
}

/// Verifier for ID tokens returned by Google's token endpoint.
pub struct GoogleOidcVerifier {
    client_id: String,
    keys: Keys,
}

impl GoogleOidcVerifier {
    /// Verifier against Google's published keys; `client_id` is the
    /// expected `aud`.
    pub fn new(client_id: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .context("failed building OIDC HTTP client")?;

        tracing::info!(audience = %client_id, "Initialized Google ID token verifier");

        Ok(Self {
            client_id: client_id.to_string(),
            keys: Keys::Google(GoogleKeyStore::new(http)),
        })
    }

    /// Verifier that trusts exactly one key.
    pub fn new_with_static_key(
        client_id: &str,
        kid: impl Into<String>,
        algorithm: Algorithm,
        decoding_key: DecodingKey,
    ) -> anyhow::Result<Self> {
        let kid = kid.into();
        if kid.trim().is_empty() {
            anyhow::bail!("static OIDC kid must not be empty");
        }

        Ok(Self {
            client_id: client_id.to_string(),
            keys: Keys::Fixed {
                kid,
                algorithm,
                key: Arc::new(decoding_key),
            },
        })
    }

    fn algorithm(&self) -> Algorithm {
        match &self.keys {
            Keys::Google(_) => Algorithm::RS256,
            Keys::Fixed { algorithm, .. } => *algorithm,
        }
    }

    async fn key_for(&self, kid: &str) -> Result<Arc<DecodingKey>, OidcError> {
        match &self.keys {
            Keys::Google(store) => store.key(kid).await,
            Keys::Fixed { kid: fixed, key, .. } if fixed == kid => Ok(key.clone()),
            Keys::Fixed { .. } => Err(OidcError::Rejected(format!("unexpected kid {kid}"))),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm());
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.set_issuer(&GOOGLE_ISSUERS);
        validation.set_audience(&[self.client_id.as_str()]);
        validation.validate_nbf = true;
        validation.leeway = CLOCK_SKEW_SECS;
        validation
    }

    /// Verify a Google ID token and return the signed-in identity.
    pub async fn verify_id_token(&self, token: &str) -> Result<GoogleIdentity, OidcError> {
        let header = decode_header(token)
            .map_err(|e| OidcError::Rejected(format!("malformed token: {e}")))?;

        if header.alg != self.algorithm() {
            return Err(OidcError::Rejected(format!(
                "unexpected alg {:?}",
                header.alg
            )));
        }
        let kid = header
            .kid
            .ok_or_else(|| OidcError::Rejected("token has no kid".to_string()))?;

        let key = self.key_for(&kid).await?;
        let claims = decode::<IdTokenClaims>(token, &key, &self.validation())
            .map_err(|e| OidcError::Rejected(e.to_string()))?
            .claims;

        tracing::debug!(
            subject = %claims.sub,
            email_verified = ?claims.email_verified,
            "Verified Google ID token signature"
        );

        claims.into_identity(now_unix_secs())
    }
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    iat: Option<u64>,
    email: Option<String>,
    email_verified: Option<bool>,
    name: Option<String>,
}

impl IdTokenClaims {
    /// Checks the claims `jsonwebtoken` does not know about.
    fn into_identity(self, now: u64) -> Result<GoogleIdentity, OidcError> {
        let reject = |msg: &str| Err(OidcError::Rejected(msg.to_string()));

        match self.iat {
            None => return reject("iat claim missing"),
            Some(iat) if iat > now + CLOCK_SKEW_SECS => return reject("iat claim in the future"),
            Some(_) => {}
        }

        let Some(email) = self.email.filter(|e| !e.trim().is_empty()) else {
            return reject("email claim missing");
        };
        if self.email_verified != Some(true) {
            return reject("email not verified");
        }

        Ok(GoogleIdentity {
            email,
            name: self.name.filter(|n| !n.trim().is_empty()),
            subject: self.sub,
        })
    }
}

fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

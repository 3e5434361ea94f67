// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google's published ID token signing keys.
//!
//! Keys are fetched on first use and kept for the `max-age` the JWKS response
//! advertises. A token signed with a `kid` we have not seen triggers one
//! refetch, since Google rotates keys ahead of the cache expiring.

use jsonwebtoken::DecodingKey;
use reqwest::header::{HeaderMap, CACHE_CONTROL};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

use crate::services::google_oidc::OidcError;

pub const GOOGLE_DISCOVERY_URL: &str =
    "https://accounts.google.com/.well-known/openid-configuration";
const FALLBACK_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// Used when the JWKS response carries no usable `max-age`.
const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300);
/// Unknown `kid`s never refetch more often than this.
const MIN_REFETCH_INTERVAL: Duration = Duration::from_secs(30);

/// One fetched JWKS document.
struct KeySet {
    jwks_uri: String,
    keys: HashMap<String, Arc<DecodingKey>>,
    fetched_at: Instant,
    max_age: Duration,
}

impl KeySet {
    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < self.max_age
    }

    fn recently_fetched(&self) -> bool {
        self.fetched_at.elapsed() < MIN_REFETCH_INTERVAL
    }
}

enum Lookup {
    Found(Arc<DecodingKey>),
    /// Missing from a set fetched moments ago; fetching again would not help.
    Unknown,
    Refetch,
}

fn unknown_kid(kid: &str) -> OidcError {
    OidcError::Rejected(format!("no Google signing key with kid {kid}"))
}

/// Lazily fetched, shared cache of Google's RSA signing keys.
pub struct GoogleKeyStore {
    http: reqwest::Client,
    discovery_url: String,
    current: RwLock<Option<KeySet>>,
    fetching: Mutex<()>,
}

impl GoogleKeyStore {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_discovery_url(http, GOOGLE_DISCOVERY_URL)
    }

    pub fn with_discovery_url(http: reqwest::Client, discovery_url: impl Into<String>) -> Self {
        Self {
            http,
            discovery_url: discovery_url.into(),
            current: RwLock::new(None),
            fetching: Mutex::new(()),
        }
    }

    /// Decoding key for `kid`, fetching the key set when needed.
    pub async fn key(&self, kid: &str) -> Result<Arc<DecodingKey>, OidcError> {
        if let Lookup::Found(key) = self.lookup(kid).await {
            return Ok(key);
        }

        // One fetch at a time; whoever waited may find the work done.
        let _fetching = self.fetching.lock().await;
        match self.lookup(kid).await {
            Lookup::Found(key) => return Ok(key),
            Lookup::Unknown => return Err(unknown_kid(kid)),
            Lookup::Refetch => {}
        }

        let set = self.fetch().await?;
        let key = set.keys.get(kid).cloned();
        *self.current.write().await = Some(set);

        key.ok_or_else(|| unknown_kid(kid))
    }

    async fn lookup(&self, kid: &str) -> Lookup {
        let current = self.current.read().await;
        match current.as_ref().filter(|set| set.is_fresh()) {
            None => Lookup::Refetch,
            Some(set) => match set.keys.get(kid) {
                Some(key) => Lookup::Found(key.clone()),
                None if set.recently_fetched() => Lookup::Unknown,
                None => Lookup::Refetch,
            },
        }
    }

    async fn fetch(&self) -> Result<KeySet, OidcError> {
        let jwks_uri = self.jwks_uri().await;
        tracing::debug!(jwks_uri = %jwks_uri, "Fetching Google signing keys");

        let response = self
            .http
            .get(&jwks_uri)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| OidcError::Transient(format!("JWKS fetch failed: {e}")))?;

        let max_age = max_age(response.headers()).unwrap_or(DEFAULT_MAX_AGE);
        let document: JwksDocument = response
            .json()
            .await
            .map_err(|e| OidcError::Transient(format!("JWKS body unreadable: {e}")))?;

        let keys = document.signing_keys();
        if keys.is_empty() {
            return Err(OidcError::Transient(
                "JWKS contained no RS256 signing keys".to_string(),
            ));
        }

        tracing::debug!(
            keys = keys.len(),
            max_age_secs = max_age.as_secs(),
            "Google signing keys refreshed"
        );

        Ok(KeySet {
            jwks_uri,
            keys,
            fetched_at: Instant::now(),
            max_age,
        })
    }

    /// JWKS location from discovery; the last known (or published) URL when
    /// discovery is unavailable.
    async fn jwks_uri(&self) -> String {
        let discovered = async {
            let response = self
                .http
                .get(&self.discovery_url)
                .send()
                .await?
                .error_for_status()?;
            response.json::<Discovery>().await
        }
        .await;

        match discovered {
            Ok(discovery) => discovery.jwks_uri,
            Err(e) => {
                tracing::warn!(error = %e, "OIDC discovery failed; using known JWKS URL");
                self.current
                    .read()
                    .await
                    .as_ref()
                    .map(|set| set.jwks_uri.clone())
                    .unwrap_or_else(|| FALLBACK_JWKS_URL.to_string())
            }
        }
    }
}

#[derive(Deserialize)]
struct Discovery {
    jwks_uri: String,
}

#[derive(Deserialize)]
struct JwksDocument {
    keys: Vec<JsonWebKey>,
}

#[derive(Deserialize)]
struct JsonWebKey {
    kid: String,
    kty: String,
    #[serde(default)]
    alg: Option<String>,
    #[serde(default, rename = "use")]
    key_use: Option<String>,
    #[serde(default)]
    n: String,
    #[serde(default)]
    e: String,
}

impl JsonWebKey {
    fn is_rs256_signing_key(&self) -> bool {
        self.kty == "RSA"
            && !self.kid.trim().is_empty()
            && self.alg.as_deref().unwrap_or("RS256") == "RS256"
            && self.key_use.as_deref().unwrap_or("sig") == "sig"
    }
}

impl JwksDocument {
    fn signing_keys(self) -> HashMap<String, Arc<DecodingKey>> {
        self.keys
            .into_iter()
            .filter(JsonWebKey::is_rs256_signing_key)
            .filter_map(|jwk| match DecodingKey::from_rsa_components(&jwk.n, &jwk.e) {
                Ok(key) => Some((jwk.kid, Arc::new(key))),
                Err(e) => {
                    tracing::warn!(error = %e, kid = %jwk.kid, "Ignoring malformed JWKS key");
                    None
                }
            })
            .collect()
    }
}

/// `max-age` from a `Cache-Control` header.
fn max_age(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(CACHE_CONTROL)?.to_str().ok()?;
    value
        .split(',')
        .filter_map(|directive| directive.trim().split_once('='))
        .find(|(name, _)| name.eq_ignore_ascii_case("max-age"))
        .and_then(|(_, secs)| secs.trim_matches('"').parse().ok())
        .map(Duration::from_secs)
}

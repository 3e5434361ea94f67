// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth 2.0 authorization-code client.

use anyhow::Context;
use serde::Deserialize;

use crate::config::Config;
use crate::error::AppError;
use crate::services::google_oidc::{
    GoogleIdentity, GoogleOidcVerifier, OidcError, DEFAULT_HTTP_TIMEOUT,
};

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SCOPES: &str = "openid email profile";

/// Client for the authorization-code exchange.
#[derive(Clone)]
pub struct GoogleOAuthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    token_url: String,
}

/// Token endpoint response; only the ID token is used.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub id_token: String,
}

impl GoogleOAuthClient {
    pub fn new(client_id: &str, client_secret: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .context("failed building OAuth HTTP client")?;

        Ok(Self {
            http,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
        })
    }

    /// Point the code exchange at a different token endpoint (tests).
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// URL of Google's consent screen for this client.
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}&prompt=select_account",
            GOOGLE_AUTH_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(SCOPES),
            urlencoding::encode(state),
        )
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::IdentityProvider(format!(
                "Token exchange failed: HTTP {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::IdentityProvider(format!("JSON parse error: {}", e)))
    }
}

/// Everything needed to complete a Google sign-in.
pub struct GoogleSignIn {
    pub oauth: GoogleOAuthClient,
    pub verifier: GoogleOidcVerifier,
}

impl GoogleSignIn {
    /// Build from configuration; `None` when Google credentials are absent.
    pub fn from_config(config: &Config) -> anyhow::Result<Option<Self>> {
        let Some((client_id, client_secret)) = config.google_credentials() else {
            return Ok(None);
        };

        Ok(Some(Self {
            oauth: GoogleOAuthClient::new(client_id, client_secret)?,
            verifier: GoogleOidcVerifier::new(client_id)?,
        }))
    }

    /// Redeem `code` and verify the returned ID token.
    pub async fn complete(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<GoogleIdentity, AppError> {
        let tokens = self.oauth.exchange_code(code, redirect_uri).await?;

        self.verifier
            .verify_id_token(&tokens.id_token)
            .await
            .map_err(|e: OidcError| AppError::IdentityProvider(e.to_string()))
    }
}

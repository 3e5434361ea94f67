// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// A request the framework refused before it reached a handler.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Sign-in provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    #[error("Database error: {0}")]
    Database(String),

    /// A server-side failure attributed to a specific operation.
    #[error("Failed to {action}: {reason}")]
    Failed {
        action: &'static str,
        reason: String,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Message returned for a missing or empty required body field.
pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";

impl AppError {
    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected { status, .. } => *status,
            AppError::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::IdentityProvider(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Failed { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Attribute a server-side failure to `action`.
    ///
    /// Client errors (4xx) pass through unchanged so their messages survive.
    pub fn failed(self, action: &'static str) -> Self {
        match self {
            AppError::Database(reason) => AppError::Failed { action, reason },
            AppError::Internal(err) => AppError::Failed {
                action,
                reason: format!("{:#}", err),
            },
            other => other,
        }
    }
}

/// Extension for tagging fallible calls with the operation they belong to.
pub trait FailedExt<T> {
    fn or_failed(self, action: &'static str) -> Result<T>;
}

impl<T> FailedExt<T> for Result<T> {
    fn or_failed(self, action: &'static str) -> Result<T> {
        self.map_err(|err| err.failed(action))
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            // Ownership failures answer 403 but read the same as a missing session.
            AppError::Unauthorized | AppError::Forbidden => "Unauthorized".to_string(),
            AppError::NotFound(_) | AppError::Validation(_) | AppError::Rejected { .. } => {
                self.to_string()
            }
            AppError::ProviderUnavailable(provider) => {
                tracing::warn!(provider = %provider, "Sign-in attempted with provider disabled");
                "Sign-in provider is not configured".to_string()
            }
            AppError::IdentityProvider(msg) => {
                tracing::error!(error = %msg, "Identity provider error");
                "Sign-in failed".to_string()
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                "Database error".to_string()
            }
            AppError::Failed { action, reason } => {
                tracing::error!(action = %action, error = %reason, "Request failed");
                format!("Failed to {}", action)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

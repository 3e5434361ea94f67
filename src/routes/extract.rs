// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON body extractor that runs `validator` rules.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, MISSING_REQUIRED_FIELDS};

/// `Json<T>` that also validates.
///
/// Unparseable or invalid bodies are a 400 `AppError::Validation`; other
/// rejections (an oversized body is 413) keep their own status.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;

        value
            .validate()
            .map_err(|errors| AppError::Validation(validation_message(&errors)))?;

        Ok(Self(value))
    }
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::Validation("Expected a JSON request body".to_string())
        }
        err @ (JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_)) => {
            AppError::Validation(format!("Invalid request body: {}", err.body_text()))
        }
        other => AppError::Rejected {
            status: other.status(),
            message: other.body_text(),
        },
    }
}

/// Missing required fields win over other rule failures.
fn validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    let missing = field_errors
        .values()
        .flat_map(|errs| errs.iter())
        .any(|e| e.code == "required");
    if missing {
        return MISSING_REQUIRED_FIELDS.to_string();
    }

    let mut fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
    fields.sort_unstable();
    format!("Invalid value for: {}", fields.join(", "))
}

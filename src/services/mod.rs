// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod dashboard;
pub mod entries;
pub mod google_keys;
pub mod google_oauth;
pub mod google_oidc;
pub mod history;

pub use dashboard::{build_dashboard, Dashboard};
pub use google_oauth::{GoogleOAuthClient, GoogleSignIn};
pub use google_oidc::{GoogleIdentity, GoogleOidcVerifier, OidcError};

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitlog: a personal food and workout log
//!
//! This crate provides the web service: Google sign-in, the food and
//! workout REST API, and the server-rendered pages that use it.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod views;

use config::Config;
use db::Db;
use services::GoogleSignIn;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    /// `None` when Google credentials are not configured
    pub google: Option<GoogleSignIn>,
}

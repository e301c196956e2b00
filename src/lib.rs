// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Notion-Relay: admin backend for a Notion users database
//!
//! This crate provides the same-origin relay that injects the Notion
//! integration token, the clients that map users to and from Notion pages,
//! and an encrypted chat store kept in Airtable.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::Upstream;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub upstream: Arc<dyn Upstream>,
}

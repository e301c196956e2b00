// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types: relay responses and client service failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Relay error type that converts to HTTP responses.
///
/// Upstream rejections are not represented here: the relay passes those
/// through with the vendor's own status and body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Server configuration error: Notion API key is missing. Please check the NOTION_API_KEY environment variable.")]
    MissingApiKey,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message returned to callers for transport and parse failures.
    pub const INTERNAL_MESSAGE: &'static str = "An internal server error occurred in the proxy.";
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingApiKey => {
                tracing::error!("CRITICAL: NOTION_API_KEY is not configured");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Error in Notion proxy");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

/// Error surfaced by the Notion and Airtable client services.
///
/// Each variant carries the single most specific message available; that
/// message is what a UI shows.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Non-success response from the vendor (or from the relay).
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),

    /// A required single-row fetch matched nothing.
    #[error("No record found in table \"{table}\" with formula \"{formula}\".")]
    NotFound { table: String, formula: String },

    /// Encrypting or decrypting a collection blob failed.
    #[error("Crypto error: {0}")]
    Crypto(#[from] crate::services::crypto::CryptoError),

    /// A collection could not be serialized or deserialized.
    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl ServiceError {
    /// HTTP status of an upstream rejection, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

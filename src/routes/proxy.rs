// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Forwarding endpoint for the Notion API.
//!
//! Everything under the proxy prefix is relayed to Notion with the
//! integration token and API version attached. Notion's status and JSON body
//! come back unchanged, error payloads included.

use crate::error::{AppError, Result};
use crate::services::upstream::UpstreamRequest;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

/// Proxy routes, mounted under `prefix` for every method.
pub fn routes(prefix: &str) -> Router<Arc<AppState>> {
    Router::new().route(&format!("{}/{{*path}}", prefix), any(forward))
}

/// True for bodies that carry nothing: `null`, `{}`, `[]`, `""` and bare
/// numbers or booleans.
fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
    }
}

/// Decide what body to send upstream.
///
/// A non-empty inbound body is forwarded as is. Otherwise POST gets `{}`
/// (Notion's query endpoint rejects a bodiless POST) and every other method
/// gets no body.
pub fn upstream_body(method: &Method, body: &[u8]) -> Result<Option<String>> {
    let inbound = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Request body is not valid JSON: {}", e)))?;
        Some(value).filter(|v| !is_empty_json(v))
    };

    Ok(match inbound {
        Some(value) => Some(value.to_string()),
        None if *method == Method::POST => Some("{}".to_string()),
        None => None,
    })
}

/// Relay one request to Notion.
async fn forward(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Result<Response> {
    tracing::info!(method = %method, path = %uri.path(), "Proxy invoked");

    let api_key = state
        .config
        .notion_api_key
        .as_deref()
        .ok_or(AppError::MissingApiKey)?;
    tracing::debug!(key_len = api_key.len(), "API key loaded");

    let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());
    let upstream_path = path_and_query
        .strip_prefix(state.config.proxy_prefix.as_str())
        .unwrap_or(path_and_query);
    let target_url = format!("{}{}", state.config.notion_api_base, upstream_path);

    let body = upstream_body(&method, &body)?;

    let request = UpstreamRequest {
        method: method.clone(),
        url: target_url,
        headers: vec![
            ("Authorization".to_string(), format!("Bearer {}", api_key)),
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "Notion-Version".to_string(),
                state.config.notion_version.clone(),
            ),
        ],
        body,
    };

    tracing::info!(target_url = %request.url, "Forwarding request to Notion");

    let response = state
        .upstream
        .send(request)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let data: Value = serde_json::from_slice(&response.body).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "Notion returned a non-JSON body (HTTP {}): {}",
            response.status,
            e
        ))
    })?;

    let status = StatusCode::from_u16(response.status).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("Invalid upstream status {}: {}", response.status, e))
    })?;

    if !status.is_success() {
        tracing::error!(status = %status, body = %data, "Error from Notion API");
    }

    Ok((status, Json(data)).into_response())
}

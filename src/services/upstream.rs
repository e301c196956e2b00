// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound transport used by the forwarding endpoint.
//!
//! Requests and responses are plain data so the relay can be exercised
//! against an in-memory transport in tests.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::Method;

/// One outbound HTTP call.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body; `None` sends no body at all.
    pub body: Option<String>,
}

/// Raw upstream reply, body not yet parsed.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Transport failure (connect, TLS, read).
#[derive(Debug, thiserror::Error)]
#[error("upstream transport error: {0}")]
pub struct TransportError(pub String);

/// Port for executing a single upstream HTTP call. No retries.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn send(&self, req: UpstreamRequest) -> Result<UpstreamResponse, TransportError>;
}

/// `reqwest`-backed transport. Relies on reqwest's default timeouts.
#[derive(Clone, Default)]
pub struct HttpUpstream {
    http: reqwest::Client,
}

impl HttpUpstream {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn send(&self, req: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        let mut builder = self.http.request(req.method, &req.url);
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(UpstreamResponse { status, body })
    }
}

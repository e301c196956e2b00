// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Bytes;
use notion_relay::config::Config;
use notion_relay::routes::create_router;
use notion_relay::services::{
    HttpUpstream, TransportError, Upstream, UpstreamRequest, UpstreamResponse,
};
use notion_relay::AppState;
use std::sync::{Arc, Mutex};

/// In-memory transport that records every call and replies with a canned
/// response (or a transport failure).
#[allow(dead_code)]
pub struct MockUpstream {
    pub calls: Mutex<Vec<UpstreamRequest>>,
    reply: Option<(u16, Bytes)>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Some((status, Bytes::from(body.to_string()))),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: None,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> UpstreamRequest {
        self.calls.lock().unwrap().last().cloned().expect("no upstream call")
    }
}

#[async_trait]
impl Upstream for MockUpstream {
    async fn send(&self, req: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        self.calls.lock().unwrap().push(req);
        match &self.reply {
            Some((status, body)) => Ok(UpstreamResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Err(TransportError("connection refused".to_string())),
        }
    }
}

/// Create a test app over the given transport.
#[allow(dead_code)]
pub fn create_test_app(config: Config, upstream: Arc<dyn Upstream>) -> axum::Router {
    create_router(Arc::new(AppState { config, upstream }))
}

/// Create a relay that forwards over real HTTP to `notion_api_base`.
#[allow(dead_code)]
pub fn create_http_relay(notion_api_base: &str, api_key: Option<&str>) -> axum::Router {
    let config = Config {
        notion_api_base: notion_api_base.to_string(),
        notion_api_key: api_key.map(str::to_string),
        ..Config::default()
    };
    create_test_app(config, Arc::new(HttpUpstream::new()))
}

/// Serve a router on an ephemeral local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
#[allow(dead_code)]
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

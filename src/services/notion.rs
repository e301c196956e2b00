// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notion users client.
//!
//! Talks to the forwarding endpoint (not to Notion directly), so it never
//! holds the integration token. Handles:
//! - Listing every user in the database
//! - Creating a user page
//! - Updating a user page

use crate::error::ServiceError;
use crate::models::notion::{
    CreatePageRequest, DatabaseParent, NotionPage, QueryResponse, UpdatePageRequest,
};
use crate::models::{User, UserDraft};
use crate::services::mapper::{from_remote, to_remote};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Fallback for a transport error with no text.
const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Error body shape shared by the relay and Notion (`{"message": ...}`).
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Notion users client.
#[derive(Clone)]
pub struct NotionService {
    http: reqwest::Client,
    /// Relay base, e.g. `https://admin.example.com/api`
    base_url: String,
    database_id: String,
}

impl NotionService {
    pub fn new(base_url: &str, database_id: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            database_id: database_id.to_string(),
        }
    }

    /// List every user, in the order Notion returns them.
    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        let url = format!(
            "{}/databases/{}/query",
            self.base_url,
            urlencoding::encode(&self.database_id)
        );

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(transport_error)?;

        let query: QueryResponse = check_response_json(response).await?;
        Ok(query.results.iter().map(from_remote).collect())
    }

    /// Create a user page. Notion assigns the ID.
    pub async fn create(&self, draft: &UserDraft) -> Result<User, ServiceError> {
        let url = format!("{}/pages", self.base_url);
        let body = CreatePageRequest {
            parent: DatabaseParent {
                database_id: &self.database_id,
            },
            properties: to_remote(draft),
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let page: NotionPage = check_response_json(response).await?;
        tracing::info!(page_id = %page.id, "Notion user created");
        Ok(from_remote(&page))
    }

    /// Update a user page with the supplied properties.
    pub async fn update(&self, id: &str, draft: &UserDraft) -> Result<User, ServiceError> {
        let url = format!("{}/pages/{}", self.base_url, urlencoding::encode(id));
        let body = UpdatePageRequest {
            properties: to_remote(draft),
        };

        let response = self
            .http
            .patch(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let page: NotionPage = check_response_json(response).await?;
        Ok(from_remote(&page))
    }
}

fn transport_error(e: reqwest::Error) -> ServiceError {
    tracing::error!(error = %e, "Error from Notion API proxy");
    let message = e.to_string();
    if message.is_empty() {
        ServiceError::Transport(UNKNOWN_ERROR.to_string())
    } else {
        ServiceError::Transport(message)
    }
}

/// Check response and parse JSON body.
async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ServiceError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = %status, body = %body, "Error from Notion API proxy");

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status));

        return Err(ServiceError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    response.json().await.map_err(transport_error)
}

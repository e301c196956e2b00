// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Airtable client for the encrypted chat blobs.
//!
//! Each table holds one row; each collection is a single encrypted string
//! in one field of that row. This client only moves opaque strings and
//! never encrypts or decrypts.

use crate::config::ChatConfig;
use crate::error::ServiceError;
use crate::models::{AppData, EncryptedCollections, RecordIds};
use serde::Deserialize;
use std::collections::HashMap;

/// Field in the users row holding the users blob.
pub const USERS_FIELD: &str = "Пользователи";
/// Field in the messages row holding the messages blob.
pub const MESSAGES_FIELD: &str = "Сообщения";
/// Field in the messages row holding the images blob.
pub const IMAGES_FIELD: &str = "Фото/Видео";

const UNKNOWN_ERROR: &str = "An unknown error occurred with the Airtable API.";

#[derive(Debug, Deserialize)]
struct AirtableRecord {
    id: String,
    #[serde(default)]
    fields: HashMap<String, serde_json::Value>,
}

impl AirtableRecord {
    /// String field value, or `default` when missing, null, or empty.
    fn field_or(&self, name: &str, default: &str) -> String {
        self.fields
            .get(name)
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }
}

#[derive(Debug, Deserialize)]
struct AirtableResponse {
    #[serde(default)]
    records: Vec<AirtableRecord>,
}

/// Airtable error body: `{"error": {"type": ..., "message": ...}}`.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Detailed { message: Option<String> },
    // Some endpoints return `{"error": "NOT_FOUND"}`
    Code(String),
}

/// Airtable blob store client.
#[derive(Clone)]
pub struct AirtableService {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    users_table: String,
    messages_table: String,
    users_filter: String,
}

impl AirtableService {
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.airtable_api_url.trim_end_matches('/').to_string(),
            api_key: config.airtable_api_key.clone(),
            users_table: config.users_table.clone(),
            messages_table: config.messages_table.clone(),
            users_filter: config.users_filter.clone(),
        }
    }

    /// Fetch the users row and the messages row.
    ///
    /// Both rows are required; either being absent is a not-found error.
    pub async fn fetch_all(&self) -> Result<AppData, ServiceError> {
        let (user_record, message_record) = tokio::try_join!(
            self.get_record(&self.users_table, Some(self.users_filter.as_str())),
            self.get_record(&self.messages_table, None),
        )?;

        Ok(AppData {
            data: EncryptedCollections {
                users: user_record.field_or(USERS_FIELD, "[]"),
                messages: message_record.field_or(MESSAGES_FIELD, "[]"),
                images: message_record.field_or(IMAGES_FIELD, "{}"),
            },
            ids: RecordIds {
                users_record_id: user_record.id,
                messages_record_id: message_record.id,
            },
        })
    }

    /// Overwrite the messages and images blobs of one row.
    ///
    /// Other fields of the row are untouched since they are not sent.
    pub async fn update_messages(
        &self,
        record_id: &str,
        encrypted_messages: &str,
        encrypted_images: &str,
    ) -> Result<(), ServiceError> {
        let url = format!(
            "{}/{}/{}",
            self.api_url,
            urlencoding::encode(&self.messages_table),
            urlencoding::encode(record_id)
        );

        let body = serde_json::json!({
            "fields": {
                MESSAGES_FIELD: encrypted_messages,
                IMAGES_FIELD: encrypted_images,
            }
        });

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        check_response(response).await?;
        tracing::info!(record_id, "Airtable messages row updated");
        Ok(())
    }

    /// Fetch the first row of a table, optionally filtered by formula.
    async fn get_record(
        &self,
        table: &str,
        formula: Option<&str>,
    ) -> Result<AirtableRecord, ServiceError> {
        let mut url = format!(
            "{}/{}?maxRecords=1",
            self.api_url,
            urlencoding::encode(table)
        );
        if let Some(formula) = formula {
            url.push_str("&filterByFormula=");
            url.push_str(&urlencoding::encode(formula));
        }

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(transport_error)?;

        let body: AirtableResponse = check_response(response)
            .await?
            .json()
            .await
            .map_err(transport_error)?;

        body.records
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound {
                table: table.to_string(),
                formula: formula.unwrap_or_default().to_string(),
            })
    }
}

fn transport_error(e: reqwest::Error) -> ServiceError {
    tracing::error!(error = %e, "Error from Airtable API");
    let message = e.to_string();
    if message.is_empty() {
        ServiceError::Transport(UNKNOWN_ERROR.to_string())
    } else {
        ServiceError::Transport(message)
    }
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!(status = %status, body = %body, "Error from Airtable API");

    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|detail| match detail {
            ErrorDetail::Detailed { message } => message,
            ErrorDetail::Code(code) => Some(code),
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status));

    Err(ServiceError::Upstream {
        status: status.as_u16(),
        message,
    })
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything is resolved once at startup and handed to handlers and
//! services by reference. Nothing reads the environment mid-request.

use std::env;

/// Notion API version pinned on every forwarded request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Path prefix the forwarding endpoint is mounted under.
pub const PROXY_PREFIX: &str = "/api";

/// Relay server configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Base URL of the Notion REST API (no trailing slash)
    pub notion_api_base: String,
    /// Value sent in the `Notion-Version` header
    pub notion_version: String,
    /// Path prefix stripped from inbound requests before forwarding
    pub proxy_prefix: String,

    // --- Secrets ---
    /// Notion integration token. `None` is not a startup failure: every
    /// forwarded request answers 500 until it is configured.
    pub notion_api_key: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            notion_api_base: "https://api.notion.com/v1".to_string(),
            notion_version: NOTION_VERSION.to_string(),
            proxy_prefix: PROXY_PREFIX.to_string(),
            notion_api_key: Some("test_notion_key".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        Ok(Self {
            port,
            notion_api_base: env::var("NOTION_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.notion.com/v1".to_string()),
            notion_version: env::var("NOTION_VERSION")
                .unwrap_or_else(|_| NOTION_VERSION.to_string()),
            proxy_prefix: PROXY_PREFIX.to_string(),
            notion_api_key: env::var("NOTION_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

/// Settings for the Airtable-backed chat store and its cipher.
///
/// The encryption passphrase is shipped to whatever client holds this
/// config, so the encrypted blobs are only obscured from the storage vendor,
/// not from users of the client.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Airtable REST base for one base, e.g. `https://api.airtable.com/v0/appXXXX`
    pub airtable_api_url: String,
    /// Airtable personal access token
    pub airtable_api_key: String,
    /// Table holding the encrypted users collection
    pub users_table: String,
    /// Table holding the encrypted messages and images collections
    pub messages_table: String,
    /// Formula selecting the users row (region predicate)
    pub users_filter: String,
    /// Pre-shared passphrase for the collection cipher
    pub encryption_key: String,
}

impl Default for ChatConfig {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            airtable_api_url: "https://api.airtable.com/v0/test_base".to_string(),
            airtable_api_key: "test_airtable_key".to_string(),
            users_table: "пользователи".to_string(),
            messages_table: "сообщения".to_string(),
            users_filter: "{Регион}='Россия'".to_string(),
            encryption_key: "test_encryption_key".to_string(),
        }
    }
}

impl ChatConfig {
    /// Load chat store configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_id =
            env::var("AIRTABLE_BASE_ID").map_err(|_| ConfigError::Missing("AIRTABLE_BASE_ID"))?;
        let api_root = env::var("AIRTABLE_API_ROOT")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "https://api.airtable.com/v0".to_string());

        Ok(Self {
            airtable_api_url: format!("{}/{}", api_root, base_id),
            airtable_api_key: env::var("AIRTABLE_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("AIRTABLE_API_KEY"))?,
            users_table: env::var("AIRTABLE_USERS_TABLE")
                .unwrap_or_else(|_| "пользователи".to_string()),
            messages_table: env::var("AIRTABLE_MESSAGES_TABLE")
                .unwrap_or_else(|_| "сообщения".to_string()),
            users_filter: env::var("AIRTABLE_USERS_FILTER")
                .unwrap_or_else(|_| "{Регион}='Россия'".to_string()),
            encryption_key: env::var("CHAT_ENCRYPTION_KEY")
                .map_err(|_| ConfigError::Missing("CHAT_ENCRYPTION_KEY"))?,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

//! Chat collections kept as encrypted blobs in Airtable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Chat participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatUser {
    pub id: String,
    pub name: String,
    /// Fields this crate does not interpret, kept so a save does not drop them.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    /// Absent on attachment-only messages; stays absent after a save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// ISO string or epoch millis, whichever the writer used.
    pub timestamp: serde_json::Value,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Image or video payloads keyed by attachment ID.
pub type Images = BTreeMap<String, String>;

/// Encrypted collection blobs exactly as stored in Airtable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedCollections {
    pub users: String,
    pub messages: String,
    pub images: String,
}

/// Airtable record IDs needed to write collections back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIds {
    pub users_record_id: String,
    pub messages_record_id: String,
}

/// Result of fetching both blob rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppData {
    pub data: EncryptedCollections,
    pub ids: RecordIds,
}

/// Decrypted chat state.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSnapshot {
    pub users: Vec<ChatUser>,
    pub messages: Vec<Message>,
    pub images: Images,
    pub ids: RecordIds,
}

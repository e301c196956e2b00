// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chat store: decrypts collections on load, encrypts them on save.
//!
//! Saves are whole-collection overwrites with no version check, so two
//! writers working from the same load lose one side's changes.

use crate::error::ServiceError;
use crate::models::{ChatSnapshot, Images, Message, RecordIds};
use crate::services::airtable::AirtableService;
use crate::services::crypto::Cipher;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Serialize then encrypt one collection.
pub fn seal_collection<T: Serialize + ?Sized>(
    cipher: &dyn Cipher,
    value: &T,
) -> Result<String, ServiceError> {
    let json = serde_json::to_string(value)?;
    Ok(cipher.encrypt(&json)?)
}

/// Decrypt then deserialize one collection.
///
/// Empty blobs and the unencrypted `[]` / `{}` placeholders of a fresh row
/// load as an empty collection.
pub fn open_collection<T: DeserializeOwned + Default>(
    cipher: &dyn Cipher,
    blob: &str,
) -> Result<T, ServiceError> {
    if blob.is_empty() || blob == "[]" || blob == "{}" {
        return Ok(T::default());
    }

    let json = cipher.decrypt(blob)?;
    if json.is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_str(&json)?)
}

/// Encrypted chat store over one Airtable base.
#[derive(Clone)]
pub struct ChatService {
    store: AirtableService,
    cipher: Arc<dyn Cipher>,
}

impl ChatService {
    pub fn new(store: AirtableService, cipher: Arc<dyn Cipher>) -> Self {
        Self { store, cipher }
    }

    /// Load and decrypt all three collections.
    pub async fn load(&self) -> Result<ChatSnapshot, ServiceError> {
        let app_data = self.store.fetch_all().await?;
        let cipher = self.cipher.as_ref();

        let snapshot = ChatSnapshot {
            users: open_collection(cipher, &app_data.data.users)?,
            messages: open_collection(cipher, &app_data.data.messages)?,
            images: open_collection(cipher, &app_data.data.images)?,
            ids: app_data.ids,
        };

        tracing::debug!(
            users = snapshot.users.len(),
            messages = snapshot.messages.len(),
            images = snapshot.images.len(),
            "Chat collections loaded"
        );
        Ok(snapshot)
    }

    /// Encrypt and write back the messages and images collections.
    pub async fn save_messages(
        &self,
        ids: &RecordIds,
        messages: &[Message],
        images: &Images,
    ) -> Result<(), ServiceError> {
        let cipher = self.cipher.as_ref();
        let encrypted_messages = seal_collection(cipher, messages)?;
        let encrypted_images = seal_collection(cipher, images)?;

        self.store
            .update_messages(&ids.messages_record_id, &encrypted_messages, &encrypted_images)
            .await
    }
}

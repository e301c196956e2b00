// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - vendor clients, mapping and encryption.

pub mod airtable;
pub mod chat;
pub mod crypto;
pub mod mapper;
pub mod notion;
pub mod upstream;

pub use airtable::AirtableService;
pub use chat::ChatService;
pub use crypto::{AesCipher, Cipher, CryptoError};
pub use notion::NotionService;
pub use upstream::{HttpUpstream, TransportError, Upstream, UpstreamRequest, UpstreamResponse};

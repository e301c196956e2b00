// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod chat;
pub mod notion;
pub mod user;

pub use chat::{AppData, ChatSnapshot, ChatUser, EncryptedCollections, Images, Message, RecordIds};
pub use notion::{NotionPage, PropertyBag};
pub use user::{User, UserDraft};

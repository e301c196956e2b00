// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapping between [`User`] and the Notion property bag.
//!
//! Both directions are pure. `avatar_url` is the one field that is cleared
//! remotely when not supplied; the other three are simply left out.

use crate::models::notion::{
    EmailProperty, NotionPage, PropertyBag, RichText, RichTextProperty, TitleProperty, UrlProperty,
};
use crate::models::{User, UserDraft};

/// Fallback avatar for users with no stored avatar.
pub fn placeholder_avatar(id: &str) -> String {
    format!("https://i.pravatar.cc/150?u={}", id)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Build the property bag for a create or update request.
pub fn to_remote(draft: &UserDraft) -> PropertyBag {
    PropertyBag {
        name: non_empty(&draft.name).map(|name| TitleProperty {
            title: vec![RichText::plain(name)],
        }),
        email: non_empty(&draft.email).map(|email| EmailProperty {
            email: Some(email.to_string()),
        }),
        password: non_empty(&draft.password).map(|password| RichTextProperty {
            rich_text: vec![RichText::plain(password)],
        }),
        // Always sent: an absent avatar clears the column.
        avatar: Some(UrlProperty {
            url: non_empty(&draft.avatar_url).map(str::to_string),
        }),
    }
}

/// Flatten a Notion page into a [`User`].
pub fn from_remote(page: &NotionPage) -> User {
    let props = &page.properties;

    let avatar_url = props
        .avatar
        .as_ref()
        .and_then(|a| a.url.as_deref())
        .filter(|url| !url.is_empty())
        .map_or_else(|| placeholder_avatar(&page.id), str::to_string);

    User {
        id: page.id.clone(),
        name: props
            .name
            .as_ref()
            .map_or("", |p| p.first_text())
            .to_string(),
        email: props
            .email
            .as_ref()
            .and_then(|p| p.email.clone())
            .unwrap_or_default(),
        password: props
            .password
            .as_ref()
            .map_or("", |p| p.first_text())
            .to_string(),
        avatar_url: Some(avatar_url),
    }
}

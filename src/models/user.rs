//! User model as seen by the admin UI.

use serde::{Deserialize, Serialize};

/// A user record stored as one page in the Notion database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Notion page ID, assigned by Notion on create
    pub id: String,
    pub name: String,
    pub email: String,
    /// Stored in plaintext in the Notion column
    pub password: String,
    /// Avatar image URL (placeholder when none is stored)
    pub avatar_url: Option<String>,
}

/// Partial user sent on create and update.
///
/// `None` or empty fields are left out of the request, except `avatar_url`
/// which is cleared remotely when not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            name: Some(user.name.clone()),
            email: Some(user.email.clone()),
            password: Some(user.password.clone()),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

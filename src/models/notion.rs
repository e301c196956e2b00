//! Notion page and property shapes for the users database.
//!
//! Only the four columns the admin UI edits are modelled. Unknown fields in
//! Notion responses (annotations, `plain_text`, other columns) are ignored.

use serde::{Deserialize, Serialize};

/// Column holding the user's display name (title property).
pub const NAME_PROPERTY: &str = "Имя";
/// Column holding the email address.
pub const EMAIL_PROPERTY: &str = "Почта";
/// Column holding the password (rich text).
pub const PASSWORD_PROPERTY: &str = "Пароль";
/// Column holding the avatar URL.
pub const AVATAR_PROPERTY: &str = "Аватар";

/// Text content of one rich-text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

/// One rich-text run. Non-text runs (mentions, equations) have no `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

impl RichText {
    pub fn plain(content: &str) -> Self {
        Self {
            text: Some(TextContent {
                content: content.to_string(),
            }),
        }
    }
}

/// First text run of a rich-text array, or `""`.
fn first_run(runs: &[RichText]) -> &str {
    runs.first()
        .and_then(|run| run.text.as_ref())
        .map_or("", |text| text.content.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleProperty {
    #[serde(default)]
    pub title: Vec<RichText>,
}

impl TitleProperty {
    pub fn first_text(&self) -> &str {
        first_run(&self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailProperty {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextProperty {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

impl RichTextProperty {
    pub fn first_text(&self) -> &str {
        first_run(&self.rich_text)
    }
}

/// URL property. Always serialized with its `url` key, so `None` sends an
/// explicit `null` and clears the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlProperty {
    #[serde(default)]
    pub url: Option<String>,
}

/// Properties of one user page, in both directions.
///
/// Absent columns are `None` and are left out when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyBag {
    #[serde(rename = "Имя", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TitleProperty>,
    #[serde(rename = "Почта", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailProperty>,
    #[serde(rename = "Пароль", default, skip_serializing_if = "Option::is_none")]
    pub password: Option<RichTextProperty>,
    #[serde(rename = "Аватар", default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<UrlProperty>,
}

/// A Notion page as returned by query, create, and update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotionPage {
    pub id: String,
    #[serde(default)]
    pub properties: PropertyBag,
}

/// Response of `POST /databases/{id}/query`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<NotionPage>,
}

/// Body of `POST /pages`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePageRequest<'a> {
    pub parent: DatabaseParent<'a>,
    pub properties: PropertyBag,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseParent<'a> {
    pub database_id: &'a str,
}

/// Body of `PATCH /pages/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePageRequest {
    pub properties: PropertyBag,
}

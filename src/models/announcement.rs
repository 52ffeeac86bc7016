// src/models/announcement.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'announcements' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,

    /// Announcement type: 'weekly', 'verse' or 'notice'.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub r#type: String,

    pub title: String,

    /// Body content, sanitized HTML.
    pub content: String,

    /// Optional scripture reference (e.g., "John 3:16").
    pub bible_verse: Option<String>,

    /// Inactive announcements are hidden from the public site.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validates the announcement type enum.
pub fn validate_announcement_type(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "weekly" | "verse" | "notice" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_announcement_type")),
    }
}

fn default_is_active() -> bool {
    true
}

/// DTO for creating an announcement.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    #[serde(rename = "type")]
    #[validate(custom(function = validate_announcement_type))]
    pub r#type: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 20000))]
    pub content: String,
    #[validate(length(max = 200))]
    pub bible_verse: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

/// DTO for updating an announcement. Absent fields are left alone; the
/// bible verse accepts an explicit null to clear the stored value.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnnouncementRequest {
    #[serde(rename = "type")]
    #[validate(custom(function = validate_announcement_type))]
    pub r#type: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 20000))]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[validate(length(max = 200))]
    pub bible_verse: Option<Option<String>>,
    pub is_active: Option<bool>,
}

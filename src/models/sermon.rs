// src/models/sermon.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use super::{double_option, validate_url_string};

/// Represents the 'sermons' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sermon {
    pub id: i64,

    pub title: String,

    pub preacher: String,

    /// Date the sermon was preached (not the upload date).
    pub date: DateTime<Utc>,

    pub video_url: Option<String>,

    pub audio_url: Option<String>,

    /// Sermon notes, sanitized HTML.
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a sermon.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSermonRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub preacher: String,
    pub date: DateTime<Utc>,
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub video_url: Option<String>,
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub audio_url: Option<String>,
    #[validate(length(max = 20000))]
    pub notes: Option<String>,
}

/// DTO for updating a sermon. Absent fields are left alone; the nullable
/// columns accept an explicit null to clear the stored value.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSermonRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub preacher: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub video_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub audio_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 20000))]
    pub notes: Option<Option<String>>,
}

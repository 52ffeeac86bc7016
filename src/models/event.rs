// src/models/event.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use super::{double_option, validate_url_string};

/// Represents the 'events' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,

    pub title: String,

    /// Event description, sanitized HTML.
    pub description: String,

    pub date: DateTime<Utc>,

    /// Free-form display time (e.g., "10:30 AM").
    pub time: Option<String>,

    pub location: Option<String>,

    pub image_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating an event.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 20000))]
    pub description: String,
    pub date: DateTime<Utc>,
    #[validate(length(max = 50))]
    pub time: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub image_url: Option<String>,
}

/// DTO for updating an event. Absent fields are left alone; the nullable
/// columns accept an explicit null to clear the stored value.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 20000))]
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 50))]
    pub time: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 200))]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub image_url: Option<Option<String>>,
}

// src/models/prayer_request.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'prayer_requests' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerRequest {
    pub id: i64,

    /// Optional submitter name; anonymous requests leave it empty.
    pub name: Option<String>,

    pub request: String,

    /// Whether the request may appear on the public prayer wall.
    pub is_public: bool,

    /// 'pending', 'answered' or 'archived'.
    pub status: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validates the prayer request status enum.
pub fn validate_prayer_status(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "pending" | "answered" | "archived" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_prayer_status")),
    }
}

fn default_is_public() -> bool {
    true
}

/// DTO for submitting a prayer request (public form).
/// Status is always 'pending' on creation; only admins move it later.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrayerRequestRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub request: String,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
}

/// DTO for updating a prayer request. Absent fields are left alone; the
/// submitter name accepts an explicit null to anonymize the request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrayerRequestRequest {
    #[serde(default, deserialize_with = "super::double_option")]
    #[validate(length(max = 100))]
    pub name: Option<Option<String>>,
    #[validate(length(min = 1, max = 5000))]
    pub request: Option<String>,
    pub is_public: Option<bool>,
    #[validate(custom(function = validate_prayer_status))]
    pub status: Option<String>,
}

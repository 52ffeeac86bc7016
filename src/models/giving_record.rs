// src/models/giving_record.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'giving_records' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GivingRecord {
    pub id: i64,

    /// Giver's name as recorded by the treasurer.
    pub name: String,

    pub amount: f64,

    /// 'tithe', 'offering', 'donation' or 'other'.
    pub purpose: String,

    /// Date the gift was received.
    pub date: DateTime<Utc>,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validates the giving purpose enum.
pub fn validate_giving_purpose(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "tithe" | "offering" | "donation" | "other" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_giving_purpose")),
    }
}

/// DTO for recording a gift.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGivingRecordRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.01))]
    pub amount: f64,
    #[validate(custom(function = validate_giving_purpose))]
    pub purpose: String,
    pub date: DateTime<Utc>,
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

/// DTO for updating a giving record. Absent fields are left alone; notes
/// accept an explicit null to clear them.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGivingRecordRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0.01))]
    pub amount: Option<f64>,
    #[validate(custom(function = validate_giving_purpose))]
    pub purpose: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[validate(length(max = 5000))]
    pub notes: Option<Option<String>>,
}

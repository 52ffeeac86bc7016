// src/models/visitor.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'visitors' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: i64,

    pub name: String,

    /// Phone number or email, as given on the registration form.
    pub contact: String,

    /// How the visitor discovered the church.
    pub how_found: String,

    pub wants_follow_up: bool,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for the public visitor registration form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVisitorRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub contact: String,
    #[validate(length(min = 1, max = 200))]
    pub how_found: String,
    #[serde(default)]
    pub wants_follow_up: bool,
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

/// DTO for updating a visitor record (admin follow-up tracking). Absent
/// fields are left alone; notes accept an explicit null to clear them.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVisitorRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub contact: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub how_found: Option<String>,
    pub wants_follow_up: Option<bool>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[validate(length(max = 5000))]
    pub notes: Option<Option<String>>,
}

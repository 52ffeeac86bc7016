// src/models/member.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use super::{double_option, ministry::Ministry};

/// Represents the 'members' table in the database.
///
/// `ministries` holds raw Ministry ids. Reads that need the referenced
/// documents resolve them into a [`MemberResponse`]; dangling ids are
/// silently dropped (no referential integrity is enforced on write).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,

    pub full_name: String,

    /// 'Male', 'Female' or 'Other'.
    pub gender: String,

    pub phone: Option<String>,

    pub email: Option<String>,

    pub birthday: Option<NaiveDate>,

    pub baptism_status: bool,

    /// 'Pastor', 'Elder', 'Usher', 'Choir', 'Media', 'Member' or 'Visitor'.
    pub role: String,

    /// Referenced Ministry ids.
    pub ministries: Vec<i64>,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A member with its ministry references resolved (one level deep: the
/// embedded ministries carry raw member ids, not nested members).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub full_name: String,
    pub gender: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub baptism_status: bool,
    pub role: String,
    pub ministries: Vec<Ministry>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemberResponse {
    /// Pairs a member row with its resolved ministries.
    pub fn from_member(member: Member, ministries: Vec<Ministry>) -> Self {
        Self {
            id: member.id,
            full_name: member.full_name,
            gender: member.gender,
            phone: member.phone,
            email: member.email,
            birthday: member.birthday,
            baptism_status: member.baptism_status,
            role: member.role,
            ministries,
            notes: member.notes,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

/// Validates the member gender enum.
pub fn validate_gender(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "Male" | "Female" | "Other" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_gender")),
    }
}

/// Validates the member role enum.
pub fn validate_member_role(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "Pastor" | "Elder" | "Usher" | "Choir" | "Media" | "Member" | "Visitor" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_member_role")),
    }
}

fn default_member_role() -> String {
    "Member".to_string()
}

/// DTO for creating a member.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(custom(function = validate_gender))]
    pub gender: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub baptism_status: bool,
    #[serde(default = "default_member_role")]
    #[validate(custom(function = validate_member_role))]
    pub role: String,
    #[serde(default)]
    pub ministries: Vec<i64>,
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

/// DTO for updating a member. Absent fields are left alone; the nullable
/// columns accept an explicit null to clear the stored value.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: Option<String>,
    #[validate(custom(function = validate_gender))]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 30))]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(email)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub birthday: Option<Option<NaiveDate>>,
    pub baptism_status: Option<bool>,
    #[validate(custom(function = validate_member_role))]
    pub role: Option<String>,
    pub ministries: Option<Vec<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 5000))]
    pub notes: Option<Option<String>>,
}

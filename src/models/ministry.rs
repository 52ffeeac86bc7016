// src/models/ministry.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use super::member::Member;

/// Represents the 'ministries' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ministry {
    pub id: i64,

    pub name: String,

    /// Display name of the ministry leader (not a Member reference).
    pub leader: String,

    pub description: String,

    /// Referenced Member ids.
    pub members: Vec<i64>,

    /// Free-form schedule text (e.g., "Saturdays 4 PM").
    pub meeting_schedule: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A ministry with its member references resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinistryResponse {
    pub id: i64,
    pub name: String,
    pub leader: String,
    pub description: String,
    pub members: Vec<Member>,
    pub meeting_schedule: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MinistryResponse {
    pub fn from_ministry(ministry: Ministry, members: Vec<Member>) -> Self {
        Self {
            id: ministry.id,
            name: ministry.name,
            leader: ministry.leader,
            description: ministry.description,
            members,
            meeting_schedule: ministry.meeting_schedule,
            created_at: ministry.created_at,
            updated_at: ministry.updated_at,
        }
    }
}

/// DTO for creating a ministry.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMinistryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub leader: String,
    #[validate(length(min = 1, max = 20000))]
    pub description: String,
    #[serde(default)]
    pub members: Vec<i64>,
    #[validate(length(max = 200))]
    pub meeting_schedule: Option<String>,
}

/// DTO for updating a ministry. Absent fields are left alone; the meeting
/// schedule accepts an explicit null to clear the stored value.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMinistryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub leader: Option<String>,
    #[validate(length(min = 1, max = 20000))]
    pub description: Option<String>,
    pub members: Option<Vec<i64>>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[validate(length(max = 200))]
    pub meeting_schedule: Option<Option<String>>,
}

// src/models/small_group.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use super::member::Member;

/// Represents the 'small_groups' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmallGroup {
    pub id: i64,

    pub name: String,

    pub leader: String,

    /// Referenced Member ids.
    pub members: Vec<i64>,

    pub location: String,

    /// Free-form meeting time text (e.g., "Fridays 7 PM").
    pub meeting_time: String,

    pub description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A small group with its member references resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmallGroupResponse {
    pub id: i64,
    pub name: String,
    pub leader: String,
    pub members: Vec<Member>,
    pub location: String,
    pub meeting_time: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SmallGroupResponse {
    pub fn from_small_group(group: SmallGroup, members: Vec<Member>) -> Self {
        Self {
            id: group.id,
            name: group.name,
            leader: group.leader,
            members,
            location: group.location,
            meeting_time: group.meeting_time,
            description: group.description,
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

/// DTO for creating a small group.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSmallGroupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub leader: String,
    #[serde(default)]
    pub members: Vec<i64>,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[validate(length(min = 1, max = 100))]
    pub meeting_time: String,
    #[validate(length(min = 1, max = 20000))]
    pub description: String,
}

/// DTO for updating a small group. Fields are optional.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSmallGroupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub leader: Option<String>,
    pub members: Option<Vec<i64>>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub meeting_time: Option<String>,
    #[validate(length(min = 1, max = 20000))]
    pub description: Option<String>,
}

// src/models/admin_user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'admin_users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: i64,

    /// Unique login email.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub name: String,

    /// 'admin' or 'superadmin'. Only superadmins manage admin accounts.
    pub role: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile shape returned by login and embedded in the dashboard session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<AdminUser> for AdminProfile {
    fn from(user: AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

/// Validates the admin role enum.
pub fn validate_admin_role(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "admin" | "superadmin" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_admin_role")),
    }
}

fn default_admin_role() -> String {
    "admin".to_string()
}

/// DTO for admin login. Deliberately unvalidated: a malformed email gets
/// the same "Invalid credentials" response as a wrong password.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// DTO for a superadmin creating an admin account.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters."))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default = "default_admin_role")]
    #[validate(custom(function = validate_admin_role))]
    pub role: String,
}

/// DTO for updating an admin account. Fields are optional.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminUserRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom(function = validate_admin_role))]
    pub role: Option<String>,
}

// src/handlers/auth.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    models::admin_user::{AdminProfile, AdminUser, LoginRequest},
    utils::{hash::verify_password, jwt::sign_jwt},
};

/// Authenticates an admin user and returns a JWT token plus the profile.
///
/// Unknown email and wrong password produce the byte-identical response so
/// that a failed login does not reveal whether the account exists.
pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE email = $1")
        .bind(&payload.email)
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Login DB error: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let user = user.ok_or(AppError::AuthError("Invalid credentials".to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password)?;

    if !is_valid {
        return Err(AppError::AuthError("Invalid credentials".to_string()));
    }

    let token = sign_jwt(
        user.id,
        &user.role,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "admin": AdminProfile::from(user)
    })))
}

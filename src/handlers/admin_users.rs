// src/handlers/admin_users.rs

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use validator::Validate;

use crate::{
    error::AppError,
    models::admin_user::{AdminUser, CreateAdminUserRequest, UpdateAdminUserRequest},
    utils::{hash::hash_password, jwt::Claims},
};

/// Lists all admin accounts. Superadmin only.
/// Password hashes are skipped by serde.
pub async fn list_admin_users(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let users = sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users ORDER BY id DESC")
        .fetch_all(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list admin users: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(users))
}

/// Creates an admin account with a specific role. Superadmin only.
pub async fn create_admin_user(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateAdminUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let hashed_password = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, AdminUser>(
        r#"
        INSERT INTO admin_users (email, password, name, role)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(&payload.email)
    .bind(hashed_password)
    .bind(payload.name)
    .bind(payload.role)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        // Postgres error code for unique violation is 23505
        if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
            AppError::Conflict(format!("Email '{}' already exists", payload.email))
        } else {
            tracing::error!("Failed to create admin user: {:?}", e);
            AppError::from(e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Updates an admin account; a provided password gets rehashed.
/// Superadmin only.
pub async fn update_admin_user(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAdminUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE admin_users SET updated_at = NOW()");

    if let Some(email) = payload.email {
        builder.push(", email = ");
        builder.push_bind(email);
    }
    if let Some(password) = payload.password {
        let hashed = hash_password(&password)?;
        builder.push(", password = ");
        builder.push_bind(hashed);
    }
    if let Some(name) = payload.name {
        builder.push(", name = ");
        builder.push_bind(name);
    }
    if let Some(role) = payload.role {
        builder.push(", role = ");
        builder.push_bind(role);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");

    let user = builder
        .build_query_as::<AdminUser>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
                AppError::Conflict("Email already exists".to_string())
            } else {
                tracing::error!("Failed to update admin user: {:?}", e);
                AppError::from(e)
            }
        })?
        .ok_or(AppError::NotFound("Admin user not found".to_string()))?;

    Ok(Json(user))
}

/// Deletes an admin account by ID. Superadmin only. Prevents deleting self.
pub async fn delete_admin_user(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let current_user_id = claims.sub.parse::<i64>().unwrap_or(0);
    if id == current_user_id {
        return Err(AppError::BadRequest("Cannot delete yourself".to_string()));
    }

    let result = sqlx::query("DELETE FROM admin_users WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete admin user: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Admin user not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

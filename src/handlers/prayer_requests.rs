// src/handlers/prayer_requests.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use validator::Validate;

use crate::{
    error::AppError,
    models::prayer_request::{
        CreatePrayerRequestRequest, PrayerRequest, UpdatePrayerRequestRequest,
    },
};

/// Query parameters for listing prayer requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Exact status filter: 'pending', 'answered' or 'archived'.
    pub status: Option<String>,
    /// When true, only requests marked for the public wall are returned.
    pub is_public: Option<bool>,
}

/// Lists prayer requests, newest first.
pub async fn list_prayer_requests(
    State(pool): State<PgPool>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let public_only = params.is_public.unwrap_or(false);

    let requests = sqlx::query_as::<_, PrayerRequest>(
        r#"
        SELECT * FROM prayer_requests
        WHERE ($1::TEXT IS NULL OR status = $1)
          AND (NOT $2 OR is_public)
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.status)
    .bind(public_only)
    .fetch_all(&pool)
    .await?;

    Ok(Json(requests))
}

/// Retrieves a single prayer request by ID.
pub async fn get_prayer_request(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let request = sqlx::query_as::<_, PrayerRequest>("SELECT * FROM prayer_requests WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Prayer request not found".to_string()))?;

    Ok(Json(request))
}

/// Submits a prayer request. Public route; new requests always start
/// 'pending'.
pub async fn create_prayer_request(
    State(pool): State<PgPool>,
    Json(payload): Json<CreatePrayerRequestRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let request = sqlx::query_as::<_, PrayerRequest>(
        r#"
        INSERT INTO prayer_requests (name, request, is_public)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(payload.name)
    .bind(payload.request)
    .bind(payload.is_public)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create prayer request: {:?}", e);
        AppError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// Updates the provided fields of a prayer request (typically the status)
/// and returns the updated form. Admin only.
pub async fn update_prayer_request(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePrayerRequestRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE prayer_requests SET updated_at = NOW()");

    if let Some(name) = payload.name {
        builder.push(", name = ");
        builder.push_bind(name);
    }
    if let Some(request) = payload.request {
        builder.push(", request = ");
        builder.push_bind(request);
    }
    if let Some(is_public) = payload.is_public {
        builder.push(", is_public = ");
        builder.push_bind(is_public);
    }
    if let Some(status) = payload.status {
        builder.push(", status = ");
        builder.push_bind(status);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");

    let request = builder
        .build_query_as::<PrayerRequest>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update prayer request: {:?}", e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Prayer request not found".to_string()))?;

    Ok(Json(request))
}

/// Deletes a prayer request by ID. Admin only.
pub async fn delete_prayer_request(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM prayer_requests WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete prayer request: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Prayer request not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

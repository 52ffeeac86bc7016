// src/handlers/announcements.rs

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
    models::announcement::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest},
    utils::html::clean_html,
};

/// Query parameters for listing announcements.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// When true, only active announcements are returned.
    pub active: Option<bool>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
}

/// Lists announcements, newest first, optionally restricted to active ones
/// and/or an exact type.
pub async fn list_announcements(
    State(pool): State<PgPool>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let active_only = params.active.unwrap_or(false);

    let announcements = sqlx::query_as::<_, Announcement>(
        r#"
        SELECT * FROM announcements
        WHERE (NOT $1 OR is_active)
          AND ($2::TEXT IS NULL OR type = $2)
        ORDER BY created_at DESC
        "#,
    )
    .bind(active_only)
    .bind(params.r#type)
    .fetch_all(&pool)
    .await?;

    Ok(Json(announcements))
}

/// Retrieves a single announcement by ID.
pub async fn get_announcement(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let announcement = sqlx::query_as::<_, Announcement>("SELECT * FROM announcements WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Announcement not found".to_string()))?;

    Ok(Json(announcement))
}

/// Creates a new announcement. Admin only.
pub async fn create_announcement(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateAnnouncementRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let announcement = sqlx::query_as::<_, Announcement>(
        r#"
        INSERT INTO announcements (type, title, content, bible_verse, is_active)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(payload.r#type)
    .bind(payload.title)
    .bind(clean_html(&payload.content))
    .bind(payload.bible_verse)
    .bind(payload.is_active)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create announcement: {:?}", e);
        AppError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(announcement)))
}

/// Updates the provided fields of an announcement and returns the updated
/// form. Admin only.
pub async fn update_announcement(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAnnouncementRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE announcements SET updated_at = NOW()");

    if let Some(r#type) = payload.r#type {
        builder.push(", type = ");
        builder.push_bind(r#type);
    }
    if let Some(title) = payload.title {
        builder.push(", title = ");
        builder.push_bind(title);
    }
    if let Some(content) = payload.content {
        builder.push(", content = ");
        builder.push_bind(clean_html(&content));
    }
    if let Some(bible_verse) = payload.bible_verse {
        builder.push(", bible_verse = ");
        builder.push_bind(bible_verse);
    }
    if let Some(is_active) = payload.is_active {
        builder.push(", is_active = ");
        builder.push_bind(is_active);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");

    let announcement = builder
        .build_query_as::<Announcement>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update announcement: {:?}", e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Announcement not found".to_string()))?;

    Ok(Json(announcement))
}

/// Deletes an announcement by ID. Admin only.
pub async fn delete_announcement(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete announcement: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Announcement not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

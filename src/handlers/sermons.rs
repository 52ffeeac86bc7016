// src/handlers/sermons.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use validator::Validate;

use crate::{
    error::AppError,
    models::sermon::{CreateSermonRequest, Sermon, UpdateSermonRequest},
    utils::html::clean_html,
};

/// Query parameters for listing sermons.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub preacher: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub limit: Option<i64>,
}

/// Lists sermons, newest first, optionally filtered by preacher
/// (case-insensitive substring) and a date range.
pub async fn list_sermons(
    State(pool): State<PgPool>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let preacher_pattern = params.preacher.map(|p| format!("%{}%", p));
    let date_from = params.date_from.map(|d| d.and_time(NaiveTime::MIN).and_utc());
    let date_to = params.date_to.map(|d| d.and_time(NaiveTime::MIN).and_utc());

    let sermons = sqlx::query_as::<_, Sermon>(
        r#"
        SELECT * FROM sermons
        WHERE ($1::TEXT IS NULL OR preacher ILIKE $1)
          AND ($2::TIMESTAMPTZ IS NULL OR date >= $2)
          AND ($3::TIMESTAMPTZ IS NULL OR date <= $3)
        ORDER BY date DESC
        LIMIT $4
        "#,
    )
    .bind(preacher_pattern)
    .bind(date_from)
    .bind(date_to)
    .bind(params.limit)
    .fetch_all(&pool)
    .await?;

    Ok(Json(sermons))
}

/// Retrieves a single sermon by ID.
pub async fn get_sermon(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let sermon = sqlx::query_as::<_, Sermon>("SELECT * FROM sermons WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Sermon not found".to_string()))?;

    Ok(Json(sermon))
}

/// Creates a new sermon. Admin only.
pub async fn create_sermon(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateSermonRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let notes = payload.notes.map(|n| clean_html(&n));

    let sermon = sqlx::query_as::<_, Sermon>(
        r#"
        INSERT INTO sermons (title, preacher, date, video_url, audio_url, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(payload.title)
    .bind(payload.preacher)
    .bind(payload.date)
    .bind(payload.video_url)
    .bind(payload.audio_url)
    .bind(notes)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create sermon: {:?}", e);
        AppError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(sermon)))
}

/// Updates the provided fields of a sermon and returns the updated form.
/// Admin only.
pub async fn update_sermon(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSermonRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE sermons SET updated_at = NOW()");

    if let Some(title) = payload.title {
        builder.push(", title = ");
        builder.push_bind(title);
    }
    if let Some(preacher) = payload.preacher {
        builder.push(", preacher = ");
        builder.push_bind(preacher);
    }
    if let Some(date) = payload.date {
        builder.push(", date = ");
        builder.push_bind(date);
    }
    if let Some(video_url) = payload.video_url {
        builder.push(", video_url = ");
        builder.push_bind(video_url);
    }
    if let Some(audio_url) = payload.audio_url {
        builder.push(", audio_url = ");
        builder.push_bind(audio_url);
    }
    if let Some(notes) = payload.notes {
        builder.push(", notes = ");
        builder.push_bind(notes.map(|n| clean_html(&n)));
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");

    let sermon = builder
        .build_query_as::<Sermon>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update sermon: {:?}", e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Sermon not found".to_string()))?;

    Ok(Json(sermon))
}

/// Deletes a sermon by ID. Admin only.
pub async fn delete_sermon(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM sermons WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete sermon: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Sermon not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

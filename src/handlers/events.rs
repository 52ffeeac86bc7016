// src/handlers/events.rs

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
    models::event::{CreateEventRequest, Event, UpdateEventRequest},
    utils::html::clean_html,
};

/// Query parameters for listing events.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// When true, only events from now onwards are returned.
    pub upcoming: Option<bool>,
    pub limit: Option<i64>,
}

/// Lists events in chronological order, optionally restricted to upcoming.
pub async fn list_events(
    State(pool): State<PgPool>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let upcoming_only = params.upcoming.unwrap_or(false);

    let events = sqlx::query_as::<_, Event>(
        r#"
        SELECT * FROM events
        WHERE (NOT $1 OR date >= NOW())
        ORDER BY date ASC
        LIMIT $2
        "#,
    )
    .bind(upcoming_only)
    .bind(params.limit)
    .fetch_all(&pool)
    .await?;

    Ok(Json(events))
}

/// Retrieves a single event by ID.
pub async fn get_event(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Event not found".to_string()))?;

    Ok(Json(event))
}

/// Creates a new event. Admin only.
pub async fn create_event(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let event = sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (title, description, date, time, location, image_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(payload.title)
    .bind(clean_html(&payload.description))
    .bind(payload.date)
    .bind(payload.time)
    .bind(payload.location)
    .bind(payload.image_url)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create event: {:?}", e);
        AppError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// Updates the provided fields of an event and returns the updated form.
/// Admin only.
pub async fn update_event(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE events SET updated_at = NOW()");

    if let Some(title) = payload.title {
        builder.push(", title = ");
        builder.push_bind(title);
    }
    if let Some(description) = payload.description {
        builder.push(", description = ");
        builder.push_bind(clean_html(&description));
    }
    if let Some(date) = payload.date {
        builder.push(", date = ");
        builder.push_bind(date);
    }
    if let Some(time) = payload.time {
        builder.push(", time = ");
        builder.push_bind(time);
    }
    if let Some(location) = payload.location {
        builder.push(", location = ");
        builder.push_bind(location);
    }
    if let Some(image_url) = payload.image_url {
        builder.push(", image_url = ");
        builder.push_bind(image_url);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");

    let event = builder
        .build_query_as::<Event>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update event: {:?}", e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Event not found".to_string()))?;

    Ok(Json(event))
}

/// Deletes an event by ID. Admin only.
pub async fn delete_event(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete event: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Event not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

// src/handlers/visitors.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use validator::Validate;

use crate::{
    error::AppError,
    models::visitor::{CreateVisitorRequest, UpdateVisitorRequest, Visitor},
};

/// Lists registered visitors, newest first. Admin only.
pub async fn list_visitors(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let visitors =
        sqlx::query_as::<_, Visitor>("SELECT * FROM visitors ORDER BY created_at DESC")
            .fetch_all(&pool)
            .await?;

    Ok(Json(visitors))
}

/// Retrieves a single visitor by ID. Admin only.
pub async fn get_visitor(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let visitor = sqlx::query_as::<_, Visitor>("SELECT * FROM visitors WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Visitor not found".to_string()))?;

    Ok(Json(visitor))
}

/// Registers a visitor. Public route backing the welcome form.
pub async fn create_visitor(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateVisitorRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let visitor = sqlx::query_as::<_, Visitor>(
        r#"
        INSERT INTO visitors (name, contact, how_found, wants_follow_up, notes)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(payload.name)
    .bind(payload.contact)
    .bind(payload.how_found)
    .bind(payload.wants_follow_up)
    .bind(payload.notes)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create visitor: {:?}", e);
        AppError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(visitor)))
}

/// Updates the provided fields of a visitor record (follow-up tracking)
/// and returns the updated form. Admin only.
pub async fn update_visitor(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateVisitorRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE visitors SET updated_at = NOW()");

    if let Some(name) = payload.name {
        builder.push(", name = ");
        builder.push_bind(name);
    }
    if let Some(contact) = payload.contact {
        builder.push(", contact = ");
        builder.push_bind(contact);
    }
    if let Some(how_found) = payload.how_found {
        builder.push(", how_found = ");
        builder.push_bind(how_found);
    }
    if let Some(wants_follow_up) = payload.wants_follow_up {
        builder.push(", wants_follow_up = ");
        builder.push_bind(wants_follow_up);
    }
    if let Some(notes) = payload.notes {
        builder.push(", notes = ");
        builder.push_bind(notes);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");

    let visitor = builder
        .build_query_as::<Visitor>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update visitor: {:?}", e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Visitor not found".to_string()))?;

    Ok(Json(visitor))
}

/// Deletes a visitor record by ID. Admin only.
pub async fn delete_visitor(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM visitors WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete visitor: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Visitor not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

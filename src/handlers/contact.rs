// src/handlers/contact.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::contact::{ContactMessage, CreateContactMessageRequest},
};

/// Submits a contact form message. Public route.
pub async fn create_contact_message(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateContactMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let message = sqlx::query_as::<_, ContactMessage>(
        r#"
        INSERT INTO contact_messages (name, email, subject, message)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(payload.name)
    .bind(payload.email)
    .bind(payload.subject)
    .bind(payload.message)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create contact message: {:?}", e);
        AppError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Lists contact messages, newest first. Admin only.
pub async fn list_contact_messages(
    State(pool): State<PgPool>,
) -> Result<impl IntoResponse, AppError> {
    let messages = sqlx::query_as::<_, ContactMessage>(
        "SELECT * FROM contact_messages ORDER BY created_at DESC",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(messages))
}

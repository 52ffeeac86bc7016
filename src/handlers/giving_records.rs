// src/handlers/giving_records.rs

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
    models::giving_record::{
        CreateGivingRecordRequest, GivingRecord, UpdateGivingRecordRequest,
    },
};

/// Query parameters for listing giving records.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Exact purpose filter: 'tithe', 'offering', 'donation' or 'other'.
    pub purpose: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Lists giving records, most recent gift first. Admin only.
pub async fn list_giving_records(
    State(pool): State<PgPool>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let date_from = params.date_from.map(|d| d.and_time(NaiveTime::MIN).and_utc());
    let date_to = params.date_to.map(|d| d.and_time(NaiveTime::MIN).and_utc());

    let records = sqlx::query_as::<_, GivingRecord>(
        r#"
        SELECT * FROM giving_records
        WHERE ($1::TEXT IS NULL OR purpose = $1)
          AND ($2::TIMESTAMPTZ IS NULL OR date >= $2)
          AND ($3::TIMESTAMPTZ IS NULL OR date <= $3)
        ORDER BY date DESC
        "#,
    )
    .bind(params.purpose)
    .bind(date_from)
    .bind(date_to)
    .fetch_all(&pool)
    .await?;

    Ok(Json(records))
}

/// Retrieves a single giving record by ID. Admin only.
pub async fn get_giving_record(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let record = sqlx::query_as::<_, GivingRecord>("SELECT * FROM giving_records WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Giving record not found".to_string()))?;

    Ok(Json(record))
}

/// Records a gift. Admin only.
pub async fn create_giving_record(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateGivingRecordRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let record = sqlx::query_as::<_, GivingRecord>(
        r#"
        INSERT INTO giving_records (name, amount, purpose, date, notes)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(payload.name)
    .bind(payload.amount)
    .bind(payload.purpose)
    .bind(payload.date)
    .bind(payload.notes)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create giving record: {:?}", e);
        AppError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Updates the provided fields of a giving record and returns the updated
/// form. Admin only.
pub async fn update_giving_record(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateGivingRecordRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE giving_records SET updated_at = NOW()");

    if let Some(name) = payload.name {
        builder.push(", name = ");
        builder.push_bind(name);
    }
    if let Some(amount) = payload.amount {
        builder.push(", amount = ");
        builder.push_bind(amount);
    }
    if let Some(purpose) = payload.purpose {
        builder.push(", purpose = ");
        builder.push_bind(purpose);
    }
    if let Some(date) = payload.date {
        builder.push(", date = ");
        builder.push_bind(date);
    }
    if let Some(notes) = payload.notes {
        builder.push(", notes = ");
        builder.push_bind(notes);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");

    let record = builder
        .build_query_as::<GivingRecord>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update giving record: {:?}", e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Giving record not found".to_string()))?;

    Ok(Json(record))
}

/// Deletes a giving record by ID. Admin only.
pub async fn delete_giving_record(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM giving_records WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete giving record: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Giving record not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

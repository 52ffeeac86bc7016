// src/handlers/ministries.rs

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
    handlers::members::fetch_members_by_ids,
    models::ministry::{CreateMinistryRequest, Ministry, MinistryResponse, UpdateMinistryRequest},
};

/// Resolves the member references of one ministry row.
async fn populate_ministry(pool: &PgPool, ministry: Ministry) -> Result<MinistryResponse, AppError> {
    let lookup = fetch_members_by_ids(pool, &ministry.members).await?;
    let members = ministry
        .members
        .iter()
        .filter_map(|id| lookup.get(id).cloned())
        .collect();
    Ok(MinistryResponse::from_ministry(ministry, members))
}

/// Lists ministries alphabetically with their members resolved.
pub async fn list_ministries(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let ministries = sqlx::query_as::<_, Ministry>("SELECT * FROM ministries ORDER BY name ASC")
        .fetch_all(&pool)
        .await?;

    let all_ids: Vec<i64> = ministries
        .iter()
        .flat_map(|m| m.members.iter().copied())
        .collect();
    let lookup = fetch_members_by_ids(&pool, &all_ids).await?;

    let responses: Vec<MinistryResponse> = ministries
        .into_iter()
        .map(|ministry| {
            let members = ministry
                .members
                .iter()
                .filter_map(|id| lookup.get(id).cloned())
                .collect();
            MinistryResponse::from_ministry(ministry, members)
        })
        .collect();

    Ok(Json(responses))
}

/// Retrieves a single ministry by ID with members resolved.
pub async fn get_ministry(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let ministry = sqlx::query_as::<_, Ministry>("SELECT * FROM ministries WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Ministry not found".to_string()))?;

    Ok(Json(populate_ministry(&pool, ministry).await?))
}

/// Creates a new ministry. Admin only.
pub async fn create_ministry(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateMinistryRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ministry = sqlx::query_as::<_, Ministry>(
        r#"
        INSERT INTO ministries (name, leader, description, members, meeting_schedule)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(payload.name)
    .bind(payload.leader)
    .bind(payload.description)
    .bind(payload.members)
    .bind(payload.meeting_schedule)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create ministry: {:?}", e);
        AppError::from(e)
    })?;

    let response = populate_ministry(&pool, ministry).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Updates the provided fields of a ministry and returns the updated form
/// with members resolved. Admin only.
pub async fn update_ministry(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateMinistryRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE ministries SET updated_at = NOW()");

    if let Some(name) = payload.name {
        builder.push(", name = ");
        builder.push_bind(name);
    }
    if let Some(leader) = payload.leader {
        builder.push(", leader = ");
        builder.push_bind(leader);
    }
    if let Some(description) = payload.description {
        builder.push(", description = ");
        builder.push_bind(description);
    }
    if let Some(members) = payload.members {
        builder.push(", members = ");
        builder.push_bind(members);
    }
    if let Some(meeting_schedule) = payload.meeting_schedule {
        builder.push(", meeting_schedule = ");
        builder.push_bind(meeting_schedule);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");

    let ministry = builder
        .build_query_as::<Ministry>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update ministry: {:?}", e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Ministry not found".to_string()))?;

    Ok(Json(populate_ministry(&pool, ministry).await?))
}

/// Deletes a ministry by ID. Admin only.
/// Member rows referencing the ministry keep their dangling ids.
pub async fn delete_ministry(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM ministries WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete ministry: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Ministry not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

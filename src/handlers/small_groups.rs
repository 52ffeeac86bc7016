// src/handlers/small_groups.rs

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
    models::small_group::{
        CreateSmallGroupRequest, SmallGroup, SmallGroupResponse, UpdateSmallGroupRequest,
    },
};

/// Resolves the member references of one small group row.
async fn populate_group(pool: &PgPool, group: SmallGroup) -> Result<SmallGroupResponse, AppError> {
    let lookup = fetch_members_by_ids(pool, &group.members).await?;
    let members = group
        .members
        .iter()
        .filter_map(|id| lookup.get(id).cloned())
        .collect();
    Ok(SmallGroupResponse::from_small_group(group, members))
}

/// Lists small groups alphabetically with their members resolved.
pub async fn list_small_groups(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let groups = sqlx::query_as::<_, SmallGroup>("SELECT * FROM small_groups ORDER BY name ASC")
        .fetch_all(&pool)
        .await?;

    let all_ids: Vec<i64> = groups
        .iter()
        .flat_map(|g| g.members.iter().copied())
        .collect();
    let lookup = fetch_members_by_ids(&pool, &all_ids).await?;

    let responses: Vec<SmallGroupResponse> = groups
        .into_iter()
        .map(|group| {
            let members = group
                .members
                .iter()
                .filter_map(|id| lookup.get(id).cloned())
                .collect();
            SmallGroupResponse::from_small_group(group, members)
        })
        .collect();

    Ok(Json(responses))
}

/// Retrieves a single small group by ID with members resolved.
pub async fn get_small_group(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let group = sqlx::query_as::<_, SmallGroup>("SELECT * FROM small_groups WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Small group not found".to_string()))?;

    Ok(Json(populate_group(&pool, group).await?))
}

/// Creates a new small group. Admin only.
pub async fn create_small_group(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateSmallGroupRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let group = sqlx::query_as::<_, SmallGroup>(
        r#"
        INSERT INTO small_groups (name, leader, members, location, meeting_time, description)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(payload.name)
    .bind(payload.leader)
    .bind(payload.members)
    .bind(payload.location)
    .bind(payload.meeting_time)
    .bind(payload.description)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create small group: {:?}", e);
        AppError::from(e)
    })?;

    let response = populate_group(&pool, group).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Updates the provided fields of a small group and returns the updated
/// form with members resolved. Admin only.
pub async fn update_small_group(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSmallGroupRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE small_groups SET updated_at = NOW()");

    if let Some(name) = payload.name {
        builder.push(", name = ");
        builder.push_bind(name);
    }
    if let Some(leader) = payload.leader {
        builder.push(", leader = ");
        builder.push_bind(leader);
    }
    if let Some(members) = payload.members {
        builder.push(", members = ");
        builder.push_bind(members);
    }
    if let Some(location) = payload.location {
        builder.push(", location = ");
        builder.push_bind(location);
    }
    if let Some(meeting_time) = payload.meeting_time {
        builder.push(", meeting_time = ");
        builder.push_bind(meeting_time);
    }
    if let Some(description) = payload.description {
        builder.push(", description = ");
        builder.push_bind(description);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");

    let group = builder
        .build_query_as::<SmallGroup>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update small group: {:?}", e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Small group not found".to_string()))?;

    Ok(Json(populate_group(&pool, group).await?))
}

/// Deletes a small group by ID. Admin only.
pub async fn delete_small_group(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM small_groups WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete small group: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Small group not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

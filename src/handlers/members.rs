// src/handlers/members.rs

use std::collections::HashMap;

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
    models::{
        member::{CreateMemberRequest, Member, MemberResponse, UpdateMemberRequest},
        ministry::Ministry,
    },
};

/// Fetches the members behind a set of ids, keyed by id.
/// Dangling ids are simply absent from the map.
pub(crate) async fn fetch_members_by_ids(
    pool: &PgPool,
    ids: &[i64],
) -> Result<HashMap<i64, Member>, AppError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let members = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;

    Ok(members.into_iter().map(|m| (m.id, m)).collect())
}

/// Fetches the ministries behind a set of ids, keyed by id.
async fn fetch_ministries_by_ids(
    pool: &PgPool,
    ids: &[i64],
) -> Result<HashMap<i64, Ministry>, AppError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let ministries = sqlx::query_as::<_, Ministry>("SELECT * FROM ministries WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;

    Ok(ministries.into_iter().map(|m| (m.id, m)).collect())
}

/// Resolves the ministry references of one member row.
async fn populate_member(pool: &PgPool, member: Member) -> Result<MemberResponse, AppError> {
    let lookup = fetch_ministries_by_ids(pool, &member.ministries).await?;
    let ministries = member
        .ministries
        .iter()
        .filter_map(|id| lookup.get(id).cloned())
        .collect();
    Ok(MemberResponse::from_member(member, ministries))
}

/// Query parameters for listing members.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Exact role filter.
    pub role: Option<String>,
    /// Case-insensitive substring match on name, email or phone.
    pub search: Option<String>,
}

/// Lists members alphabetically with their ministries resolved. Admin only.
pub async fn list_members(
    State(pool): State<PgPool>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let search_pattern = params.search.map(|s| format!("%{}%", s));

    let members = sqlx::query_as::<_, Member>(
        r#"
        SELECT * FROM members
        WHERE ($1::TEXT IS NULL OR role = $1)
          AND ($2::TEXT IS NULL OR full_name ILIKE $2 OR email ILIKE $2 OR phone ILIKE $2)
        ORDER BY full_name ASC
        "#,
    )
    .bind(params.role)
    .bind(search_pattern)
    .fetch_all(&pool)
    .await?;

    // One lookup for the union of all referenced ministries, then fan out.
    let all_ids: Vec<i64> = members
        .iter()
        .flat_map(|m| m.ministries.iter().copied())
        .collect();
    let lookup = fetch_ministries_by_ids(&pool, &all_ids).await?;

    let responses: Vec<MemberResponse> = members
        .into_iter()
        .map(|member| {
            let ministries = member
                .ministries
                .iter()
                .filter_map(|id| lookup.get(id).cloned())
                .collect();
            MemberResponse::from_member(member, ministries)
        })
        .collect();

    Ok(Json(responses))
}

/// Retrieves a single member by ID with ministries resolved. Admin only.
pub async fn get_member(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
        .bind(id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Member not found".to_string()))?;

    Ok(Json(populate_member(&pool, member).await?))
}

/// Creates a new member. Admin only.
pub async fn create_member(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let member = sqlx::query_as::<_, Member>(
        r#"
        INSERT INTO members
        (full_name, gender, phone, email, birthday, baptism_status, role, ministries, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(payload.full_name)
    .bind(payload.gender)
    .bind(payload.phone)
    .bind(payload.email)
    .bind(payload.birthday)
    .bind(payload.baptism_status)
    .bind(payload.role)
    .bind(payload.ministries)
    .bind(payload.notes)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create member: {:?}", e);
        AppError::from(e)
    })?;

    let response = populate_member(&pool, member).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Updates the provided fields of a member and returns the updated form
/// with ministries resolved. Admin only.
pub async fn update_member(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE members SET updated_at = NOW()");

    if let Some(full_name) = payload.full_name {
        builder.push(", full_name = ");
        builder.push_bind(full_name);
    }
    if let Some(gender) = payload.gender {
        builder.push(", gender = ");
        builder.push_bind(gender);
    }
    if let Some(phone) = payload.phone {
        builder.push(", phone = ");
        builder.push_bind(phone);
    }
    if let Some(email) = payload.email {
        builder.push(", email = ");
        builder.push_bind(email);
    }
    if let Some(birthday) = payload.birthday {
        builder.push(", birthday = ");
        builder.push_bind(birthday);
    }
    if let Some(baptism_status) = payload.baptism_status {
        builder.push(", baptism_status = ");
        builder.push_bind(baptism_status);
    }
    if let Some(role) = payload.role {
        builder.push(", role = ");
        builder.push_bind(role);
    }
    if let Some(ministries) = payload.ministries {
        builder.push(", ministries = ");
        builder.push_bind(ministries);
    }
    if let Some(notes) = payload.notes {
        builder.push(", notes = ");
        builder.push_bind(notes);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");

    let member = builder
        .build_query_as::<Member>()
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update member: {:?}", e);
            AppError::from(e)
        })?
        .ok_or(AppError::NotFound("Member not found".to_string()))?;

    Ok(Json(populate_member(&pool, member).await?))
}

/// Deletes a member by ID. Admin only.
/// Ministry and small-group references to the member are left dangling;
/// reads drop them during resolution.
pub async fn delete_member(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM members WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete member: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Member not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use hive_core::policy;
use hive_db::queries::{auditoriums, cinemas};
use hive_types::api::auditoriums::{AuditoriumResponse, CreateAuditoriumRequest, UpdateAuditoriumRequest};
use hive_types::validation::validate_layout;
use hive_types::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::{AppState, AuthPrincipal};
use crate::response::ApiError;

pub async fn list_auditoriums(State(state): State<AppState>) -> Result<Json<Vec<AuditoriumResponse>>, ApiError> {
    let rows = auditoriums::list_auditoriums(&state.db).await.map_err(AppError::from)?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn list_by_cinema(
    State(state): State<AppState>,
    Path(cinema_id): Path<Uuid>,
) -> Result<Json<Vec<AuditoriumResponse>>, ApiError> {
    let rows = auditoriums::list_by_cinema(&state.db, cinema_id)
        .await
        .map_err(AppError::from)?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_auditorium(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AuditoriumResponse>, ApiError> {
    let row = auditoriums::find_by_id(&state.db, id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("auditorium not found".into()))?;
    Ok(Json(row.into()))
}

pub async fn create_auditorium(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Json(payload): Json<CreateAuditoriumRequest>,
) -> Result<(StatusCode, Json<AuditoriumResponse>), ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationFailed(e.to_string()))?;

    let cinema = cinemas::find_by_id(&state.db, payload.cinema_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("cinema not found".into()))?;
    policy::require_owner_or_admin(&cinema, principal.id, &principal.roles)?;

    validate_layout(&payload.layout, payload.max_rows, payload.max_columns)
        .map_err(AppError::ValidationFailed)?;

    let row = auditoriums::create_auditorium(
        &state.db,
        payload.cinema_id,
        &payload.name,
        payload.max_rows,
        payload.max_columns,
        &payload.layout,
        principal.id,
    )
    .await
    .map_err(AppError::from)?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn update_auditorium(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAuditoriumRequest>,
) -> Result<StatusCode, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationFailed(e.to_string()))?;

    let auditorium = auditoriums::find_by_id(&state.db, id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("auditorium not found".into()))?;
    let cinema = cinemas::find_by_id(&state.db, auditorium.cinema_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("cinema not found".into()))?;
    policy::require_owner_or_admin(&cinema, principal.id, &principal.roles)?;

    if let Some(layout) = &payload.layout {
        validate_layout(layout, auditorium.max_rows, auditorium.max_columns)
            .map_err(AppError::ValidationFailed)?;
    }

    auditoriums::update_auditorium(
        &state.db,
        id,
        payload.name.as_deref(),
        payload.layout.as_ref(),
        principal.id,
    )
    .await
    .map_err(AppError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_auditorium(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let auditorium = auditoriums::find_by_id(&state.db, id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("auditorium not found".into()))?;
    let cinema = cinemas::find_by_id(&state.db, auditorium.cinema_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("cinema not found".into()))?;
    policy::require_owner_or_admin(&cinema, principal.id, &principal.roles)?;

    auditoriums::soft_delete_auditorium(&state.db, id, principal.id)
        .await
        .map_err(AppError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

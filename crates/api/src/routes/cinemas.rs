use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use hive_core::policy;
use hive_db::queries::cinemas;
use hive_types::api::cinemas::{CinemaResponse, CreateCinemaRequest, UpdateCinemaRequest, UpdateCinemaStatusQuery};
use hive_types::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::{require_admin, require_organizer_or_admin, AppState, AuthPrincipal};
use crate::response::ApiError;

pub async fn list_cinemas(State(state): State<AppState>) -> Result<Json<Vec<CinemaResponse>>, ApiError> {
    let rows = cinemas::list_cinemas(&state.db).await.map_err(AppError::from)?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_cinema(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CinemaResponse>, ApiError> {
    let row = cinemas::find_by_id(&state.db, id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("cinema not found".into()))?;
    Ok(Json(row.into()))
}

/// `organizerId` is fixed to the creating principal's id and never
/// rewritten afterward.
pub async fn create_cinema(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Json(payload): Json<CreateCinemaRequest>,
) -> Result<(StatusCode, Json<CinemaResponse>), ApiError> {
    require_organizer_or_admin(&principal)?;
    payload
        .validate()
        .map_err(|e| AppError::ValidationFailed(e.to_string()))?;

    let row = cinemas::create_cinema(
        &state.db,
        principal.id,
        &payload.name,
        &payload.location,
        &payload.contact_email,
    )
    .await
    .map_err(AppError::from)?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn update_cinema(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCinemaRequest>,
) -> Result<StatusCode, ApiError> {
    let cinema = cinemas::find_by_id(&state.db, id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("cinema not found".into()))?;
    policy::require_owner_or_admin(&cinema, principal.id, &principal.roles)?;
    payload
        .validate()
        .map_err(|e| AppError::ValidationFailed(e.to_string()))?;

    cinemas::update_cinema(
        &state.db,
        id,
        payload.name.as_deref(),
        payload.location.as_deref(),
        payload.contact_email.as_deref(),
        principal.id,
    )
    .await
    .map_err(AppError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Admin-only approval-status transition.
pub async fn update_cinema_status(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<UpdateCinemaStatusQuery>,
) -> Result<StatusCode, ApiError> {
    require_admin(&principal)?;

    cinemas::set_approval_status(&state.db, id, query.status.as_str(), principal.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("cinema not found".into()))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_cinema(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let cinema = cinemas::find_by_id(&state.db, id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("cinema not found".into()))?;
    policy::require_owner_or_admin(&cinema, principal.id, &principal.roles)?;

    cinemas::soft_delete_cinema(&state.db, id, principal.id)
        .await
        .map_err(AppError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use hive_db::queries::movies;
use hive_types::api::movies::{CreateMovieRequest, MovieResponse, UpdateMovieRequest};
use hive_types::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::{require_organizer_or_admin, AppState, AuthPrincipal};
use crate::response::ApiError;

pub async fn list_movies(State(state): State<AppState>) -> Result<Json<Vec<MovieResponse>>, ApiError> {
    let rows = movies::list_movies(&state.db).await.map_err(AppError::from)?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MovieResponse>, ApiError> {
    let row = movies::find_by_id(&state.db, id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("movie not found".into()))?;
    Ok(Json(row.into()))
}

pub async fn create_movie(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Json(payload): Json<CreateMovieRequest>,
) -> Result<(StatusCode, Json<MovieResponse>), ApiError> {
    require_organizer_or_admin(&principal)?;
    payload
        .validate()
        .map_err(|e| AppError::ValidationFailed(e.to_string()))?;

    let row = movies::create_movie(
        &state.db,
        &payload.title,
        &payload.description,
        payload.duration_minutes,
        payload.release_date,
        payload.poster_url.as_deref(),
        principal.id,
    )
    .await
    .map_err(AppError::from)?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn update_movie(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMovieRequest>,
) -> Result<StatusCode, ApiError> {
    require_organizer_or_admin(&principal)?;
    payload
        .validate()
        .map_err(|e| AppError::ValidationFailed(e.to_string()))?;

    movies::update_movie(
        &state.db,
        id,
        payload.title.as_deref(),
        payload.description.as_deref(),
        payload.duration_minutes,
        payload.release_date,
        payload.poster_url.as_deref(),
        principal.id,
    )
    .await
    .map_err(AppError::from)?
    .ok_or_else(|| AppError::NotFound("movie not found".into()))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_movie(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_organizer_or_admin(&principal)?;

    let affected = movies::soft_delete_movie(&state.db, id, principal.id)
        .await
        .map_err(AppError::from)?;
    if affected == 0 {
        return Err(AppError::NotFound("movie not found".into()).into());
    }

    Ok(StatusCode::NO_CONTENT)
}

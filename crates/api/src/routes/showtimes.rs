use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use hive_core::policy;
use hive_db::queries::{auditoriums, cinemas, showtimes};
use hive_types::api::showtimes::{CreateShowtimeRequest, SeatMapResponse, ShowtimeResponse, UpdateShowtimeRequest};
use hive_types::AppError;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::{AppState, AuthPrincipal};
use crate::response::ApiError;

pub async fn get_seat_map(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SeatMapResponse>, ApiError> {
    let response = state.seat_map_cache.get_or_build(&state.db, id).await?;
    Ok(Json(response))
}

/// Creating a showtime requires the parent cinema to be `Approved`
/// in addition to the owner-or-admin check.
pub async fn create_showtime(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Json(payload): Json<CreateShowtimeRequest>,
) -> Result<(StatusCode, Json<ShowtimeResponse>), ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationFailed(e.to_string()))?;

    let auditorium = auditoriums::find_by_id(&state.db, payload.auditorium_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("auditorium not found".into()))?;
    let cinema = cinemas::find_by_id(&state.db, auditorium.cinema_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("cinema not found".into()))?;
    policy::require_owner_or_admin(&cinema, principal.id, &principal.roles)?;
    policy::require_cinema_approved(&cinema)?;

    let base_price = Decimal::try_from(payload.base_price)
        .map_err(|_| AppError::ValidationFailed("base_price is not a valid decimal".into()))?;
    let seat_count = (auditorium.max_rows * auditorium.max_columns) as usize;

    let row = showtimes::create_showtime(
        &state.db,
        payload.movie_id,
        payload.auditorium_id,
        payload.start_time_utc,
        base_price,
        seat_count,
        principal.id,
    )
    .await
    .map_err(AppError::from)?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

/// Updating or deleting a showtime does not re-check cinema approval — an
/// organizer can still cancel a showtime after the cinema's approval was
/// revoked.
pub async fn update_showtime(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateShowtimeRequest>,
) -> Result<StatusCode, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationFailed(e.to_string()))?;

    let (cinema, _auditorium) = load_owning_cinema(&state, id).await?;
    policy::require_owner_or_admin(&cinema, principal.id, &principal.roles)?;

    let base_price = payload
        .base_price
        .map(Decimal::try_from)
        .transpose()
        .map_err(|_| AppError::ValidationFailed("base_price is not a valid decimal".into()))?;

    showtimes::update_showtime_schedule(&state.db, id, payload.start_time_utc, base_price, principal.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("showtime not found".into()))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_showtime(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let (cinema, _auditorium) = load_owning_cinema(&state, id).await?;
    policy::require_owner_or_admin(&cinema, principal.id, &principal.roles)?;

    showtimes::soft_delete_showtime(&state.db, id, principal.id)
        .await
        .map_err(AppError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

async fn load_owning_cinema(
    state: &AppState,
    showtime_id: Uuid,
) -> Result<(hive_db::models::Cinema, hive_db::models::Auditorium), ApiError> {
    let (_showtime, auditorium) = showtimes::find_with_auditorium(&state.db, showtime_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("showtime not found".into()))?;
    let cinema = cinemas::find_by_id(&state.db, auditorium.cinema_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("cinema not found".into()))?;
    Ok((cinema, auditorium))
}

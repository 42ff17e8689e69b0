use axum::{extract::State, http::StatusCode, Json};
use hive_core::reservation::{confirm_payment, list_my_tickets, reserve};
use hive_types::api::tickets::{MyTicketResponse, PaymentWebhookRequest, ReserveSeatsRequest, TicketResponse};
use hive_types::enums::TicketStatus;
use hive_types::AppError;
use validator::Validate;

use crate::middleware::{AppState, AuthPrincipal};
use crate::response::ApiError;

pub async fn reserve_seats(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
    Json(payload): Json<ReserveSeatsRequest>,
) -> Result<(StatusCode, Json<TicketResponse>), ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationFailed(e.to_string()))?;

    let outcome = reserve(
        &state.db,
        &state.seat_map_cache,
        payload.showtime_id,
        &payload.seats,
        principal.id,
        &principal.email,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(TicketResponse {
            ticket_id: outcome.ticket_id,
            booking_reference: outcome.booking_reference,
            total_amount: outcome.total_amount,
            status: TicketStatus::Pending,
            created_at: outcome.created_at,
        }),
    ))
}

pub async fn my_bookings(
    AuthPrincipal(principal): AuthPrincipal,
    State(state): State<AppState>,
) -> Result<Json<Vec<MyTicketResponse>>, ApiError> {
    let rows = list_my_tickets(&state.db, principal.id).await?;
    Ok(Json(rows))
}

/// Payment-confirmation webhook. Anonymous at the core's contract: provider
/// signature verification belongs to the edge, not here; `actor_id`
/// recorded on the ticket/showtime audit trail is nil since no principal
/// accompanies the webhook.
pub async fn payment_webhook(
    State(state): State<AppState>,
    Json(payload): Json<PaymentWebhookRequest>,
) -> Result<StatusCode, ApiError> {
    confirm_payment(
        &state.db,
        &state.seat_map_cache,
        &payload.booking_reference,
        uuid::Uuid::nil(),
    )
    .await?;

    Ok(StatusCode::OK)
}

use hive_db::{
    queries::{showtimes, tickets},
    PgPool,
};
use hive_types::enums::TicketStatus;
use hive_types::AppError;
use serde_json::json;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use crate::engine::SeatMap;
use crate::seatmap::SeatMapCache;

/// Confirms payment for a pending ticket, marking its seats `Sold`.
///
/// Idempotent on an already-`Confirmed` ticket. Rejects confirming anything
/// other than `Pending` (in particular, a previously `Expired` ticket is
/// never revived) with `InvalidState`.
pub async fn confirm_payment(
    pool: &PgPool,
    cache: &SeatMapCache,
    booking_reference: &str,
    actor_id: Uuid,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let ticket = tickets::find_by_booking_reference_tx(&mut tx, booking_reference)
        .await?
        .ok_or_else(|| AppError::NotFound("ticket not found".into()))?;

    let status = TicketStatus::from_str(&ticket.status)
        .map_err(|_| AppError::Internal(format!("corrupt ticket status: {}", ticket.status)))?;

    if status == TicketStatus::Confirmed {
        tx.rollback().await.ok();
        return Ok(());
    }
    if status != TicketStatus::Pending {
        tx.rollback().await.ok();
        return Err(AppError::InvalidState(format!(
            "cannot confirm a ticket in status {status:?}"
        )));
    }

    let (showtime, auditorium) = showtimes::find_with_auditorium_tx(&mut tx, ticket.showtime_id)
        .await?
        .ok_or_else(|| AppError::NotFound("showtime not found".into()))?;

    let mut buffer = showtime.seat_availability_state.clone();
    let mut map = SeatMap::new(&mut buffer, auditorium.max_rows, auditorium.max_columns);

    for &(row, col) in ticket.reserved_seats() {
        map.mark_sold(row, col)
            .map_err(|e| AppError::Internal(format!("seat state corruption: {e}")))?;
    }

    let updated = showtimes::try_update_seat_buffer(
        &mut tx,
        ticket.showtime_id,
        &buffer,
        showtime.version_token,
        actor_id,
    )
    .await?;
    if !updated {
        tx.rollback().await.ok();
        return Err(AppError::Conflict(hive_types::ConflictReason::Concurrency));
    }

    tickets::mark_confirmed(&mut tx, ticket.id, actor_id).await?;

    // Carries the recipient address directly rather than the bare
    // `userId` the dispatcher would otherwise have to resolve through
    // Identity.
    let payload = json!({
        "recipientEmail": ticket.user_email,
        "subject": "Your Hive Cinemas booking is confirmed",
        "templateCode": "booking-confirmed",
        "variables": {
            "bookingReference": booking_reference,
            "showtimeId": ticket.showtime_id.to_string(),
            "totalAmount": ticket.total_amount.to_string(),
        },
    });
    crate::outbox::write_email_event(&mut tx, &payload).await?;

    tx.commit().await?;
    cache.invalidate(ticket.showtime_id).await;

    info!(ticket_id = %ticket.id, booking_reference, "payment confirmed");
    Ok(())
}

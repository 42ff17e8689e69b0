use chrono::{DateTime, Utc};
use hive_db::{queries::showtimes, queries::tickets, PgPool};
use hive_types::validation::surcharge_map;
use hive_types::{AppError, ConflictReason};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::SeatMap;
use crate::seatmap::SeatMapCache;

use super::booking_reference::generate_booking_reference;

const MAX_BOOKING_REFERENCE_ATTEMPTS: u32 = 3;

pub struct ReserveOutcome {
    pub ticket_id: Uuid,
    pub booking_reference: String,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Reserves a batch of seats on a showtime and writes a `Pending` ticket.
///
/// Loads the showtime+auditorium, attempts an atomic group reservation over
/// the seat buffer, prices the request, and persists the mutated buffer plus
/// a `Pending` ticket in one transaction guarded by the showtime's version
/// token. Never retries on a version conflict; the caller must re-read the
/// seat map.
pub async fn reserve(
    pool: &PgPool,
    cache: &SeatMapCache,
    showtime_id: Uuid,
    seats: &[(i32, i32)],
    user_id: Uuid,
    user_email: &str,
) -> Result<ReserveOutcome, AppError> {
    if seats.is_empty() {
        return Err(AppError::ValidationFailed("seats must not be empty".into()));
    }

    let (showtime, auditorium) = showtimes::find_with_auditorium(pool, showtime_id)
        .await?
        .ok_or_else(|| AppError::NotFound("showtime not found".into()))?;

    for &(row, col) in seats {
        if row < 0 || row >= auditorium.max_rows || col < 0 || col >= auditorium.max_columns {
            return Err(AppError::ValidationFailed(format!(
                "seat ({row},{col}) is out of bounds"
            )));
        }
        if auditorium.layout().is_disabled(row, col) {
            return Err(AppError::ValidationFailed(format!(
                "seat ({row},{col}) is disabled"
            )));
        }
    }

    let mut buffer = showtime.seat_availability_state.clone();
    let mut map = SeatMap::new(&mut buffer, auditorium.max_rows, auditorium.max_columns);

    let reserved = map
        .try_reserve_batch(seats)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !reserved {
        return Err(AppError::Conflict(ConflictReason::SeatsUnavailable));
    }

    let surcharges = surcharge_map(&auditorium.layout().tiers);
    let mut total_amount = Decimal::ZERO;
    for &coord in seats {
        total_amount += showtime.base_price;
        if let Some(s) = surcharges.get(&coord) {
            total_amount += *s;
        }
    }

    let mut last_error = None;
    for attempt in 0..MAX_BOOKING_REFERENCE_ATTEMPTS {
        let booking_reference = generate_booking_reference();

        let mut tx = pool.begin().await?;

        let updated = showtimes::try_update_seat_buffer(
            &mut tx,
            showtime_id,
            &buffer,
            showtime.version_token,
            user_id,
        )
        .await?;
        if !updated {
            tx.rollback().await.ok();
            return Err(AppError::Conflict(ConflictReason::Concurrency));
        }

        let insert_result = tickets::insert_pending_ticket(
            &mut tx,
            user_id,
            user_email,
            showtime_id,
            &booking_reference,
            seats,
            total_amount,
        )
        .await;

        match insert_result {
            Ok(ticket) => {
                tx.commit().await?;
                cache.invalidate(showtime_id).await;
                info!(
                    showtime_id = %showtime_id,
                    ticket_id = %ticket.id,
                    booking_reference = %booking_reference,
                    "reservation confirmed pending"
                );
                return Ok(ReserveOutcome {
                    ticket_id: ticket.id,
                    booking_reference,
                    total_amount,
                    created_at: ticket.created_at,
                });
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tx.rollback().await.ok();
                warn!(attempt, "booking reference collision, regenerating");
                last_error = Some(AppError::Conflict(ConflictReason::DuplicateBookingReference));
                continue;
            }
            Err(e) => return Err(AppError::Database(e)),
        }
    }

    Err(last_error.unwrap_or(AppError::Conflict(ConflictReason::DuplicateBookingReference)))
}

use crate::models::{Ticket, TicketWithShowtime};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{types::Json, PgPool, Postgres, Transaction};
use uuid::Uuid;

#[allow(clippy::too_many_arguments)]
pub async fn insert_pending_ticket(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    user_email: &str,
    showtime_id: Uuid,
    booking_reference: &str,
    reserved_seats: &[(i32, i32)],
    total_amount: Decimal,
) -> Result<Ticket, sqlx::Error> {
    sqlx::query_as::<_, Ticket>(
        r#"
        INSERT INTO tickets
            (id, user_id, user_email, showtime_id, booking_reference, reserved_seats, total_amount, status, created_by, updated_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $2, $2)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(user_email)
    .bind(showtime_id)
    .bind(booking_reference)
    .bind(Json(reserved_seats))
    .bind(total_amount)
    .fetch_one(&mut **tx)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Ticket>, sqlx::Error> {
    sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1 AND is_deleted = false")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_booking_reference_tx(
    tx: &mut Transaction<'_, Postgres>,
    booking_reference: &str,
) -> Result<Option<Ticket>, sqlx::Error> {
    sqlx::query_as::<_, Ticket>(
        "SELECT * FROM tickets WHERE booking_reference = $1 AND is_deleted = false FOR UPDATE",
    )
    .bind(booking_reference)
    .fetch_optional(&mut **tx)
    .await
}

pub async fn mark_confirmed(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    actor_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE tickets
        SET status = 'confirmed', paid_at = NOW(), updated_by = $2, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(actor_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Pending tickets whose hold window has elapsed, joined to their showtime
/// and auditorium dimensions, for the expiry sweep.
#[derive(sqlx::FromRow)]
pub struct ExpirableTicket {
    pub id: Uuid,
    pub showtime_id: Uuid,
    pub reserved_seats: Json<Vec<(i32, i32)>>,
}

pub async fn find_expirable(
    pool: &PgPool,
    cutoff: DateTime<Utc>,
) -> Result<Vec<ExpirableTicket>, sqlx::Error> {
    sqlx::query_as::<_, ExpirableTicket>(
        r#"
        SELECT id, showtime_id, reserved_seats
        FROM tickets
        WHERE status = 'pending' AND created_at < $1 AND is_deleted = false
        "#,
    )
    .bind(cutoff)
    .fetch_all(pool)
    .await
}

pub async fn mark_expired_batch(
    tx: &mut Transaction<'_, Postgres>,
    ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE tickets SET status = 'expired', updated_at = NOW() WHERE id = ANY($1)")
        .bind(ids)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn list_user_tickets(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<TicketWithShowtime>, sqlx::Error> {
    sqlx::query_as::<_, TicketWithShowtime>(
        r#"
        SELECT
            t.id, t.booking_reference, t.reserved_seats, t.total_amount, t.status,
            t.created_at, t.paid_at,
            m.title AS movie_title, c.name AS cinema_name, a.name AS auditorium_name,
            s.start_time_utc
        FROM tickets t
        JOIN showtimes s ON s.id = t.showtime_id
        JOIN auditoriums a ON a.id = s.auditorium_id
        JOIN cinemas c ON c.id = a.cinema_id
        JOIN movies m ON m.id = s.movie_id
        WHERE t.user_id = $1 AND t.is_deleted = false
        ORDER BY t.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

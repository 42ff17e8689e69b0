use hive_db::{queries::tickets, PgPool};
use hive_types::api::tickets::MyTicketResponse;
use hive_types::enums::TicketStatus;
use hive_types::AppError;
use std::str::FromStr;
use uuid::Uuid;

/// Lists a user's tickets. Never fails for an unknown user; an
/// unrecognized principal simply has no tickets.
pub async fn list_my_tickets(pool: &PgPool, user_id: Uuid) -> Result<Vec<MyTicketResponse>, AppError> {
    let rows = tickets::list_user_tickets(pool, user_id).await?;

    rows.into_iter()
        .map(|row| {
            let status = TicketStatus::from_str(&row.status)
                .map_err(|_| AppError::Internal(format!("corrupt ticket status: {}", row.status)))?;
            Ok(MyTicketResponse {
                ticket_id: row.id,
                booking_reference: row.booking_reference,
                movie_title: row.movie_title,
                cinema_name: row.cinema_name,
                auditorium_name: row.auditorium_name,
                start_time_utc: row.start_time_utc,
                reserved_seats: row.reserved_seats.0,
                total_amount: row.total_amount,
                status,
                created_at: row.created_at,
                paid_at: row.paid_at,
            })
        })
        .collect()
}

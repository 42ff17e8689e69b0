use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Captured at reservation time from the principal, so confirming a
    /// ticket never has to resolve `user_id` back to an address through
    /// Identity.
    pub user_email: String,
    pub showtime_id: Uuid,
    /// `HIVE-` followed by 8 uppercase hex characters; unique-indexed.
    pub booking_reference: String,
    /// Embedded JSON list, read-together with the ticket.
    pub reserved_seats: sqlx::types::Json<Vec<(i32, i32)>>,
    pub total_amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Ticket {
    pub fn reserved_seats(&self) -> &[(i32, i32)] {
        &self.reserved_seats.0
    }
}

/// Denormalized join row for "my bookings" and admin listings.
#[derive(Debug, Clone, FromRow)]
pub struct TicketWithShowtime {
    pub id: Uuid,
    pub booking_reference: String,
    pub reserved_seats: sqlx::types::Json<Vec<(i32, i32)>>,
    pub total_amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub movie_title: String,
    pub cinema_name: String,
    pub auditorium_name: String,
    pub start_time_utc: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::enums::TicketStatus;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReserveSeatsRequest {
    pub showtime_id: Uuid,
    #[validate(length(min = 1, max = 20))]
    pub seats: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../bindings/")]
pub struct TicketResponse {
    pub ticket_id: Uuid,
    pub booking_reference: String,
    #[ts(type = "number")]
    pub total_amount: Decimal,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

/// Denormalized "my bookings" read row, joined to movie/cinema/auditorium
/// names.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../bindings/")]
pub struct MyTicketResponse {
    pub ticket_id: Uuid,
    pub booking_reference: String,
    pub movie_title: String,
    pub cinema_name: String,
    pub auditorium_name: String,
    pub start_time_utc: DateTime<Utc>,
    pub reserved_seats: Vec<(i32, i32)>,
    #[ts(type = "number")]
    pub total_amount: Decimal,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PaymentWebhookRequest {
    pub booking_reference: String,
    /// Provider transaction id, carried through for audit but not
    /// interpreted by the core (signature
    /// verification belongs to the edge).
    pub provider_transaction_id: String,
    pub status: String,
}

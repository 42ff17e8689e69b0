use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Showtime {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub auditorium_id: Uuid,
    pub start_time_utc: DateTime<Utc>,
    pub base_price: Decimal,
    /// Raw per-seat availability buffer, one byte per cell, row-major,
    /// length always `max_rows * max_columns`.
    pub seat_availability_state: Vec<u8>,
    /// Strictly increases on every persisted mutation. The sole
    /// optimistic-concurrency primitive for this row; never a
    /// `SELECT ... FOR UPDATE` lock.
    pub version_token: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

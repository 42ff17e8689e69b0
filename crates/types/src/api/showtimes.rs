use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::enums::SeatStatus;

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../bindings/")]
pub struct ShowtimeResponse {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub auditorium_id: Uuid,
    pub start_time_utc: DateTime<Utc>,
    #[ts(type = "number")]
    pub base_price: Decimal,
    pub version_token: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShowtimeRequest {
    pub movie_id: Uuid,
    pub auditorium_id: Uuid,
    pub start_time_utc: DateTime<Utc>,
    #[validate(range(min = 0.0))]
    pub base_price: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateShowtimeRequest {
    pub start_time_utc: Option<DateTime<Utc>>,
    #[validate(range(min = 0.0))]
    pub base_price: Option<f64>,
}

/// One rendered cell in a showtime's seat map, in row-major order.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../bindings/")]
pub struct SeatCellDto {
    pub row: i32,
    pub col: i32,
    pub status: SeatStatus,
}

/// Denormalized read model for the showtime seat-map endpoint. Built from
/// the showtime + movie + auditorium + cinema join and cached by TTL.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../bindings/")]
pub struct SeatMapResponse {
    pub showtime_id: Uuid,
    pub movie_title: String,
    pub cinema_name: String,
    pub auditorium_name: String,
    pub start_time_utc: DateTime<Utc>,
    pub max_rows: i32,
    pub max_columns: i32,
    #[ts(type = "number")]
    pub base_price: Decimal,
    pub cells: Vec<SeatCellDto>,
}

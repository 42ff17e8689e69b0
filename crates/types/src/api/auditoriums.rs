use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A named set of coordinates sharing one non-negative price surcharge.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../bindings/")]
pub struct TierDto {
    pub tier_name: String,
    #[ts(type = "number")]
    pub price_surcharge: Decimal,
    pub seats: Vec<(i32, i32)>,
}

/// The embedded layout document on an auditorium row: disabled seats
/// (holes), wheelchair spots (informational), and pricing tiers.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export, export_to = "../../../bindings/")]
pub struct LayoutDto {
    #[serde(default)]
    pub disabled_seats: Vec<(i32, i32)>,
    #[serde(default)]
    pub wheelchair_spots: Vec<(i32, i32)>,
    #[serde(default)]
    pub tiers: Vec<TierDto>,
}

impl LayoutDto {
    pub fn is_disabled(&self, row: i32, col: i32) -> bool {
        self.disabled_seats.contains(&(row, col))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../bindings/")]
pub struct AuditoriumResponse {
    pub id: Uuid,
    pub cinema_id: Uuid,
    pub name: String,
    pub max_rows: i32,
    pub max_columns: i32,
    pub layout: LayoutDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuditoriumRequest {
    pub cinema_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 200))]
    pub max_rows: i32,
    #[validate(range(min = 1, max = 200))]
    pub max_columns: i32,
    #[serde(default)]
    pub layout: LayoutDto,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuditoriumRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub layout: Option<LayoutDto>,
}

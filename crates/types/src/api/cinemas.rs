use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::enums::ApprovalStatus;

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export, export_to = "../../../bindings/")]
pub struct CinemaResponse {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub name: String,
    pub location: String,
    pub contact_email: String,
    pub approval_status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCinemaRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 300))]
    pub location: String,
    #[validate(email)]
    pub contact_email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCinemaRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub location: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCinemaStatusQuery {
    pub status: ApprovalStatus,
}

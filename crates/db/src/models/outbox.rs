use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A staged domain event. Written in the same transaction as the business
/// change that produced it; claimed and published by the dispatcher worker.
/// Append-only — never soft-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OutboxMessage {
    pub id: Uuid,
    pub event_type: String,
    pub payload: sqlx::types::Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub processing_at: Option<DateTime<Utc>>,
    pub processed_at: Option<DateTime<Utc>>,
    pub retry_count: i32,
    pub error_message: Option<String>,
}

pub mod event_types {
    pub const EMAIL_NOTIFICATION: &str = "EmailNotification";
}

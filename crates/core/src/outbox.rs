//! Thin core-side wrapper over the storage-level outbox insert, kept here
//! (rather than called directly from `hive-db`) so every event producer
//! goes through one place that names its event types.

use hive_db::{models::event_types, queries::outbox};
use serde_json::Value;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

pub async fn write_email_event(
    tx: &mut Transaction<'_, Postgres>,
    payload: &Value,
) -> Result<Uuid, sqlx::Error> {
    outbox::insert_event(tx, event_types::EMAIL_NOTIFICATION, payload).await
}

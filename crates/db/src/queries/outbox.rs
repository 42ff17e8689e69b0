use crate::models::OutboxMessage;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{types::Json, PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Inserts a domain event within the caller's transaction, so the event
/// only becomes visible if the business change that produced it commits.
pub async fn insert_event(
    tx: &mut Transaction<'_, Postgres>,
    event_type: &str,
    payload: &Value,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::now_v7();
    sqlx::query(
        r#"
        INSERT INTO outbox_messages (id, event_type, payload)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(id)
    .bind(event_type)
    .bind(Json(payload))
    .execute(&mut **tx)
    .await?;
    Ok(id)
}

/// Clears the `processing_at` sentinel on rows claimed longer than
/// `stuck_timeout` ago, so they are reclaimed on the next pass.
pub async fn reset_stuck(pool: &PgPool, stuck_before: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE outbox_messages
        SET processing_at = NULL
        WHERE processing_at IS NOT NULL AND processed_at IS NULL AND processing_at < $1
        "#,
    )
    .bind(stuck_before)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Claims up to `limit` unclaimed, unprocessed, un-poisoned rows using
/// `FOR UPDATE SKIP LOCKED`, preventing two dispatchers from claiming the
/// same row.
pub async fn claim_batch(
    pool: &PgPool,
    limit: i64,
    max_retries: i32,
) -> Result<Vec<OutboxMessage>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query_as::<_, OutboxMessage>(
        r#"
        SELECT * FROM outbox_messages
        WHERE processed_at IS NULL AND processing_at IS NULL AND retry_count < $2
        ORDER BY created_at ASC
        LIMIT $1
        FOR UPDATE SKIP LOCKED
        "#,
    )
    .bind(limit)
    .bind(max_retries)
    .fetch_all(&mut *tx)
    .await?;

    if !rows.is_empty() {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        sqlx::query("UPDATE outbox_messages SET processing_at = NOW() WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(rows)
}

pub async fn mark_processed(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE outbox_messages SET processed_at = NOW(), error_message = NULL WHERE id = $1",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Records a failed publish attempt. Once `retry_count` reaches
/// `max_retries` the row is marked `processed_at` (poisoned: terminal, but
/// still auditable) rather than retried again step 3.
pub async fn record_failure(
    pool: &PgPool,
    id: Uuid,
    error_message: &str,
    max_retries: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE outbox_messages
        SET retry_count = retry_count + 1,
            error_message = $2,
            processing_at = NULL,
            processed_at = CASE WHEN retry_count + 1 >= $3 THEN NOW() ELSE NULL END
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(error_message)
    .bind(max_retries)
    .execute(pool)
    .await?;
    Ok(())
}

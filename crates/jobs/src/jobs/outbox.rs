use hive_db::{queries::outbox, PgPool};
use hive_integrations::broker::{BrokerPublisher, EmailNotificationPayload};
use hive_types::config::OutboxConfig;

/// One outbox-dispatcher tick: reset stuck claims, claim a
/// batch with `FOR UPDATE SKIP LOCKED`, publish each row, and record the
/// outcome. A publish failure never aborts the batch — it only affects
/// that row's own retry bookkeeping.
pub async fn run_dispatch_tick(
    pool: &PgPool,
    publisher: &BrokerPublisher,
    config: &OutboxConfig,
) -> anyhow::Result<()> {
    let stuck_before = chrono::Utc::now() - chrono::Duration::from_std(config.stuck_timeout)?;
    let reset = outbox::reset_stuck(pool, stuck_before).await?;
    if reset > 0 {
        tracing::warn!(count = reset, "reclaimed stuck outbox rows");
    }

    let batch = outbox::claim_batch(pool, config.batch_size, config.max_retries).await?;
    if batch.is_empty() {
        return Ok(());
    }

    tracing::debug!(count = batch.len(), "claimed outbox batch");

    for row in batch {
        let payload: EmailNotificationPayload = match serde_json::from_value(row.payload.0.clone()) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(outbox_id = %row.id, error = %e, "poisoning outbox row with unparseable payload");
                outbox::record_failure(pool, row.id, &e.to_string(), config.max_retries).await?;
                continue;
            }
        };

        match publisher.publish_email_notification(row.id, &payload).await {
            Ok(()) => {
                outbox::mark_processed(pool, row.id).await?;
                tracing::info!(outbox_id = %row.id, event_type = %row.event_type, "dispatched outbox event");
            }
            Err(e) => {
                tracing::warn!(outbox_id = %row.id, retry_count = row.retry_count, error = %e, "publish failed, will retry");
                outbox::record_failure(pool, row.id, &e.to_string(), config.max_retries).await?;
            }
        }
    }

    Ok(())
}

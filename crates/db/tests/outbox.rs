//! Integration coverage for the outbox claim/retry/poison state machine
//! (spec.md §8's retry-then-poison scenario), exercised directly against
//! the claim-batch/record-failure/reset-stuck SQL rather than through the
//! dispatcher's broker call — the scenario is a property of this SQL, not
//! of the publish step.

use chrono::Utc;
use hive_db::queries::outbox;
use hive_db::PgPool;
use serde_json::json;

#[sqlx::test]
async fn claim_retries_then_poisons_at_max_retries(pool: PgPool) {
    let payload = json!({"recipientEmail": "user@example.com"});
    let mut tx = pool.begin().await.unwrap();
    let id = outbox::insert_event(&mut tx, "EmailNotification", &payload).await.unwrap();
    tx.commit().await.unwrap();

    let max_retries = 3;
    for attempt in 1..=max_retries {
        let claimed = outbox::claim_batch(&pool, 10, max_retries).await.unwrap();
        assert_eq!(claimed.len(), 1, "row should still be claimable before poisoning (attempt {attempt})");
        assert_eq!(claimed[0].id, id);

        outbox::record_failure(&pool, id, "publish failed", max_retries).await.unwrap();
    }

    // Poisoned at max_retries: terminal, no longer claimed by the dispatcher,
    // but the row stays (auditable) rather than being deleted.
    let claimed = outbox::claim_batch(&pool, 10, max_retries).await.unwrap();
    assert!(claimed.is_empty());

    let row: (i32, Option<chrono::DateTime<Utc>>, Option<String>) = sqlx::query_as(
        "SELECT retry_count, processed_at, error_message FROM outbox_messages WHERE id = $1",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(row.0, max_retries);
    assert!(row.1.is_some(), "poisoned row must have processed_at set");
    assert_eq!(row.2.as_deref(), Some("publish failed"));
}

#[sqlx::test]
async fn failures_under_max_retries_stay_reclaimable_and_mark_processed_clears_error(pool: PgPool) {
    let payload = json!({"recipientEmail": "user@example.com"});
    let mut tx = pool.begin().await.unwrap();
    let id = outbox::insert_event(&mut tx, "EmailNotification", &payload).await.unwrap();
    tx.commit().await.unwrap();

    let claimed = outbox::claim_batch(&pool, 10, 5).await.unwrap();
    assert_eq!(claimed.len(), 1);
    outbox::record_failure(&pool, id, "temporary broker outage", 5).await.unwrap();

    let claimed = outbox::claim_batch(&pool, 10, 5).await.unwrap();
    assert_eq!(claimed.len(), 1, "a row under max_retries is reclaimable after a failed attempt");
    outbox::mark_processed(&pool, id).await.unwrap();

    let claimed = outbox::claim_batch(&pool, 10, 5).await.unwrap();
    assert!(claimed.is_empty());

    let row: (Option<chrono::DateTime<Utc>>, Option<String>) =
        sqlx::query_as("SELECT processed_at, error_message FROM outbox_messages WHERE id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(row.0.is_some());
    assert!(row.1.is_none(), "mark_processed clears any error left over from an earlier failure");
}

#[sqlx::test]
async fn reset_stuck_reclaims_rows_abandoned_by_a_crashed_dispatcher(pool: PgPool) {
    let payload = json!({"recipientEmail": "user@example.com"});
    let mut tx = pool.begin().await.unwrap();
    let id = outbox::insert_event(&mut tx, "EmailNotification", &payload).await.unwrap();
    tx.commit().await.unwrap();

    let claimed = outbox::claim_batch(&pool, 10, 5).await.unwrap();
    assert_eq!(claimed.len(), 1);

    // Simulate a dispatcher that claimed the row, then crashed before
    // recording success or failure: back-date `processing_at` rather than
    // waiting for the real stuck timeout to elapse.
    sqlx::query("UPDATE outbox_messages SET processing_at = $2 WHERE id = $1")
        .bind(id)
        .bind(Utc::now() - chrono::Duration::minutes(10))
        .execute(&pool)
        .await
        .unwrap();

    let reset = outbox::reset_stuck(&pool, Utc::now() - chrono::Duration::minutes(5)).await.unwrap();
    assert_eq!(reset, 1);

    let claimed = outbox::claim_batch(&pool, 10, 5).await.unwrap();
    assert_eq!(claimed.len(), 1);
    assert_eq!(claimed[0].id, id);
}

//! The expiry sweep. One tick releases every `Pending`
//! ticket whose hold window has elapsed. A version conflict on one showtime
//! is logged and skipped, never aborts the sweep — it is retried on the
//! next tick.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use hive_db::{
    queries::{showtimes, tickets},
    PgPool,
};
use tracing::warn;
use uuid::Uuid;

use crate::engine::SeatMap;
use crate::seatmap::SeatMapCache;

pub struct SweepReport {
    pub expired_tickets: usize,
    pub skipped_showtimes: usize,
}

pub async fn sweep_expired_holds(
    pool: &PgPool,
    cache: &SeatMapCache,
    hold_window: Duration,
) -> Result<SweepReport, sqlx::Error> {
    let cutoff = Utc::now() - chrono::Duration::from_std(hold_window).unwrap_or(chrono::Duration::minutes(10));
    let expirable = tickets::find_expirable(pool, cutoff).await?;

    let mut by_showtime: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for ticket in &expirable {
        by_showtime.entry(ticket.showtime_id).or_default().push(ticket.id);
    }

    let mut report = SweepReport { expired_tickets: 0, skipped_showtimes: 0 };

    for (showtime_id, ticket_ids) in by_showtime {
        let tickets_for_showtime: Vec<_> =
            expirable.iter().filter(|t| ticket_ids.contains(&t.id)).collect();

        let Some((showtime, auditorium)) = showtimes::find_with_auditorium(pool, showtime_id).await? else {
            continue;
        };

        let mut buffer = showtime.seat_availability_state.clone();
        {
            let mut map = SeatMap::new(&mut buffer, auditorium.max_rows, auditorium.max_columns);
            for ticket in &tickets_for_showtime {
                for &(row, col) in &ticket.reserved_seats.0 {
                    // Already Available (re-entry race) or Sold (concurrent
                    // confirmation) cells are skipped silently — the
                    // tolerated idempotency point.
                    let _ = map.release(row, col);
                }
            }
        }

        let mut tx = pool.begin().await?;
        let updated = showtimes::try_update_seat_buffer(
            &mut tx,
            showtime_id,
            &buffer,
            showtime.version_token,
            // system actor: expiry sweep has no human principal
            Uuid::nil(),
        )
        .await?;

        if !updated {
            tx.rollback().await.ok();
            warn!(showtime_id = %showtime_id, "version conflict during expiry sweep, retrying next tick");
            report.skipped_showtimes += 1;
            continue;
        }

        tickets::mark_expired_batch(&mut tx, &ticket_ids).await?;
        tx.commit().await?;

        cache.invalidate(showtime_id).await;
        report.expired_tickets += ticket_ids.len();
    }

    Ok(report)
}

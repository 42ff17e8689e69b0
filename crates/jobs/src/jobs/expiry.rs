use hive_core::expiry::sweep_expired_holds;
use hive_core::SeatMapCache;
use hive_db::PgPool;
use hive_types::config::Config;

/// Runs one expiry-sweep tick. Errors in one showtime never
/// abort the sweep — `sweep_expired_holds` already absorbs per-showtime
/// version conflicts; this wrapper only logs the aggregate outcome.
pub async fn run_expiry_sweep(pool: &PgPool, cache: &SeatMapCache, config: &Config) -> anyhow::Result<()> {
    let report = sweep_expired_holds(pool, cache, config.reservation_hold_window).await?;

    if report.expired_tickets > 0 || report.skipped_showtimes > 0 {
        tracing::info!(
            expired_tickets = report.expired_tickets,
            skipped_showtimes = report.skipped_showtimes,
            "expiry sweep tick complete"
        );
    } else {
        tracing::debug!("expiry sweep tick complete, nothing to expire");
    }

    Ok(())
}

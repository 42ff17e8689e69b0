mod jobs;

use hive_core::SeatMapCache;
use hive_integrations::broker::BrokerPublisher;
use hive_types::Config;
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Builds a 6-field (seconds-resolution) cron expression from a tick
/// interval. Sub-minute intervals tick on every Nth second; minute-scale
/// intervals round down to the nearest whole minute and tick at :00.
fn cron_expression(interval: Duration) -> String {
    let secs = interval.as_secs().max(1);
    if secs < 60 {
        format!("*/{secs} * * * * *")
    } else {
        format!("0 */{} * * * *", (secs / 60).max(1))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hive_jobs=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hive Cinemas background jobs...");

    let config = Config::from_env()?;

    let pool = hive_db::create_pool(&config.storage_connection).await?;
    hive_db::run_migrations(&pool).await?;
    tracing::info!("✓ Database connection established, migrations applied");

    let publisher = BrokerPublisher::connect(&config.broker).await?;
    tracing::info!("✓ Broker connection established");

    // This worker runs as its own process, separate from `hive-api`'s in-
    // memory seat-map cache. Calling `invalidate` here only
    // clears this process's own, otherwise-unread cache instance; staleness
    // on the API side is instead bounded by the 60s TTL. See DESIGN.md for
    // the full rationale.
    let seat_map_cache = SeatMapCache::new(config.seat_map_cache_ttl);

    let scheduler = JobScheduler::new().await?;

    let expiry_schedule = cron_expression(config.expiry_tick_interval);
    let expiry_pool = pool.clone();
    let expiry_cache = seat_map_cache.clone();
    let expiry_config = config.clone();
    let expiry_job = Job::new_async(expiry_schedule.as_str(), move |_uuid, _l| {
        let pool = expiry_pool.clone();
        let cache = expiry_cache.clone();
        let config = expiry_config.clone();
        Box::pin(async move {
            if let Err(e) = jobs::run_expiry_sweep(&pool, &cache, &config).await {
                tracing::error!("expiry sweep tick failed: {e}");
            }
        })
    })?;
    scheduler.add(expiry_job).await?;
    tracing::info!(
        "✓ Registered job: expiry sweep ({expiry_schedule}, hold window {:?})",
        config.reservation_hold_window
    );

    let dispatch_schedule = cron_expression(config.outbox.tick_interval);
    let dispatch_pool = pool.clone();
    let dispatch_publisher = publisher.clone();
    let dispatch_config = config.outbox.clone();
    let dispatch_job = Job::new_async(dispatch_schedule.as_str(), move |_uuid, _l| {
        let pool = dispatch_pool.clone();
        let publisher = dispatch_publisher.clone();
        let config = dispatch_config.clone();
        Box::pin(async move {
            if let Err(e) = jobs::run_dispatch_tick(&pool, &publisher, &config).await {
                tracing::error!("outbox dispatch tick failed: {e}");
            }
        })
    })?;
    scheduler.add(dispatch_job).await?;
    tracing::info!(
        "✓ Registered job: outbox dispatcher ({dispatch_schedule}, batch {})",
        config.outbox.batch_size
    );

    scheduler.start().await?;
    tracing::info!("✓ Job scheduler started");

    // Background jobs start after migrations complete;
    // shutdown is out of scope for this single-process scheduler loop, so
    // the process simply runs until killed, finishing its current tick.
    loop {
        tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
    }
}

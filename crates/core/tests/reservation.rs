//! Integration coverage for the reservation/confirm/expiry scenarios in
//! spec.md §8 that the unit tests in `engine.rs` can't reach on their own:
//! the CAS interaction between the in-memory seat map and the
//! `version_token`-guarded persistence layer. Runs against a real,
//! migrated, ephemeral Postgres database per test.

use chrono::Utc;
use hive_core::expiry::sweep_expired_holds;
use hive_core::reservation::{confirm_payment, reserve};
use hive_core::seatmap::SeatMapCache;
use hive_db::queries::{auditoriums, cinemas, movies, showtimes, tickets};
use hive_db::PgPool;
use hive_types::api::auditoriums::{LayoutDto, TierDto};
use hive_types::enums::TicketStatus;
use hive_types::{AppError, ConflictReason};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

async fn make_showtime(
    pool: &PgPool,
    max_rows: i32,
    max_columns: i32,
    base_price: Decimal,
    layout: LayoutDto,
) -> Uuid {
    let actor = Uuid::now_v7();

    let movie = movies::create_movie(
        pool,
        "Test Movie",
        "A movie for tests",
        120,
        Utc::now().date_naive(),
        None,
        actor,
    )
    .await
    .unwrap();

    let cinema = cinemas::create_cinema(pool, actor, "Test Cinema", "Nowhere", "cinema@example.com")
        .await
        .unwrap();

    let auditorium =
        auditoriums::create_auditorium(pool, cinema.id, "Hall 1", max_rows, max_columns, &layout, actor)
            .await
            .unwrap();

    let showtime = showtimes::create_showtime(
        pool,
        movie.id,
        auditorium.id,
        Utc::now() + chrono::Duration::days(1),
        base_price,
        (max_rows * max_columns) as usize,
        actor,
    )
    .await
    .unwrap();

    showtime.id
}

#[sqlx::test(migrations = "../db/migrations")]
async fn happy_reserve_prices_tier_surcharges(pool: PgPool) {
    let layout = LayoutDto {
        tiers: vec![TierDto {
            tier_name: "vip".into(),
            price_surcharge: Decimal::new(500, 2),
            seats: vec![(5, 5)],
        }],
        ..Default::default()
    };
    let showtime_id = make_showtime(&pool, 10, 10, Decimal::new(1000, 2), layout).await;
    let cache = SeatMapCache::new(Duration::from_secs(60));

    let outcome = reserve(&pool, &cache, showtime_id, &[(0, 0), (5, 5)], Uuid::now_v7(), "user@example.com")
        .await
        .unwrap();

    assert_eq!(outcome.total_amount, Decimal::new(2500, 2));
    assert!(outcome.booking_reference.starts_with("HIVE-"));

    let showtime = showtimes::find_by_id(&pool, showtime_id).await.unwrap().unwrap();
    assert_eq!(showtime.seat_availability_state[0], 1); // (0,0) Reserved
    assert_eq!(showtime.seat_availability_state[55], 1); // (5,5) Reserved
    assert_eq!(showtime.version_token, 2);

    let ticket = tickets::find_by_id(&pool, outcome.ticket_id).await.unwrap().unwrap();
    assert_eq!(ticket.created_at, outcome.created_at);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reserve_rejects_an_already_sold_seat(pool: PgPool) {
    let showtime_id = make_showtime(&pool, 10, 10, Decimal::new(1000, 2), LayoutDto::default()).await;
    let cache = SeatMapCache::new(Duration::from_secs(60));

    let showtime = showtimes::find_by_id(&pool, showtime_id).await.unwrap().unwrap();
    let mut buffer = showtime.seat_availability_state.clone();
    buffer[0] = 2; // seat (0,0) already Sold
    let mut tx = pool.begin().await.unwrap();
    let updated =
        showtimes::try_update_seat_buffer(&mut tx, showtime_id, &buffer, showtime.version_token, Uuid::now_v7())
            .await
            .unwrap();
    assert!(updated);
    tx.commit().await.unwrap();

    let result = reserve(&pool, &cache, showtime_id, &[(0, 0)], Uuid::now_v7(), "user@example.com").await;
    assert!(matches!(result, Err(AppError::Conflict(ConflictReason::SeatsUnavailable))));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reserve_rejects_out_of_bounds_seats(pool: PgPool) {
    let showtime_id = make_showtime(&pool, 10, 10, Decimal::new(1000, 2), LayoutDto::default()).await;
    let cache = SeatMapCache::new(Duration::from_secs(60));

    let result = reserve(&pool, &cache, showtime_id, &[(99, 99)], Uuid::now_v7(), "user@example.com").await;
    assert!(matches!(result, Err(AppError::ValidationFailed(_))));

    let showtime = showtimes::find_by_id(&pool, showtime_id).await.unwrap().unwrap();
    assert!(showtime.seat_availability_state.iter().all(|&b| b == 0));
}

/// Two concurrent reservations racing for the same seat: at most one can
/// win. Whichever reads the showtime second either loses at the engine
/// level (`SeatsUnavailable`, if the winner already committed) or at the
/// version-token CAS (`Concurrency`, if both read before either wrote) —
/// both are valid outcomes of the race, spec.md §5/§8's invariant is that
/// exactly one request ever succeeds for a given seat.
#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_reserve_for_the_same_seat_only_one_wins(pool: PgPool) {
    let showtime_id = make_showtime(&pool, 10, 10, Decimal::new(1000, 2), LayoutDto::default()).await;
    let cache = SeatMapCache::new(Duration::from_secs(60));

    let pool_a = pool.clone();
    let cache_a = cache.clone();
    let pool_b = pool.clone();
    let cache_b = cache.clone();

    let (result_a, result_b) = tokio::join!(
        reserve(&pool_a, &cache_a, showtime_id, &[(3, 3)], Uuid::now_v7(), "a@example.com"),
        reserve(&pool_b, &cache_b, showtime_id, &[(3, 3)], Uuid::now_v7(), "b@example.com"),
    );

    let successes = [&result_a, &result_b].into_iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one concurrent reservation of the same seat must succeed");

    for result in [&result_a, &result_b] {
        if let Err(e) = result {
            assert!(matches!(e, AppError::Conflict(_)));
        }
    }

    let showtime = showtimes::find_by_id(&pool, showtime_id).await.unwrap().unwrap();
    assert_eq!(showtime.seat_availability_state[33], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn confirm_payment_marks_seats_sold_and_is_idempotent(pool: PgPool) {
    let showtime_id = make_showtime(&pool, 10, 10, Decimal::new(1000, 2), LayoutDto::default()).await;
    let cache = SeatMapCache::new(Duration::from_secs(60));

    let outcome = reserve(&pool, &cache, showtime_id, &[(1, 1)], Uuid::now_v7(), "user@example.com")
        .await
        .unwrap();

    confirm_payment(&pool, &cache, &outcome.booking_reference, Uuid::now_v7()).await.unwrap();

    let ticket = tickets::find_by_id(&pool, outcome.ticket_id).await.unwrap().unwrap();
    assert_eq!(TicketStatus::from_str(&ticket.status).unwrap(), TicketStatus::Confirmed);

    let showtime = showtimes::find_by_id(&pool, showtime_id).await.unwrap().unwrap();
    assert_eq!(showtime.seat_availability_state[11], 2); // Sold

    // Second confirmation of the same booking reference is a no-op, not an
    // error — the webhook may redeliver.
    confirm_payment(&pool, &cache, &outcome.booking_reference, Uuid::now_v7()).await.unwrap();
}

#[sqlx::test(migrations = "../db/migrations")]
async fn confirming_an_expired_ticket_is_rejected(pool: PgPool) {
    let showtime_id = make_showtime(&pool, 10, 10, Decimal::new(1000, 2), LayoutDto::default()).await;
    let cache = SeatMapCache::new(Duration::from_secs(60));

    let outcome = reserve(&pool, &cache, showtime_id, &[(2, 2)], Uuid::now_v7(), "user@example.com")
        .await
        .unwrap();

    // A zero-width hold window makes every existing pending ticket
    // immediately expirable without needing to fabricate timestamps.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let report = sweep_expired_holds(&pool, &cache, Duration::from_secs(0)).await.unwrap();
    assert_eq!(report.expired_tickets, 1);

    let result = confirm_payment(&pool, &cache, &outcome.booking_reference, Uuid::now_v7()).await;
    assert!(matches!(result, Err(AppError::InvalidState(_))));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn expiry_sweep_releases_seats_back_to_available(pool: PgPool) {
    let showtime_id = make_showtime(&pool, 10, 10, Decimal::new(1000, 2), LayoutDto::default()).await;
    let cache = SeatMapCache::new(Duration::from_secs(60));

    reserve(&pool, &cache, showtime_id, &[(4, 4), (4, 5)], Uuid::now_v7(), "user@example.com")
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    let report = sweep_expired_holds(&pool, &cache, Duration::from_secs(0)).await.unwrap();
    assert_eq!(report.expired_tickets, 1);
    assert_eq!(report.skipped_showtimes, 0);

    let showtime = showtimes::find_by_id(&pool, showtime_id).await.unwrap().unwrap();
    assert_eq!(showtime.seat_availability_state[44], 0); // Available again
    assert_eq!(showtime.seat_availability_state[45], 0);

    // A second tick finds nothing left to expire.
    let report = sweep_expired_holds(&pool, &cache, Duration::from_secs(0)).await.unwrap();
    assert_eq!(report.expired_tickets, 0);
}

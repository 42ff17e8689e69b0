use crate::audit::EXCLUDE_DELETED;
use crate::models::{Auditorium, Showtime};
use chrono::{DateTime, Utc};
use hive_types::api::auditoriums::LayoutDto;
use rust_decimal::Decimal;
use sqlx::{types::Json, PgPool, Postgres, Transaction};
use uuid::Uuid;

pub async fn list_showtimes(pool: &PgPool) -> Result<Vec<Showtime>, sqlx::Error> {
    sqlx::query_as::<_, Showtime>(&format!(
        "SELECT * FROM showtimes WHERE {EXCLUDE_DELETED} ORDER BY start_time_utc ASC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Showtime>, sqlx::Error> {
    sqlx::query_as::<_, Showtime>(&format!(
        "SELECT * FROM showtimes WHERE id = $1 AND {EXCLUDE_DELETED}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Flattened join row backing [`find_with_auditorium`]: the showtime and
/// its auditorium loaded together in one round trip.
#[derive(sqlx::FromRow)]
struct ShowtimeAuditoriumRow {
    showtime_id: Uuid,
    movie_id: Uuid,
    auditorium_id: Uuid,
    start_time_utc: DateTime<Utc>,
    base_price: Decimal,
    seat_availability_state: Vec<u8>,
    version_token: i64,
    showtime_created_at: DateTime<Utc>,
    showtime_updated_at: DateTime<Utc>,
    showtime_created_by: Option<Uuid>,
    showtime_updated_by: Option<Uuid>,
    showtime_is_deleted: bool,
    showtime_deleted_at: Option<DateTime<Utc>>,

    cinema_id: Uuid,
    auditorium_name: String,
    max_rows: i32,
    max_columns: i32,
    layout: Json<LayoutDto>,
    aud_created_at: DateTime<Utc>,
    aud_updated_at: DateTime<Utc>,
    aud_created_by: Option<Uuid>,
    aud_updated_by: Option<Uuid>,
    aud_is_deleted: bool,
    aud_deleted_at: Option<DateTime<Utc>>,
}

impl From<ShowtimeAuditoriumRow> for (Showtime, Auditorium) {
    fn from(row: ShowtimeAuditoriumRow) -> Self {
        let showtime = Showtime {
            id: row.showtime_id,
            movie_id: row.movie_id,
            auditorium_id: row.auditorium_id,
            start_time_utc: row.start_time_utc,
            base_price: row.base_price,
            seat_availability_state: row.seat_availability_state,
            version_token: row.version_token,
            created_at: row.showtime_created_at,
            updated_at: row.showtime_updated_at,
            created_by: row.showtime_created_by,
            updated_by: row.showtime_updated_by,
            is_deleted: row.showtime_is_deleted,
            deleted_at: row.showtime_deleted_at,
        };
        let auditorium = Auditorium {
            id: row.auditorium_id,
            cinema_id: row.cinema_id,
            name: row.auditorium_name,
            max_rows: row.max_rows,
            max_columns: row.max_columns,
            layout: row.layout,
            created_at: row.aud_created_at,
            updated_at: row.aud_updated_at,
            created_by: row.aud_created_by,
            updated_by: row.aud_updated_by,
            is_deleted: row.aud_is_deleted,
            deleted_at: row.aud_deleted_at,
        };
        (showtime, auditorium)
    }
}

const JOIN_QUERY: &str = r#"
SELECT
    s.id AS showtime_id, s.movie_id, s.auditorium_id, s.start_time_utc, s.base_price,
    s.seat_availability_state, s.version_token,
    s.created_at AS showtime_created_at, s.updated_at AS showtime_updated_at,
    s.created_by AS showtime_created_by, s.updated_by AS showtime_updated_by,
    s.is_deleted AS showtime_is_deleted, s.deleted_at AS showtime_deleted_at,
    a.cinema_id, a.name AS auditorium_name, a.max_rows, a.max_columns, a.layout,
    a.created_at AS aud_created_at, a.updated_at AS aud_updated_at,
    a.created_by AS aud_created_by, a.updated_by AS aud_updated_by,
    a.is_deleted AS aud_is_deleted, a.deleted_at AS aud_deleted_at
FROM showtimes s
JOIN auditoriums a ON a.id = s.auditorium_id
WHERE s.id = $1 AND s.is_deleted = false AND a.is_deleted = false
"#;

pub async fn find_with_auditorium(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<(Showtime, Auditorium)>, sqlx::Error> {
    let row = sqlx::query_as::<_, ShowtimeAuditoriumRow>(JOIN_QUERY)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

pub async fn find_with_auditorium_tx(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<Option<(Showtime, Auditorium)>, sqlx::Error> {
    let row = sqlx::query_as::<_, ShowtimeAuditoriumRow>(JOIN_QUERY)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row.map(Into::into))
}

/// Denormalized row backing the seat-map read model: the
/// showtime, its auditorium, and the movie/cinema names needed to render
/// the response, in one round trip.
#[derive(sqlx::FromRow)]
struct SeatMapRow {
    showtime_id: Uuid,
    movie_id: Uuid,
    auditorium_id: Uuid,
    start_time_utc: DateTime<Utc>,
    base_price: Decimal,
    seat_availability_state: Vec<u8>,
    version_token: i64,
    showtime_created_at: DateTime<Utc>,
    showtime_updated_at: DateTime<Utc>,
    showtime_created_by: Option<Uuid>,
    showtime_updated_by: Option<Uuid>,
    showtime_is_deleted: bool,
    showtime_deleted_at: Option<DateTime<Utc>>,

    cinema_id: Uuid,
    auditorium_name: String,
    max_rows: i32,
    max_columns: i32,
    layout: Json<LayoutDto>,
    aud_created_at: DateTime<Utc>,
    aud_updated_at: DateTime<Utc>,
    aud_created_by: Option<Uuid>,
    aud_updated_by: Option<Uuid>,
    aud_is_deleted: bool,
    aud_deleted_at: Option<DateTime<Utc>>,

    movie_title: String,
    cinema_name: String,
}

const SEAT_MAP_QUERY: &str = r#"
SELECT
    s.id AS showtime_id, s.movie_id, s.auditorium_id, s.start_time_utc, s.base_price,
    s.seat_availability_state, s.version_token,
    s.created_at AS showtime_created_at, s.updated_at AS showtime_updated_at,
    s.created_by AS showtime_created_by, s.updated_by AS showtime_updated_by,
    s.is_deleted AS showtime_is_deleted, s.deleted_at AS showtime_deleted_at,
    a.cinema_id, a.name AS auditorium_name, a.max_rows, a.max_columns, a.layout,
    a.created_at AS aud_created_at, a.updated_at AS aud_updated_at,
    a.created_by AS aud_created_by, a.updated_by AS aud_updated_by,
    a.is_deleted AS aud_is_deleted, a.deleted_at AS aud_deleted_at,
    m.title AS movie_title, c.name AS cinema_name
FROM showtimes s
JOIN auditoriums a ON a.id = s.auditorium_id
JOIN movies m ON m.id = s.movie_id
JOIN cinemas c ON c.id = a.cinema_id
WHERE s.id = $1 AND s.is_deleted = false AND a.is_deleted = false
"#;

pub async fn find_seat_map_row(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<(Showtime, Auditorium, String, String)>, sqlx::Error> {
    let row = sqlx::query_as::<_, SeatMapRow>(SEAT_MAP_QUERY)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| {
        let showtime = Showtime {
            id: row.showtime_id,
            movie_id: row.movie_id,
            auditorium_id: row.auditorium_id,
            start_time_utc: row.start_time_utc,
            base_price: row.base_price,
            seat_availability_state: row.seat_availability_state,
            version_token: row.version_token,
            created_at: row.showtime_created_at,
            updated_at: row.showtime_updated_at,
            created_by: row.showtime_created_by,
            updated_by: row.showtime_updated_by,
            is_deleted: row.showtime_is_deleted,
            deleted_at: row.showtime_deleted_at,
        };
        let auditorium = Auditorium {
            id: row.auditorium_id,
            cinema_id: row.cinema_id,
            name: row.auditorium_name,
            max_rows: row.max_rows,
            max_columns: row.max_columns,
            layout: row.layout,
            created_at: row.aud_created_at,
            updated_at: row.aud_updated_at,
            created_by: row.aud_created_by,
            updated_by: row.aud_updated_by,
            is_deleted: row.aud_is_deleted,
            deleted_at: row.aud_deleted_at,
        };
        (showtime, auditorium, row.movie_title, row.cinema_name)
    }))
}

pub async fn create_showtime(
    pool: &PgPool,
    movie_id: Uuid,
    auditorium_id: Uuid,
    start_time_utc: DateTime<Utc>,
    base_price: Decimal,
    seat_count: usize,
    actor_id: Uuid,
) -> Result<Showtime, sqlx::Error> {
    let buffer = vec![0u8; seat_count]; // all Available
    sqlx::query_as::<_, Showtime>(
        r#"
        INSERT INTO showtimes
            (id, movie_id, auditorium_id, start_time_utc, base_price, seat_availability_state, version_token, created_by, updated_by)
        VALUES ($1, $2, $3, $4, $5, $6, 1, $7, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(movie_id)
    .bind(auditorium_id)
    .bind(start_time_utc)
    .bind(base_price)
    .bind(buffer)
    .bind(actor_id)
    .fetch_one(pool)
    .await
}

pub async fn update_showtime_schedule(
    pool: &PgPool,
    id: Uuid,
    start_time_utc: Option<DateTime<Utc>>,
    base_price: Option<Decimal>,
    actor_id: Uuid,
) -> Result<Option<Showtime>, sqlx::Error> {
    sqlx::query_as::<_, Showtime>(
        r#"
        UPDATE showtimes
        SET start_time_utc = COALESCE($2, start_time_utc),
            base_price = COALESCE($3, base_price),
            version_token = version_token + 1,
            updated_by = $4,
            updated_at = NOW()
        WHERE id = $1 AND is_deleted = false
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(start_time_utc)
    .bind(base_price)
    .bind(actor_id)
    .fetch_optional(pool)
    .await
}

pub async fn soft_delete_showtime(pool: &PgPool, id: Uuid, actor_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE showtimes
        SET is_deleted = true, deleted_at = NOW(), updated_by = $2, updated_at = NOW()
        WHERE id = $1 AND is_deleted = false
        "#,
    )
    .bind(id)
    .bind(actor_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Compare-and-swap write of the seat buffer under the showtime's version
/// token. Returns `true` on success, `false` on a concurrent mutation
/// (`affected_rows == 0`) — the caller maps that to
/// `AppError::Conflict(ConflictReason::Concurrency)`. This is the sole
/// concurrency primitive for the buffer (no pessimistic
/// locking of the showtime row).
pub async fn try_update_seat_buffer(
    tx: &mut Transaction<'_, Postgres>,
    showtime_id: Uuid,
    new_buffer: &[u8],
    expected_version: i64,
    actor_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE showtimes
        SET seat_availability_state = $3,
            version_token = version_token + 1,
            updated_by = $4,
            updated_at = NOW()
        WHERE id = $1 AND version_token = $2 AND is_deleted = false
        "#,
    )
    .bind(showtime_id)
    .bind(expected_version)
    .bind(new_buffer)
    .bind(actor_id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() == 1)
}

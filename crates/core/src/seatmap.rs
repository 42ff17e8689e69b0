//! Denormalized seat-map read model, short-TTL cached. Never
//! consulted by the reservation path, which always re-reads storage; every
//! writer that touches a showtime's buffer must invalidate this cache.

use std::time::Duration;

use hive_db::{queries::showtimes, PgPool};
use hive_types::api::showtimes::{SeatCellDto, SeatMapResponse};
use hive_types::enums::SeatStatus;
use hive_types::AppError;
use uuid::Uuid;

#[derive(Clone)]
pub struct SeatMapCache {
    cache: moka::future::Cache<Uuid, SeatMapResponse>,
}

impl SeatMapCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: moka::future::Cache::builder()
                .time_to_live(ttl)
                .max_capacity(10_000)
                .build(),
        }
    }

    pub async fn invalidate(&self, showtime_id: Uuid) {
        self.cache.invalidate(&showtime_id).await;
    }

    /// Returns the cached seat map for `showtime_id`, building and storing
    /// it on a miss.
    pub async fn get_or_build(
        &self,
        pool: &PgPool,
        showtime_id: Uuid,
    ) -> Result<SeatMapResponse, AppError> {
        if let Some(hit) = self.cache.get(&showtime_id).await {
            return Ok(hit);
        }

        let response = build_seat_map(pool, showtime_id).await?;
        self.cache.insert(showtime_id, response.clone()).await;
        Ok(response)
    }
}

async fn build_seat_map(pool: &PgPool, showtime_id: Uuid) -> Result<SeatMapResponse, AppError> {
    let (showtime, auditorium, movie_title, cinema_name) =
        showtimes::find_seat_map_row(pool, showtime_id)
            .await?
            .ok_or_else(|| AppError::NotFound("showtime not found".into()))?;

    let mut cells = Vec::with_capacity(showtime.seat_availability_state.len());
    for row in 0..auditorium.max_rows {
        for col in 0..auditorium.max_columns {
            let idx = (row * auditorium.max_columns + col) as usize;
            let byte = showtime.seat_availability_state[idx];
            let status = SeatStatus::from_byte(byte)
                .ok_or_else(|| AppError::Internal(format!("corrupt seat byte {byte} at ({row},{col})")))?;
            cells.push(SeatCellDto { row, col, status });
        }
    }

    Ok(SeatMapResponse {
        showtime_id,
        movie_title,
        cinema_name,
        auditorium_name: auditorium.name,
        start_time_utc: showtime.start_time_utc,
        max_rows: auditorium.max_rows,
        max_columns: auditorium.max_columns,
        base_price: showtime.base_price,
        cells,
    })
}

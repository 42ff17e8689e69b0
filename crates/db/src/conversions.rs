//! `FromRow` model -> API response DTO conversions, kept in one place per
//! table rather than scattered across route handlers.

use hive_types::api::auditoriums::AuditoriumResponse;
use hive_types::api::cinemas::CinemaResponse;
use hive_types::api::movies::MovieResponse;
use hive_types::api::showtimes::ShowtimeResponse;
use hive_types::enums::ApprovalStatus;
use std::str::FromStr;

use crate::models::{Auditorium, Cinema, Movie, Showtime};

impl From<Movie> for MovieResponse {
    fn from(m: Movie) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            duration_minutes: m.duration_minutes,
            release_date: m.release_date,
            poster_url: m.poster_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<Cinema> for CinemaResponse {
    fn from(c: Cinema) -> Self {
        // `approval_status` is a DB-level invariant, enforced by the
        // column's CHECK constraint; corruption here is a storage bug.
        let approval_status = ApprovalStatus::from_str(&c.approval_status)
            .unwrap_or(ApprovalStatus::Pending);
        Self {
            id: c.id,
            organizer_id: c.organizer_id,
            name: c.name,
            location: c.location,
            contact_email: c.contact_email,
            approval_status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<Auditorium> for AuditoriumResponse {
    fn from(a: Auditorium) -> Self {
        Self {
            id: a.id,
            cinema_id: a.cinema_id,
            name: a.name,
            max_rows: a.max_rows,
            max_columns: a.max_columns,
            layout: a.layout.0,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl From<Showtime> for ShowtimeResponse {
    fn from(s: Showtime) -> Self {
        Self {
            id: s.id,
            movie_id: s.movie_id,
            auditorium_id: s.auditorium_id,
            start_time_utc: s.start_time_utc,
            base_price: s.base_price,
            version_token: s.version_token,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

use crate::audit::EXCLUDE_DELETED;
use crate::models::Movie;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn list_movies(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>(&format!(
        "SELECT * FROM movies WHERE {EXCLUDE_DELETED} ORDER BY release_date DESC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>(&format!(
        "SELECT * FROM movies WHERE id = $1 AND {EXCLUDE_DELETED}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn create_movie(
    pool: &PgPool,
    title: &str,
    description: &str,
    duration_minutes: i32,
    release_date: NaiveDate,
    poster_url: Option<&str>,
    actor_id: Uuid,
) -> Result<Movie, sqlx::Error> {
    sqlx::query_as::<_, Movie>(
        r#"
        INSERT INTO movies (id, title, description, duration_minutes, release_date, poster_url, created_by, updated_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(title)
    .bind(description)
    .bind(duration_minutes)
    .bind(release_date)
    .bind(poster_url)
    .bind(actor_id)
    .fetch_one(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update_movie(
    pool: &PgPool,
    id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
    duration_minutes: Option<i32>,
    release_date: Option<NaiveDate>,
    poster_url: Option<&str>,
    actor_id: Uuid,
) -> Result<Option<Movie>, sqlx::Error> {
    sqlx::query_as::<_, Movie>(
        r#"
        UPDATE movies
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            duration_minutes = COALESCE($4, duration_minutes),
            release_date = COALESCE($5, release_date),
            poster_url = COALESCE($6, poster_url),
            updated_by = $7,
            updated_at = NOW()
        WHERE id = $1 AND is_deleted = false
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(duration_minutes)
    .bind(release_date)
    .bind(poster_url)
    .bind(actor_id)
    .fetch_optional(pool)
    .await
}

/// Soft delete. Hard deletes are never issued by storage consumers.
pub async fn soft_delete_movie(pool: &PgPool, id: Uuid, actor_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE movies
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

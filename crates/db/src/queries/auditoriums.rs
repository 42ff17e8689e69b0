use crate::audit::EXCLUDE_DELETED;
use crate::models::Auditorium;
use hive_types::api::auditoriums::LayoutDto;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

pub async fn list_auditoriums(pool: &PgPool) -> Result<Vec<Auditorium>, sqlx::Error> {
    sqlx::query_as::<_, Auditorium>(&format!(
        "SELECT * FROM auditoriums WHERE {EXCLUDE_DELETED} ORDER BY name ASC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn list_by_cinema(pool: &PgPool, cinema_id: Uuid) -> Result<Vec<Auditorium>, sqlx::Error> {
    sqlx::query_as::<_, Auditorium>(&format!(
        "SELECT * FROM auditoriums WHERE cinema_id = $1 AND {EXCLUDE_DELETED} ORDER BY name ASC"
    ))
    .bind(cinema_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Auditorium>, sqlx::Error> {
    sqlx::query_as::<_, Auditorium>(&format!(
        "SELECT * FROM auditoriums WHERE id = $1 AND {EXCLUDE_DELETED}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_auditorium(
    pool: &PgPool,
    cinema_id: Uuid,
    name: &str,
    max_rows: i32,
    max_columns: i32,
    layout: &LayoutDto,
    actor_id: Uuid,
) -> Result<Auditorium, sqlx::Error> {
    sqlx::query_as::<_, Auditorium>(
        r#"
        INSERT INTO auditoriums (id, cinema_id, name, max_rows, max_columns, layout, created_by, updated_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(cinema_id)
    .bind(name)
    .bind(max_rows)
    .bind(max_columns)
    .bind(Json(layout))
    .bind(actor_id)
    .fetch_one(pool)
    .await
}

pub async fn update_auditorium(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    layout: Option<&LayoutDto>,
    actor_id: Uuid,
) -> Result<Option<Auditorium>, sqlx::Error> {
    sqlx::query_as::<_, Auditorium>(
        r#"
        UPDATE auditoriums
        SET name = COALESCE($2, name),
            layout = COALESCE($3, layout),
            updated_by = $4,
            updated_at = NOW()
        WHERE id = $1 AND is_deleted = false
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(layout.map(Json))
    .bind(actor_id)
    .fetch_optional(pool)
    .await
}

pub async fn soft_delete_auditorium(pool: &PgPool, id: Uuid, actor_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE auditoriums
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

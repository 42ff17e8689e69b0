use crate::audit::EXCLUDE_DELETED;
use crate::models::Cinema;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn list_cinemas(pool: &PgPool) -> Result<Vec<Cinema>, sqlx::Error> {
    sqlx::query_as::<_, Cinema>(&format!(
        "SELECT * FROM cinemas WHERE {EXCLUDE_DELETED} ORDER BY name ASC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Cinema>, sqlx::Error> {
    sqlx::query_as::<_, Cinema>(&format!(
        "SELECT * FROM cinemas WHERE id = $1 AND {EXCLUDE_DELETED}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_cinema(
    pool: &PgPool,
    organizer_id: Uuid,
    name: &str,
    location: &str,
    contact_email: &str,
) -> Result<Cinema, sqlx::Error> {
    sqlx::query_as::<_, Cinema>(
        r#"
        INSERT INTO cinemas (id, organizer_id, name, location, contact_email, approval_status, created_by, updated_by)
        VALUES ($1, $2, $3, $4, $5, 'pending', $2, $2)
        RETURNING *
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(organizer_id)
    .bind(name)
    .bind(location)
    .bind(contact_email)
    .fetch_one(pool)
    .await
}

pub async fn update_cinema(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    location: Option<&str>,
    contact_email: Option<&str>,
    actor_id: Uuid,
) -> Result<Option<Cinema>, sqlx::Error> {
    sqlx::query_as::<_, Cinema>(
        r#"
        UPDATE cinemas
        SET name = COALESCE($2, name),
            location = COALESCE($3, location),
            contact_email = COALESCE($4, contact_email),
            updated_by = $5,
            updated_at = NOW()
        WHERE id = $1 AND is_deleted = false
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(location)
    .bind(contact_email)
    .bind(actor_id)
    .fetch_optional(pool)
    .await
}

/// Admin-only status transition (`Pending -> Approved | Rejected`).
pub async fn set_approval_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
    actor_id: Uuid,
) -> Result<Option<Cinema>, sqlx::Error> {
    sqlx::query_as::<_, Cinema>(
        r#"
        UPDATE cinemas
        SET approval_status = $2, updated_by = $3, updated_at = NOW()
        WHERE id = $1 AND is_deleted = false
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(actor_id)
    .fetch_optional(pool)
    .await
}

pub async fn soft_delete_cinema(pool: &PgPool, id: Uuid, actor_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE cinemas
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

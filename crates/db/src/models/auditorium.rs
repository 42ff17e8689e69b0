use chrono::{DateTime, Utc};
use hive_types::api::auditoriums::LayoutDto;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Auditorium {
    pub id: Uuid,
    pub cinema_id: Uuid,
    pub name: String,
    pub max_rows: i32,
    pub max_columns: i32,
    /// Embedded layout document: disabled seats, wheelchair spots, tiers.
    /// Stored as `JSONB`, read together with the auditorium exactly once.
    pub layout: sqlx::types::Json<LayoutDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Auditorium {
    pub fn layout(&self) -> &LayoutDto {
        &self.layout.0
    }
}

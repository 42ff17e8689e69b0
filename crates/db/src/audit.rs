//! Audit cross-cut: soft-delete and who-did-what fields, populated the same
//! way on every audited table rather than scattered per-query. Every entity
//! except `OutboxMessage` (which is append-only and never soft-deleted)
//! carries `created_at, updated_at, created_by, updated_by, is_deleted,
//! deleted_at`.
//!
//! Default query functions append [`EXCLUDE_DELETED`] to their `WHERE`
//! clause; audit/admin reads that must see soft-deleted rows omit it.

/// SQL fragment appended to default (non-admin) read queries.
pub const EXCLUDE_DELETED: &str = "is_deleted = false";

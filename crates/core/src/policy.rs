//! Ownership and approval checks. Run before any state
//! change; never re-validate the token itself — the principal and its role
//! set are taken as given from the edge.

use hive_db::models::Cinema;
use hive_types::enums::{ApprovalStatus, Role};
use hive_types::{AppError, ConflictReason};
use std::str::FromStr;
use uuid::Uuid;

/// Non-admin principals may only mutate resources under a cinema they
/// organize. Admins bypass this check entirely.
pub fn require_owner_or_admin(cinema: &Cinema, principal_id: Uuid, roles: &[Role]) -> Result<(), AppError> {
    if roles.contains(&Role::Admin) {
        return Ok(());
    }
    if cinema.organizer_id == principal_id {
        return Ok(());
    }
    Err(AppError::Forbidden("not the cinema owner".into()))
}

/// Creating a showtime requires its cinema to be `Approved`. Updates and
/// deletes of an existing showtime do not require this — an organizer can
/// still cancel a showtime after the cinema's approval was revoked.
pub fn require_cinema_approved(cinema: &Cinema) -> Result<(), AppError> {
    let status = ApprovalStatus::from_str(&cinema.approval_status)
        .map_err(|_| AppError::Internal(format!("corrupt approval status: {}", cinema.approval_status)))?;
    if status != ApprovalStatus::Approved {
        return Err(AppError::Conflict(ConflictReason::NotApproved));
    }
    Ok(())
}

/// Cinema approval-status transitions are admin-only.
pub fn require_admin(roles: &[Role]) -> Result<(), AppError> {
    if roles.contains(&Role::Admin) {
        Ok(())
    } else {
        Err(AppError::Forbidden("admin role required".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn cinema(organizer_id: Uuid, approval_status: &str) -> Cinema {
        Cinema {
            id: Uuid::now_v7(),
            organizer_id,
            name: "Test".into(),
            location: "Nowhere".into(),
            contact_email: "a@b.com".into(),
            approval_status: approval_status.into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            created_by: None,
            updated_by: None,
            is_deleted: false,
            deleted_at: None,
        }
    }

    #[test]
    fn owner_passes_non_owner_fails_admin_bypasses() {
        let owner = Uuid::now_v7();
        let other = Uuid::now_v7();
        let c = cinema(owner, "approved");

        assert!(require_owner_or_admin(&c, owner, &[Role::Organizer]).is_ok());
        assert!(require_owner_or_admin(&c, other, &[Role::Organizer]).is_err());
        assert!(require_owner_or_admin(&c, other, &[Role::Admin]).is_ok());
    }

    #[test]
    fn approval_required_for_showtime_creation() {
        let owner = Uuid::now_v7();
        assert!(require_cinema_approved(&cinema(owner, "approved")).is_ok());
        assert!(require_cinema_approved(&cinema(owner, "pending")).is_err());
    }
}

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use hive_core::SeatMapCache;
use hive_db::PgPool;
use hive_integrations::identity::IdentityClient;
use hive_types::{enums::Role, AppError, Principal};

use crate::response::ApiError;

/// Shared application state. Cloned into every handler via axum's
/// `FromRef`; cheap (pool + cache are themselves `Arc`-backed handles).
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub identity: IdentityClient,
    pub seat_map_cache: SeatMapCache,
}

/// Extractor for a required, verified principal. The core never
/// re-validates the token itself — verification happens once,
/// here, at the edge.
pub struct AuthPrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
    AppState: axum::extract::FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| ApiError(AppError::Unauthorized))?;

        let app_state = AppState::from_ref(state);
        let principal = app_state
            .identity
            .verify(bearer.token())
            .map_err(|_| ApiError(AppError::Unauthorized))?;

        Ok(AuthPrincipal(principal))
    }
}

/// Admin-role gate for routes restricted to the admin role (cinema
/// approval-status transitions).
pub fn require_admin(principal: &Principal) -> Result<(), AppError> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("admin role required".into()))
    }
}

/// Organizer-or-admin gate: the minimum role to create catalog resources,
/// before the per-resource ownership check in `hive_core::policy` runs.
pub fn require_organizer_or_admin(principal: &Principal) -> Result<(), AppError> {
    if principal.has_role(Role::Organizer) || principal.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("organizer or admin role required".into()))
    }
}

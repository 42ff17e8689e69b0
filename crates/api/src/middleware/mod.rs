pub mod auth;

pub use auth::{require_admin, require_organizer_or_admin, AppState, AuthPrincipal};

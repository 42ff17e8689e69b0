pub mod api;
pub mod config;
pub mod enums;
pub mod errors;
pub mod principal;
pub mod validation;

pub use config::Config;
pub use errors::{AppError, ConflictReason, Result};
pub use principal::Principal;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Distinguishes the two 409 cases the reservation path can raise.
/// Both map to HTTP 409; only the detail string told to the caller differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    SeatsUnavailable,
    Concurrency,
    NotApproved,
    DuplicateBookingReference,
}

impl std::fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SeatsUnavailable => "one or more requested seats are no longer available",
            Self::Concurrency => "the showtime changed concurrently, re-read the seat map and retry",
            Self::NotApproved => "the cinema is not approved",
            Self::DuplicateBookingReference => "booking reference collision, retry exhausted",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(ConflictReason),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Database(_) | Self::Internal(_) => 500,
            Self::NotFound(_) => 404,
            Self::Unauthorized => 401,
            Self::Forbidden(_) => 403,
            Self::ValidationFailed(_) | Self::InvalidState(_) => 400,
            Self::Conflict(_) => 409,
        }
    }

    /// Short machine-readable title for the problem-details body.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Database(_) | Self::Internal(_) => "Internal Server Error",
            Self::NotFound(_) => "Not Found",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden(_) => "Forbidden",
            Self::ValidationFailed(_) => "Validation Failed",
            Self::InvalidState(_) => "Invalid State",
            Self::Conflict(_) => "Conflict",
        }
    }
}

//! Problem-details error responses: `{status, title, detail,
//! instance}`. `hive_types::AppError` lives in a crate with no axum
//! dependency, so this wraps it in a local newtype to satisfy the orphan
//! rule.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hive_types::AppError;
use serde::Serialize;

pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ProblemDetails {
    status: u16,
    title: &'static str,
    detail: String,
    instance: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status >= 500 {
            tracing::error!(error = %self.0, "internal error");
        }
        let body = ProblemDetails {
            status,
            title: self.0.title(),
            detail: self.0.to_string(),
            instance: None,
        };
        let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (code, Json(body)).into_response()
    }
}

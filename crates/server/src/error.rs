use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::services::lead_intake::LeadError;
use thiserror::Error;
use tracing::{error, warn};
use utils::response::ApiResponse;

pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request.";
pub const LEAD_SUBMIT_FAILED_MESSAGE: &str = "Failed to submit request. Please try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Lead(#[from] LeadError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Lead(LeadError::Database(e)) => {
                error!(error = %e, "Failed to store listing request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    LEAD_SUBMIT_FAILED_MESSAGE.to_string(),
                )
            }
            ApiError::Lead(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Database(e) => {
                error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::MalformedBody(e) => {
                warn!(error = %e, "Rejected malformed request body");
                (StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE.to_string())
            }
        };

        (status, Json(ApiResponse::<()>::error(&message))).into_response()
    }
}

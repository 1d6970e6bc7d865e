use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use dogbreed_core::error::CoreError;
use dogbreed_db::StoreError;

use crate::views;

/// Application-level error type for HTTP handlers.
///
/// Every variant halts the request and renders a standalone diagnostic page,
/// so a failure never produces a partial table or form.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `dogbreed_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage-layer error from `dogbreed_db`.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured upload limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Status code and the diagnostic shown to the caller.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("No {entity} record found for ID: {id}"),
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Upload(msg) => {
                    tracing::error!(error = %msg, "Upload failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Error uploading file: {msg}"),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Store(err) => {
                tracing::error!(error = %err, "Storage error");
                match err {
                    StoreError::Connection(_) => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
                    StoreError::Query(_) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
                }
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let page = views::error_page(status, &message);
        (status, Html(page.into_string())).into_response()
    }
}

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use latency_workshop_common::{ParseLatencyModeError, StoreError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Rejected at the boundary; the latency manager is never called.
    #[error(transparent)]
    InvalidLatencyMode(#[from] ParseLatencyModeError),

    #[error("{0}")]
    Validation(String),

    /// Body missing, not JSON, or not the expected shape.
    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),

    /// Path segment that does not parse, e.g. a non-numeric user id.
    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),

    #[error("Not Found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::DuplicateEmail(_) | StoreError::EmptyUpdate) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidLatencyMode(_) | ApiError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Json(rejection) => rejection.status(),
            ApiError::Path(rejection) => rejection.status(),
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::debug!(%status, error = %self, "request rejected");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

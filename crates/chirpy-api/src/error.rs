use std::time::Duration;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chirpy_types::api::ErrorResponse;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::debug;

/// Every handler failure. The message is what the client sees; internal
/// causes are logged where the error is created and never serialized.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input, oversize body, or a rejected store write. HTTP 400.
    #[error("{0}")]
    BadRequest(String),

    /// Valid identifier with no record. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Privileged operation outside development mode. HTTP 403.
    #[error("{0}")]
    Forbidden(String),

    /// Unexpected store or runtime failure. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest("problem with request body".into())
    }
}

/// Failure of a single store call made through `AppStateInner::call_store`.
#[derive(Debug, Error)]
pub enum StoreCallError {
    #[error("store call {0} timed out after {1:?}")]
    Timeout(&'static str, Duration),

    #[error("store task failed: {0}")]
    Join(#[from] JoinError),

    #[error("store call {0} failed: {1:#}")]
    Store(&'static str, anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::Internal("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn envelope_carries_message_only() {
        let resp = ApiError::NotFound("data not found".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "data not found" }));
    }
}

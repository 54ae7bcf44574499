use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use taskd_store::StoreError;

use crate::dto::ApiResponse;

/// Failure taxonomy for the HTTP layer. Externally only the status code and
/// the error envelope are visible.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or out-of-range client input. 400.
    #[error("{0}")]
    Validation(String),

    /// No visible row for the requested id. 404.
    #[error("{0}")]
    NotFound(String),

    /// A well-formed request the domain rules reject. 500, matching the
    /// original service's external contract.
    #[error("{0}")]
    Domain(String),

    /// Storage or other unexpected failure. 500.
    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(msg) => {
                tracing::warn!(error = %msg, "invalid request");
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(msg) => {
                tracing::warn!(error = %msg, "not found");
                StatusCode::NOT_FOUND
            }
            ApiError::Domain(msg) => {
                tracing::error!(error = %msg, "domain rule rejected request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ApiResponse::error(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404() {
        let err: ApiError = StoreError::NotFound("task 7 not found".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_store_errors_map_to_500() {
        let err: ApiError = StoreError::Database("locked".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::Validation("No fields to update".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}

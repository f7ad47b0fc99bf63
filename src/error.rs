//! API error handling module
//!
//! Provides a unified error type for all API endpoints. Every failure is
//! serialized as `{"error": "<message>"}`; datastore messages are passed
//! through verbatim.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::auth::SigninError;
use crate::db::StoreError;
use crate::uploads::UploadError;

/// API error type with structured variants for different error categories
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request - client provided invalid input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unauthorized - missing or invalid sign-in proof
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Not found - requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error - unexpected server-side failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Service unavailable - required backing service is not configured
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Datastore error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Upload provider error
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Sign-in verification error
    #[error(transparent)]
    Signin(#[from] SigninError),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a service unavailable error
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(ref e) => match e {
                // A single-row lookup that matched nothing
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                // Everything else is an upstream datastore failure
                StoreError::Connection(_)
                | StoreError::Migration(_)
                | StoreError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Signin(ref e) => match e {
                // The relay judged the proof and rejected it
                SigninError::Rejected(_) => StatusCode::UNAUTHORIZED,
                // The relay could not be reached; the proof was never judged
                SigninError::RelayUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    /// Get the error category for logging
    fn error_category(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Store(_) => "datastore",
            Self::Upload(_) => "upload_provider",
            Self::Signin(_) => "signin",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let category = self.error_category();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                category = category,
                error = %message,
                "Server error"
            );
        } else {
            tracing::warn!(
                status = %status,
                category = category,
                error = %message,
                "Client error"
            );
        }

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::unauthorized("no proof").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::not_found("no board").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::service_unavailable("no db").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_mapping() {
        let err = ApiError::from(StoreError::NotFound("abc".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = ApiError::from(StoreError::Query("duplicate key".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_signin_error_mapping() {
        let err = ApiError::from(SigninError::Rejected("bad signature".into()));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = ApiError::from(SigninError::RelayUnavailable("timeout".into()));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_datastore_message_passed_through() {
        // The datastore message must survive verbatim in the Display output
        let msg = "duplicate key value violates unique constraint \"boards_slug_key\"";
        let err = ApiError::from(StoreError::Query(msg.to_string()));
        assert_eq!(err.to_string(), msg);
    }
}

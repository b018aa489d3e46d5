//! Defines the custom `ApiError` type for the HTTP server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use transform_models::{ErrorDetail, ErrorResponse};

use crate::sandbox::TransformError;

/// A custom error type for the API that can be converted into an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// Represents a resource that could not be found.
    NotFound(String),

    /// The submitted data was rejected by the transformation script.
    InvalidData(Vec<String>),

    /// Represents a generic internal server error.
    InternalServerError(String),
}

/// Converts a `TransformError` into an `ApiError`.
///
/// Failures caused by the script or its input are reported back to the
/// caller; everything else is an internal error.
impl From<TransformError> for ApiError {
    fn from(err: TransformError) -> Self {
        if err.is_client_error() {
            ApiError::InvalidData(vec![err.message()])
        } else {
            ApiError::InternalServerError(err.to_string())
        }
    }
}

/// Implements the conversion from `ApiError` into an `axum` response.
///
/// This is the central point for mapping internal application errors to
/// user-facing HTTP responses.
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::NotFound(message) =>
                (StatusCode::NOT_FOUND, ErrorResponse { message, errors: vec![] }),
            ApiError::InvalidData(messages) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message: "INVALID_DATA".to_string(),
                    errors: messages.into_iter().map(|message| ErrorDetail { message }).collect(),
                },
            ),
            ApiError::InternalServerError(err) => {
                tracing::error!("Internal server error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        message: "An internal server error occurred".to_string(),
                        errors: vec![],
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

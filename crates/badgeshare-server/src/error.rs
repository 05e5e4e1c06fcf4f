//! HTTP error types for the `BadgeShare` server.
//!
//! The JSON API (`/api/save`) answers errors with [`AppError`], a JSON body
//! carrying a machine-readable `error` field and a human-readable `message`.
//! The HTML page routes answer with [`PageError`], a short plain-text body.
//!
//! Storage and decoding failures are logged here with full detail; the
//! client only ever sees a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use badgeshare_core::error::{PayloadError, RecordError};

/// Error returned from JSON API handlers.
#[derive(Debug)]
pub enum AppError {
    /// Client sent invalid or incomplete input.
    BadRequest(String),
    /// The route exists but not for this HTTP method.
    MethodNotAllowed,
    /// Internal server error.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "method_not_allowed",
                "method not allowed".to_owned(),
            ),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        error!(error = %err, "record store failure");
        Self::Internal("internal server error".to_owned())
    }
}

/// Error returned from HTML page handlers, rendered as plain text.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The stateless route was called without a `data` parameter.
    #[error("No configuration data provided")]
    NoData,
    /// The record store failed.
    #[error("Internal server error")]
    Internal,
    /// The stateless payload could not be decoded.
    #[error("Error processing configuration")]
    Processing,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NoData => StatusCode::NOT_FOUND,
            Self::Internal | Self::Processing => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

impl From<RecordError> for PageError {
    fn from(err: RecordError) -> Self {
        error!(error = %err, "record store failure");
        Self::Internal
    }
}

impl From<PayloadError> for PageError {
    fn from(err: PayloadError) -> Self {
        error!(error = %err, "failed to decode configuration payload");
        Self::Processing
    }
}

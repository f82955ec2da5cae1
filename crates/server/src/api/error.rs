//! Mapping from service errors to HTTP responses.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use tracing::{debug, warn};

use reelbox_core::{ErrorKind, ServiceError};

use crate::metrics::HTTP_ERRORS_TOTAL;

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        ErrorKind::IoFailure => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::UpstreamAuthFailure | ErrorKind::UpstreamError => StatusCode::BAD_GATEWAY,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a service error into a status and JSON body.
pub fn error_response(err: ServiceError) -> ApiError {
    let kind = err.kind();
    let status = status_for(kind);

    if status.is_server_error() {
        warn!(kind = %kind, retryable = err.is_retryable(), error = %err, "Request failed");
    } else {
        debug!(kind = %kind, error = %err, "Request rejected");
    }
    HTTP_ERRORS_TOTAL.with_label_values(&[kind.as_str()]).inc();

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            kind,
        }),
    )
}

/// Shorthand for rejecting malformed request input.
pub fn invalid_request(message: impl Into<String>) -> ApiError {
    error_response(ServiceError::invalid_argument(message))
}

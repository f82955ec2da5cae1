//! Failure taxonomy shared by the catalog client and the favorites store.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Stable, fieldless classification of a [`ServiceError`].
///
/// The snake_case names are part of the HTTP error body and the metrics
/// labels, so they must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    AlreadyExists,
    NotFound,
    IoFailure,
    UpstreamTimeout,
    UpstreamUnavailable,
    UpstreamAuthFailure,
    UpstreamError,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::NotFound => "not_found",
            ErrorKind::IoFailure => "io_failure",
            ErrorKind::UpstreamTimeout => "upstream_timeout",
            ErrorKind::UpstreamUnavailable => "upstream_unavailable",
            ErrorKind::UpstreamAuthFailure => "upstream_auth_failure",
            ErrorKind::UpstreamError => "upstream_error",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by every public operation of the service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller supplied an argument that fails validation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A favorite with the same external id is already stored.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The referenced favorite does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Writing the favorites file failed.
    #[error("I/O failure: {message}")]
    IoFailure {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog provider did not answer within the configured timeout.
    #[error("Catalog provider timed out: {0}")]
    UpstreamTimeout(String),

    /// The catalog provider could not be reached (DNS, refused, unreachable).
    #[error("Catalog provider unavailable: {message}")]
    UpstreamUnavailable {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The catalog provider rejected our credentials.
    #[error("Catalog provider rejected the API key: {0}")]
    UpstreamAuthFailure(String),

    /// The catalog provider answered with an unexpected status.
    #[error("Catalog provider error: {status} - {message}")]
    UpstreamError { status: u16, message: String },

    /// Anything that does not fit the categories above.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ServiceError::InvalidArgument(message.into())
    }

    pub fn io_failure(message: impl Into<String>, source: std::io::Error) -> Self {
        ServiceError::IoFailure {
            message: message.into(),
            source,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ServiceError::Internal(message.into())
    }

    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ServiceError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::IoFailure { .. } => ErrorKind::IoFailure,
            ServiceError::UpstreamTimeout(_) => ErrorKind::UpstreamTimeout,
            ServiceError::UpstreamUnavailable { .. } => ErrorKind::UpstreamUnavailable,
            ServiceError::UpstreamAuthFailure(_) => ErrorKind::UpstreamAuthFailure,
            ServiceError::UpstreamError { .. } => ErrorKind::UpstreamError,
            ServiceError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether the caller may reasonably try the same request again later.
    ///
    /// Auth failures need a configuration change and are never retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::IoFailure { .. }
            | ServiceError::UpstreamTimeout(_)
            | ServiceError::UpstreamUnavailable { .. } => true,
            ServiceError::UpstreamError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Internal(format!("JSON error: {}", e))
    }
}

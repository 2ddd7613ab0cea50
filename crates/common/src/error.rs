//! Common error types shared across crates.

use thiserror::Error;

use crate::protocol::ErrorResponse;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::EncryptionFailure`] → 500
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed, e.g. a missing password.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The requested note does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Sealing or opening a note failed.
    #[error("encryption failure: {0}")]
    EncryptionFailure(String),

    /// An unexpected internal error occurred, e.g. the note store failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::EncryptionFailure(_) => 500,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in [`ErrorResponse::code`].
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::EncryptionFailure(_) | ServiceError::Internal(_) => "internal_error",
        }
    }

    /// Build the response body for this error.
    ///
    /// The message is the caller-safe text carried by the variant, without the
    /// category prefix used by `Display`.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            ServiceError::BadRequest(m)
            | ServiceError::NotFound(m)
            | ServiceError::EncryptionFailure(m)
            | ServiceError::Internal(m) => m.clone(),
        };
        ErrorResponse::new(self.code(), message)
    }
}
